//! To-do CRUD handlers. Each performs exactly one store call and maps the result to a status.

use crate::error::AppError;
use crate::model::{TodoInput, TodoItem};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

pub const TODOS_PATH: &str = "/todos";

/// List all to-do items.
#[utoipa::path(
    get,
    path = "/todos",
    tag = "todos",
    operation_id = "GetAllTodos",
    responses((status = 200, description = "All items", body = Vec<TodoItem>))
)]
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<TodoItem>>, AppError> {
    tracing::info!("GET /todos requested");
    let items = state.store.list().await?;
    Ok(Json(items))
}

/// Fetch one to-do item by id.
#[utoipa::path(
    get,
    path = "/todos/{id}",
    tag = "todos",
    operation_id = "GetTodoById",
    params(("id" = i64, Path, description = "Item id")),
    responses(
        (status = 200, description = "The item", body = TodoItem),
        (status = 404, description = "No item with this id")
    )
)]
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TodoItem>, AppError> {
    tracing::info!("GET /todos/{} requested", id);
    let item = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| AppError::todo_not_found(id))?;
    Ok(Json(item))
}

/// Create a to-do item. Responds with the stored item and its location.
#[utoipa::path(
    post,
    path = "/todos",
    tag = "todos",
    operation_id = "CreateTodo",
    request_body = TodoInput,
    responses(
        (status = 201, description = "Created", body = TodoItem,
            headers(("location" = String, description = "URL of the new item")))
    )
)]
pub async fn create_todo(
    State(state): State<AppState>,
    Json(input): Json<TodoInput>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(title = ?input.title, "POST /todos");
    let item = state.store.create(input).await?;
    let location = format!("{}/{}", TODOS_PATH, item.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(item)))
}

/// Overwrite title and completion state of an existing item.
#[utoipa::path(
    put,
    path = "/todos/{id}",
    tag = "todos",
    operation_id = "UpdateTodo",
    params(("id" = i64, Path, description = "Item id")),
    request_body = TodoInput,
    responses(
        (status = 204, description = "Updated"),
        (status = 404, description = "No item with this id")
    )
)]
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<TodoInput>,
) -> Result<StatusCode, AppError> {
    tracing::info!("PUT /todos/{} requested", id);
    state.store.update(id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete an item permanently.
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = "todos",
    operation_id = "DeleteTodo",
    params(("id" = i64, Path, description = "Item id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No item with this id")
    )
)]
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    tracing::info!("DELETE /todos/{} requested", id);
    state.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
