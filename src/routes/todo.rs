//! The five to-do routes.

use crate::handlers::todo::{create_todo, delete_todo, get_todo, list_todos, update_todo};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn todo_routes(state: AppState) -> Router {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/:id", get(get_todo).put(update_todo).delete(delete_todo))
        .with_state(state)
}
