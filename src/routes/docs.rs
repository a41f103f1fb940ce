//! OpenAPI document and the interactive explorer. `/` redirects to the explorer.

use crate::handlers::todo;
use crate::model::{TodoInput, TodoItem};
use axum::{response::Redirect, routing::get, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

#[derive(OpenApi)]
#[openapi(
    info(title = "Todo API Lite", version = "v1"),
    paths(
        todo::list_todos,
        todo::get_todo,
        todo::create_todo,
        todo::update_todo,
        todo::delete_todo,
    ),
    components(schemas(TodoItem, TodoInput)),
    tags((name = "todos", description = "To-do item CRUD"))
)]
pub struct ApiDoc;

pub fn docs_routes() -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::temporary(&format!("{}/", SWAGGER_UI_PATH)) }))
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
}
