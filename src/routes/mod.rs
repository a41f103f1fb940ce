//! Route assembly.

pub mod common;
pub mod docs;
pub mod todo;

pub use common::common_routes;
pub use docs::{docs_routes, ApiDoc};
pub use todo::todo_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// The full application: to-do CRUD, operational routes, and API docs.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(todo_routes(state.clone()))
        .merge(common_routes(state))
        .merge(docs_routes())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}
