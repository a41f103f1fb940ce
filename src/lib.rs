//! Todo API Lite: minimal to-do CRUD over HTTP, backed by PostgreSQL or an in-memory store.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod routes;
pub mod state;
pub mod store;

pub use config::{Config, StoreConfig};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use model::{TodoInput, TodoItem};
pub use routes::{app, ApiDoc};
pub use state::AppState;
pub use store::{connect, MemoryTodoStore, PgTodoStore, TodoStore};
