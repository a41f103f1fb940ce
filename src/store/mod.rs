//! Storage adapter: one table of [`TodoItem`]s behind an async trait, backed by
//! PostgreSQL or an in-memory map.

pub mod memory;
pub mod postgres;

use crate::config::StoreConfig;
use crate::error::AppError;
use crate::model::{TodoInput, TodoItem};
use async_trait::async_trait;
use std::sync::Arc;

pub use memory::MemoryTodoStore;
pub use postgres::{ensure_database_exists, PgTodoStore};

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All items, ordered by id.
    async fn list(&self) -> Result<Vec<TodoItem>, AppError>;

    /// The item with `id`, or `None`.
    async fn get(&self, id: i64) -> Result<Option<TodoItem>, AppError>;

    /// Persist a new item. The store assigns `id` and `created_at`.
    async fn create(&self, input: TodoInput) -> Result<TodoItem, AppError>;

    /// Overwrite `title` and `is_completed`. `AppError::NotFound` when absent.
    async fn update(&self, id: i64, input: TodoInput) -> Result<(), AppError>;

    /// Remove permanently. `AppError::NotFound` when absent.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Cheap round trip to the backing store.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Build the configured backend. For PostgreSQL this creates the database if needed,
/// opens the pool, and applies pending migrations; any failure is fatal to startup.
pub async fn connect(config: &StoreConfig) -> Result<Arc<dyn TodoStore>, AppError> {
    match config {
        StoreConfig::Memory => {
            tracing::info!("using in-memory store; data is not persisted");
            Ok(Arc::new(MemoryTodoStore::new()))
        }
        StoreConfig::Postgres {
            database_url,
            max_connections,
        } => {
            let store = PgTodoStore::connect(database_url, *max_connections).await?;
            Ok(Arc::new(store))
        }
    }
}
