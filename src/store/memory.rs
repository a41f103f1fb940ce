//! Ephemeral store for local development and tests.

use crate::error::AppError;
use crate::model::{TodoInput, TodoItem};
use crate::store::TodoStore;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    items: BTreeMap<i64, TodoItem>,
    last_id: i64,
}

/// Ids start at 1 and are never reused, even after delete.
#[derive(Default)]
pub struct MemoryTodoStore {
    inner: RwLock<Inner>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn list(&self) -> Result<Vec<TodoItem>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.items.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<TodoItem>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.items.get(&id).cloned())
    }

    async fn create(&self, input: TodoInput) -> Result<TodoItem, AppError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let item = TodoItem {
            id: inner.last_id,
            title: input.title,
            is_completed: input.is_completed,
            created_at: Utc::now(),
        };
        inner.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update(&self, id: i64, input: TodoInput) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        let item = inner
            .items
            .get_mut(&id)
            .ok_or_else(|| AppError::todo_not_found(id))?;
        item.title = input.title;
        item.is_completed = input.is_completed;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        inner
            .items
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::todo_not_found(id))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let store = MemoryTodoStore::new();
        let a = store.create(TodoInput::new("a", false)).await.unwrap();
        let b = store.create(TodoInput::new("b", true)).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryTodoStore::new();
        let a = store.create(TodoInput::new("a", false)).await.unwrap();
        store.delete(a.id).await.unwrap();
        let b = store.create(TodoInput::new("b", false)).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn update_keeps_id_and_created_at() {
        let store = MemoryTodoStore::new();
        let created = store.create(TodoInput::new("old", false)).await.unwrap();
        store.update(created.id, TodoInput::new("new", true)).await.unwrap();
        let got = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(got.id, created.id);
        assert_eq!(got.created_at, created.created_at);
        assert_eq!(got.title.as_deref(), Some("new"));
        assert!(got.is_completed);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let store = MemoryTodoStore::new();
        assert!(store.get(42).await.unwrap().is_none());
        assert!(matches!(
            store.update(42, TodoInput::default()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(store.delete(42).await, Err(AppError::NotFound(_))));
    }
}
