//! The to-do entity and its request shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored to-do item. `id` and `created_at` are assigned by the store and never change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: i64,
    pub title: Option<String>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Body accepted by create and update. Only the mutable fields are read; `id` and
/// `createdAt` may be present in the payload but are ignored.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
}

impl TodoInput {
    pub fn new(title: impl Into<String>, is_completed: bool) -> Self {
        Self {
            title: Some(title.into()),
            is_completed,
        }
    }
}
