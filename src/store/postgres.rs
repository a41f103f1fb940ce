//! PostgreSQL backend: explicit SQL against the `todo_items` table.

use crate::error::AppError;
use crate::migration::apply_migrations;
use crate::model::{TodoInput, TodoItem};
use crate::store::TodoStore;
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

const COLUMNS: &str = "id, title, is_completed, created_at";

pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    /// Ensure the database exists, open a pool, and bring the schema up to date.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let options = PgConnectOptions::from_str(database_url)?;
        ensure_database_exists(&options).await?;
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        let applied = apply_migrations(&pool).await?;
        tracing::info!(max_connections, migrations_applied = applied.len(), "connected to postgres");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn list(&self) -> Result<Vec<TodoItem>, AppError> {
        let sql = format!("SELECT {} FROM todo_items ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, TodoItem>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get(&self, id: i64) -> Result<Option<TodoItem>, AppError> {
        let sql = format!("SELECT {} FROM todo_items WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, TodoItem>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, input: TodoInput) -> Result<TodoItem, AppError> {
        let sql = format!(
            "INSERT INTO todo_items (title, is_completed, created_at) VALUES ($1, $2, NOW()) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, TodoItem>(&sql)
            .bind(input.title)
            .bind(input.is_completed)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: i64, input: TodoInput) -> Result<(), AppError> {
        let sql = "UPDATE todo_items SET title = $2, is_completed = $3 WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(id)
            .bind(input.title)
            .bind(input.is_completed)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::todo_not_found(id));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let sql = "DELETE FROM todo_items WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::todo_not_found(id));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// SQLSTATE raised by CREATE DATABASE when the name is already taken.
const DUPLICATE_DATABASE: &str = "42P04";

/// Ensure the target database exists; create it if not. Connects to the `postgres`
/// maintenance database to run CREATE DATABASE. If that connection is refused (no
/// privilege, managed instance), the check is skipped and the main pool connection
/// reports any real problem. Losing a creation race to another starter counts as success.
pub async fn ensure_database_exists(options: &PgConnectOptions) -> Result<(), AppError> {
    let Some((admin, db_name)) = maintenance_target(options) else {
        return Ok(());
    };
    let mut conn = match admin.connect().await {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = %e, "cannot reach maintenance database; skipping create-if-missing");
            return Ok(());
        }
    };
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        match sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await
        {
            Ok(_) => {}
            Err(e) if is_duplicate_database(&e) => {
                tracing::debug!(database = %db_name, "database created concurrently");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Options for the `postgres` maintenance database plus the decoded target name, or
/// `None` when the target is unset or is the maintenance database itself.
fn maintenance_target(options: &PgConnectOptions) -> Option<(PgConnectOptions, String)> {
    let db_name = options.get_database()?.trim().to_string();
    if db_name.is_empty() || db_name == "postgres" {
        return None;
    }
    Some((options.clone().database("postgres"), db_name))
}

fn is_duplicate_database(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(DUPLICATE_DATABASE),
        _ => false,
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(url: &str) -> Option<(PgConnectOptions, String)> {
        maintenance_target(&PgConnectOptions::from_str(url).unwrap())
    }

    #[test]
    fn maintenance_target_swaps_in_postgres_database() {
        let (admin, name) = target("postgres://u:p@db:5432/todo_db").unwrap();
        assert_eq!(name, "todo_db");
        assert_eq!(admin.get_database(), Some("postgres"));
        assert_eq!(admin.get_host(), "db");
        assert_eq!(admin.get_port(), 5432);
    }

    #[test]
    fn maintenance_target_decodes_percent_encoded_name() {
        let (admin, name) = target("postgres://db/my%2Ddb").unwrap();
        assert_eq!(name, "my-db");
        assert_eq!(admin.get_database(), Some("postgres"));
    }

    #[test]
    fn maintenance_target_ignores_slash_in_query_options() {
        assert!(target("postgres://db:5432?sslrootcert=/etc/ca.pem").is_none());
    }

    #[test]
    fn maintenance_target_keeps_query_options_with_name() {
        let (_, name) = target("postgres://db/todo_db?sslmode=disable").unwrap();
        assert_eq!(name, "todo_db");
    }

    #[test]
    fn maintenance_database_itself_needs_no_check() {
        assert!(target("postgres://db/postgres").is_none());
    }

    #[test]
    fn non_database_errors_are_not_duplicates() {
        assert!(!is_duplicate_database(&sqlx::Error::RowNotFound));
        assert!(!is_duplicate_database(&sqlx::Error::PoolTimedOut));
    }

    #[test]
    fn quote_ident_doubles_quotes() {
        assert_eq!(quote_ident("todo_db"), "\"todo_db\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
