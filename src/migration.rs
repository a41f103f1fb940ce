//! Schema migrations for the PostgreSQL backend. Applied in version order at startup;
//! each pending step runs in its own transaction together with its bookkeeping row.

use crate::error::AppError;
use sqlx::{Connection, PgConnection, PgPool};

pub const MIGRATIONS_TABLE: &str = "schema_migrations";

#[derive(Clone, Copy, Debug)]
pub struct Migration {
    pub version: i64,
    pub description: &'static str,
    pub sql: &'static str,
}

/// Embedded migrations, ordered by version. Never edit an applied step; append a new one.
pub const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    description: "create todo_items",
    sql: r#"
        CREATE TABLE IF NOT EXISTS todo_items (
            id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
            title TEXT,
            is_completed BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
    "#,
}];

/// Key for the session advisory lock that serializes concurrent migrators.
const MIGRATION_LOCK_KEY: i64 = 0x746f_646f;

/// Apply all pending migrations. Returns the versions applied by this call.
pub async fn apply_migrations(pool: &PgPool) -> Result<Vec<i64>, AppError> {
    let mut conn = pool.acquire().await?;
    sqlx::query("SELECT pg_advisory_lock($1)")
        .bind(MIGRATION_LOCK_KEY)
        .execute(&mut *conn)
        .await?;
    let result = apply_locked(&mut *conn).await;
    if let Err(e) = sqlx::query("SELECT pg_advisory_unlock($1)")
        .bind(MIGRATION_LOCK_KEY)
        .execute(&mut *conn)
        .await
    {
        tracing::warn!(error = %e, "failed to release migration lock");
    }
    result
}

async fn apply_locked(conn: &mut PgConnection) -> Result<Vec<i64>, AppError> {
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            version BIGINT PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        MIGRATIONS_TABLE
    ))
    .execute(&mut *conn)
    .await?;

    let applied: Vec<(i64,)> = sqlx::query_as(&format!("SELECT version FROM {}", MIGRATIONS_TABLE))
        .fetch_all(&mut *conn)
        .await?;
    let applied: Vec<i64> = applied.into_iter().map(|(v,)| v).collect();

    let mut newly_applied = Vec::new();
    for m in pending(MIGRATIONS, &applied) {
        tracing::info!(version = m.version, description = m.description, "applying migration");
        apply_one(conn, m)
            .await
            .map_err(|source| AppError::Migration { version: m.version, source })?;
        newly_applied.push(m.version);
    }
    if newly_applied.is_empty() {
        tracing::debug!("schema up to date");
    }
    Ok(newly_applied)
}

async fn apply_one(conn: &mut PgConnection, m: &Migration) -> Result<(), sqlx::Error> {
    let mut tx = conn.begin().await?;
    sqlx::query(m.sql).execute(&mut *tx).await?;
    sqlx::query(&format!(
        "INSERT INTO {} (version, description) VALUES ($1, $2)",
        MIGRATIONS_TABLE
    ))
    .bind(m.version)
    .bind(m.description)
    .execute(&mut *tx)
    .await?;
    tx.commit().await
}

/// Migrations not yet recorded as applied, in ascending version order.
fn pending<'a>(all: &'a [Migration], applied: &[i64]) -> Vec<&'a Migration> {
    let mut out: Vec<&Migration> = all.iter().filter(|m| !applied.contains(&m.version)).collect();
    out.sort_by_key(|m| m.version);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_are_unique_and_ascending() {
        let versions: Vec<i64> = MIGRATIONS.iter().map(|m| m.version).collect();
        let mut sorted = versions.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(versions, sorted);
    }

    #[test]
    fn pending_skips_applied_versions() {
        let all = [
            Migration { version: 2, description: "b", sql: "" },
            Migration { version: 1, description: "a", sql: "" },
            Migration { version: 3, description: "c", sql: "" },
        ];
        let todo: Vec<i64> = pending(&all, &[2]).iter().map(|m| m.version).collect();
        assert_eq!(todo, vec![1, 3]);
    }

    #[test]
    fn nothing_pending_when_all_applied() {
        assert!(pending(MIGRATIONS, &[1]).is_empty());
    }
}
