//! SQLite storage layer for drawings.
//!
//! All access goes through a single pooled connection, so statements are
//! serialised and each repository call is atomic at the row level.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::SqlitePool;

/// Errors raised by the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// A stored row could not be turned back into a domain value.
    #[error("Failed to decode column '{column}': {message}")]
    Decode {
        column: &'static str,
        message: String,
    },

    #[error("Failed to encode strokes: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Open a single-connection pool, creating the database file if missing.
///
/// Idle and lifetime reaping are disabled so `sqlite::memory:` databases
/// live as long as the pool.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations. Safe to run on every startup.
pub async fn run_migrations(pool: &DbPool) -> Result<(), DbError> {
    sqlx::migrate!("../../db/migrations").run(pool).await?;
    tracing::debug!("Drawing schema up to date");
    Ok(())
}
