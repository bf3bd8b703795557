//! `hostwatch-db` — SQLite persistence for health samples.
//!
//! The stats store is a single append-only table created lazily on first
//! use. The store is reopened fresh on every run; connections are scoped
//! to each statement and returned to the pool on every exit path.

use sqlx::sqlite::SqlitePoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::SqlitePool;

/// Error type for stats-store failures.
///
/// Recovered locally by the orchestrator: logged, never fatal to the run.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Stats store error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Create a connection pool from a database URL.
///
/// The sampler runs one linear pipeline, so a single connection suffices.
pub async fn create_pool(database_url: &str) -> Result<DbPool, StorageError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Verify the store is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), StorageError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
