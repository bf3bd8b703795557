//! Repository for the `stats` table (append-only).
//!
//! Rows are inserted with parameterized statements only — sample values
//! never reach the query text, so no content can alter SQL structure.
//! Existing rows are never updated or deleted by this system.

use hostwatch_core::sample::Sample;
use hostwatch_core::types::{DbId, Timestamp};

use crate::models::StatsRecord;
use crate::{DbPool, StorageError};

/// Column list for `stats` SELECT queries.
const COLUMNS: &str = "id, date, cpu_temp, load_avg, disk_usage";

/// Column list for `stats` INSERT statements (excludes the rowid `id`).
const INSERT_COLUMNS: &str = "date, cpu_temp, load_avg, disk_usage";

/// Provides query operations for persisted health samples.
pub struct StatsRepo;

impl StatsRepo {
    /// Create the `stats` table if it does not exist.
    ///
    /// Idempotent: safe to call on every run, no-op once the table exists.
    /// The table is never dropped or altered afterwards.
    pub async fn ensure_schema(pool: &DbPool) -> Result<(), StorageError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS stats (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                cpu_temp REAL NOT NULL,
                load_avg REAL NOT NULL,
                disk_usage REAL NOT NULL
            )",
        )
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Append one sample as a `stats` row and return its assigned id.
    ///
    /// Ids are strictly increasing (`AUTOINCREMENT`). Values are stored
    /// with the full precision the provider presented — no re-rounding.
    pub async fn append(pool: &DbPool, sample: &Sample) -> Result<DbId, StorageError> {
        let query = format!("INSERT INTO stats ({INSERT_COLUMNS}) VALUES (?, ?, ?, ?) RETURNING id");
        let id: DbId = sqlx::query_scalar(&query)
            .bind(sample.timestamp.to_rfc3339())
            .bind(sample.cpu_temperature)
            .bind(sample.load_average)
            .bind(sample.disk_usage_percent)
            .fetch_one(pool)
            .await?;
        tracing::debug!(id, "Appended stats row");
        Ok(id)
    }

    /// Fetch a single persisted sample by id.
    pub async fn fetch(pool: &DbPool, id: DbId) -> Result<Option<StatsRecord>, StorageError> {
        let query = format!("SELECT {COLUMNS} FROM stats WHERE id = ?");
        let record = sqlx::query_as::<_, StatsRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(record)
    }

    /// Fetch all samples captured at or after the given time, oldest first.
    pub async fn fetch_since(
        pool: &DbPool,
        since: Timestamp,
    ) -> Result<Vec<StatsRecord>, StorageError> {
        let query = format!("SELECT {COLUMNS} FROM stats WHERE date >= ? ORDER BY id");
        let records = sqlx::query_as::<_, StatsRecord>(&query)
            .bind(since.to_rfc3339())
            .fetch_all(pool)
            .await?;
        Ok(records)
    }
}
