//! Stats-store entity models.

use serde::Serialize;
use sqlx::FromRow;

use hostwatch_core::types::DbId;

/// A persisted health sample, as read back from the `stats` table.
///
/// The exceeded flags are deliberately not persisted: alerting is
/// evaluated at capture time only and is not reconstructable from
/// stored rows.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct StatsRecord {
    pub id: DbId,
    /// RFC 3339 capture timestamp, stored as text.
    pub date: String,
    pub cpu_temp: f64,
    pub load_avg: f64,
    pub disk_usage: f64,
}
