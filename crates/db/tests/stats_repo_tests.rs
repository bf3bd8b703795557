//! Integration tests for the stats store.
//!
//! Each `#[sqlx::test]` runs against a fresh SQLite database. The schema
//! is created lazily by the repository itself, so tests exercise the same
//! bootstrap path as a real run.

use chrono::{Duration, Utc};
use sqlx::SqlitePool;

use hostwatch_core::sample::Sample;
use hostwatch_db::repositories::StatsRepo;

fn make_sample(cpu: f64, load: f64, disk: f64) -> Sample {
    Sample {
        timestamp: Utc::now(),
        cpu_temperature: cpu,
        load_average: load,
        disk_usage_percent: disk,
        cpu_exceeded: false,
        load_exceeded: false,
        disk_exceeded: false,
    }
}

#[sqlx::test]
async fn ensure_schema_is_idempotent(pool: SqlitePool) {
    for _ in 0..3 {
        StatsRepo::ensure_schema(&pool).await.unwrap();
    }

    // Exactly one `stats` table exists.
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'stats'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 1);

    // And the table is usable after repeated bootstrap.
    StatsRepo::append(&pool, &make_sample(45.0, 0.5, 60.0))
        .await
        .unwrap();
}

#[sqlx::test]
async fn append_round_trips_all_four_fields(pool: SqlitePool) {
    StatsRepo::ensure_schema(&pool).await.unwrap();

    let sample = make_sample(45.678, 0.51, 60.0);
    let id = StatsRepo::append(&pool, &sample).await.unwrap();

    let record = StatsRepo::fetch(&pool, id).await.unwrap().unwrap();
    assert_eq!(record.id, id);
    assert_eq!(record.date, sample.timestamp.to_rfc3339());
    assert_eq!(record.cpu_temp, 45.678);
    assert_eq!(record.load_avg, 0.51);
    assert_eq!(record.disk_usage, 60.0);
}

#[sqlx::test]
async fn flags_are_not_persisted(pool: SqlitePool) {
    StatsRepo::ensure_schema(&pool).await.unwrap();

    let mut sample = make_sample(95.0, 0.5, 60.0);
    sample.cpu_exceeded = true;
    let id = StatsRepo::append(&pool, &sample).await.unwrap();

    // The stored row carries raw metrics only; the schema has no flag
    // columns at all.
    let columns: Vec<String> =
        sqlx::query_scalar("SELECT name FROM pragma_table_info('stats') ORDER BY cid")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(columns, vec!["id", "date", "cpu_temp", "load_avg", "disk_usage"]);

    let record = StatsRepo::fetch(&pool, id).await.unwrap().unwrap();
    assert_eq!(record.cpu_temp, 95.0);
}

#[sqlx::test]
async fn ids_are_strictly_increasing(pool: SqlitePool) {
    StatsRepo::ensure_schema(&pool).await.unwrap();

    let mut last = 0;
    for i in 0..5 {
        let id = StatsRepo::append(&pool, &make_sample(40.0 + f64::from(i), 0.5, 60.0))
            .await
            .unwrap();
        assert!(id > last, "id {id} should exceed previous {last}");
        last = id;
    }
}

#[sqlx::test]
async fn fetch_since_returns_rows_oldest_first(pool: SqlitePool) {
    StatsRepo::ensure_schema(&pool).await.unwrap();

    let cutoff = Utc::now() - Duration::seconds(1);
    let first = StatsRepo::append(&pool, &make_sample(41.0, 0.4, 55.0))
        .await
        .unwrap();
    let second = StatsRepo::append(&pool, &make_sample(42.0, 0.5, 56.0))
        .await
        .unwrap();

    let records = StatsRepo::fetch_since(&pool, cutoff).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, first);
    assert_eq!(records[1].id, second);

    let none = StatsRepo::fetch_since(&pool, Utc::now() + Duration::hours(1))
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[sqlx::test]
async fn fetch_missing_id_returns_none(pool: SqlitePool) {
    StatsRepo::ensure_schema(&pool).await.unwrap();
    assert!(StatsRepo::fetch(&pool, 9999).await.unwrap().is_none());
}

/// A file-backed store keeps rows across pool lifetimes and keeps
/// assigning increasing ids — the "previous day's rows are never
/// touched" guarantee.
#[tokio::test]
async fn file_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("stats.db").display());

    let first_id = {
        let pool = hostwatch_db::create_pool(&url).await.unwrap();
        StatsRepo::ensure_schema(&pool).await.unwrap();
        let id = StatsRepo::append(&pool, &make_sample(45.0, 0.5, 60.0))
            .await
            .unwrap();
        pool.close().await;
        id
    };

    // Fresh pool, same file: schema bootstrap is a no-op, old row intact.
    let pool = hostwatch_db::create_pool(&url).await.unwrap();
    StatsRepo::ensure_schema(&pool).await.unwrap();
    hostwatch_db::health_check(&pool).await.unwrap();

    let old = StatsRepo::fetch(&pool, first_id).await.unwrap().unwrap();
    assert_eq!(old.cpu_temp, 45.0);

    let second_id = StatsRepo::append(&pool, &make_sample(46.0, 0.6, 61.0))
        .await
        .unwrap();
    assert!(second_id > first_id);
    pool.close().await;
}
