//! SQLite note and event-log store

pub mod event_logs;
pub mod notes;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::info;
use ytdesk_common::{Error, Result};

/// Open (creating if needed) the database at `database_url` and ensure tables exist
pub async fn init_database_pool(database_url: &str) -> Result<SqlitePool> {
    if let Some(path) = file_path_of(database_url) {
        if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    // WAL lets readers proceed alongside the single writer
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;
    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    init_tables(&pool).await?;

    info!("Opened database: {}", database_url);
    Ok(pool)
}

/// Create tables and indexes (idempotent)
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS notes (
            id TEXT PRIMARY KEY,
            video_id TEXT NOT NULL,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            category TEXT NOT NULL DEFAULT 'general',
            priority TEXT NOT NULL DEFAULT 'medium',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_notes_video_id ON notes(video_id)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS event_logs (
            id TEXT PRIMARY KEY,
            video_id TEXT,
            action TEXT NOT NULL,
            detail TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_event_logs_video_id ON event_logs(video_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Filesystem path named by a `sqlite://` URL, if any
fn file_path_of(database_url: &str) -> Option<&str> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path.starts_with(":memory:") {
        None
    } else {
        Some(path)
    }
}

/// Current time at the precision stored in the database
pub(crate) fn now() -> DateTime<Utc> {
    use chrono::SubsecRound;
    Utc::now().trunc_subsecs(6)
}

pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Internal(format!("Invalid stored timestamp {:?}: {}", raw, e)))
}

#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    init_tables(&pool).await.unwrap();
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_path_of() {
        assert_eq!(
            file_path_of("sqlite:///var/lib/ytdesk/ytdesk.db?mode=rwc"),
            Some("/var/lib/ytdesk/ytdesk.db")
        );
        assert_eq!(file_path_of("sqlite://ytdesk.db"), Some("ytdesk.db"));
        assert_eq!(file_path_of("sqlite::memory:"), None);
        assert_eq!(file_path_of("postgres://localhost/db"), None);
    }

    #[test]
    fn test_timestamp_round_trip_is_exact() {
        let ts = now();
        assert_eq!(parse_timestamp(&format_timestamp(&ts)).unwrap(), ts);
    }

    #[tokio::test]
    async fn test_file_database_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ytdesk.db");
        let url = format!("sqlite://{}?mode=rwc", path.display());

        let pool = init_database_pool(&url).await.unwrap();
        assert!(path.exists());

        // Second init against the same file is a no-op
        init_tables(&pool).await.unwrap();
    }
}
