//! Event log persistence

use sqlx::{Row, SqlitePool};
use uuid::Uuid;
use ytdesk_common::models::{EventLog, NewEventLog};
use ytdesk_common::Result;

use super::{format_timestamp, now, parse_timestamp};

/// Default number of entries returned by a listing
pub const DEFAULT_LIMIT: u32 = 50;

/// Upper bound on a single listing
pub const MAX_LIMIT: u32 = 500;

pub async fn insert(pool: &SqlitePool, entry: NewEventLog) -> Result<EventLog> {
    let log = EventLog {
        id: Uuid::new_v4().to_string(),
        video_id: entry.video_id,
        action: entry.action,
        detail: entry.detail,
        created_at: now(),
    };

    sqlx::query(
        "INSERT INTO event_logs (id, video_id, action, detail, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&log.id)
    .bind(&log.video_id)
    .bind(&log.action)
    .bind(&log.detail)
    .bind(format_timestamp(&log.created_at))
    .execute(pool)
    .await?;

    Ok(log)
}

/// Newest entries first, optionally scoped to one video
pub async fn list(pool: &SqlitePool, video_id: Option<&str>, limit: u32) -> Result<Vec<EventLog>> {
    let limit = limit.clamp(1, MAX_LIMIT) as i64;

    let rows = match video_id {
        Some(video_id) => {
            sqlx::query(
                r#"
                SELECT id, video_id, action, detail, created_at
                FROM event_logs
                WHERE video_id = ?
                ORDER BY created_at DESC, rowid DESC
                LIMIT ?
                "#,
            )
            .bind(video_id)
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query(
                r#"
                SELECT id, video_id, action, detail, created_at
                FROM event_logs
                ORDER BY created_at DESC, rowid DESC
                LIMIT ?
                "#,
            )
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
    };

    rows.iter()
        .map(|row| {
            let created_at: String = row.get("created_at");
            Ok(EventLog {
                id: row.get("id"),
                video_id: row.get("video_id"),
                action: row.get("action"),
                detail: row.get("detail"),
                created_at: parse_timestamp(&created_at)?,
            })
        })
        .collect()
}
