//! Note persistence

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;
use ytdesk_common::models::{Note, NoteDraft, NoteUpdate};
use ytdesk_common::{Error, Result};

use super::{format_timestamp, now, parse_timestamp};

fn note_from_row(row: &SqliteRow) -> Result<Note> {
    let category: String = row.get("category");
    let priority: String = row.get("priority");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(Note {
        id: row.get("id"),
        video_id: row.get("video_id"),
        title: row.get("title"),
        content: row.get("content"),
        category: category.parse()?,
        priority: priority.parse()?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

/// Notes for one video, in creation order
pub async fn list_for_video(pool: &SqlitePool, video_id: &str) -> Result<Vec<Note>> {
    let rows = sqlx::query(
        r#"
        SELECT id, video_id, title, content, category, priority, created_at, updated_at
        FROM notes
        WHERE video_id = ?
        ORDER BY created_at ASC, rowid ASC
        "#,
    )
    .bind(video_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(note_from_row).collect()
}

/// Note by id; `NotFound` when absent
pub async fn get(pool: &SqlitePool, id: &str) -> Result<Note> {
    let row = sqlx::query(
        r#"
        SELECT id, video_id, title, content, category, priority, created_at, updated_at
        FROM notes
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => note_from_row(&row),
        None => Err(Error::NotFound("Note not found".to_string())),
    }
}

/// Persist a validated draft
pub async fn insert(pool: &SqlitePool, draft: NoteDraft) -> Result<Note> {
    let created_at = now();
    let note = Note {
        id: Uuid::new_v4().to_string(),
        video_id: draft.video_id,
        title: draft.title,
        content: draft.content,
        category: draft.category,
        priority: draft.priority,
        created_at,
        updated_at: created_at,
    };

    sqlx::query(
        r#"
        INSERT INTO notes (id, video_id, title, content, category, priority, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&note.id)
    .bind(&note.video_id)
    .bind(&note.title)
    .bind(&note.content)
    .bind(note.category.as_str())
    .bind(note.priority.as_str())
    .bind(format_timestamp(&note.created_at))
    .bind(format_timestamp(&note.updated_at))
    .execute(pool)
    .await?;

    Ok(note)
}

/// Apply a validated update and return the stored note
pub async fn update(pool: &SqlitePool, id: &str, changes: NoteUpdate) -> Result<Note> {
    let mut note = get(pool, id).await?;
    changes.apply(&mut note, now());

    let result = sqlx::query(
        r#"
        UPDATE notes
        SET title = ?, content = ?, category = ?, priority = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&note.title)
    .bind(&note.content)
    .bind(note.category.as_str())
    .bind(note.priority.as_str())
    .bind(format_timestamp(&note.updated_at))
    .bind(&note.id)
    .execute(pool)
    .await?;

    // Deleted between the read and the write
    if result.rows_affected() == 0 {
        return Err(Error::NotFound("Note not found".to_string()));
    }

    Ok(note)
}

/// Delete a note, returning what was removed
pub async fn delete(pool: &SqlitePool, id: &str) -> Result<Note> {
    let note = get(pool, id).await?;

    let result = sqlx::query("DELETE FROM notes WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound("Note not found".to_string()));
    }

    Ok(note)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;
    use ytdesk_common::models::{NoteCategory, NotePriority};

    fn draft(video_id: &str, title: &str) -> NoteDraft {
        NoteDraft {
            video_id: video_id.to_string(),
            title: title.to_string(),
            content: "content".to_string(),
            category: NoteCategory::Ideas,
            priority: NotePriority::High,
        }
    }

    #[tokio::test]
    async fn test_insert_then_list() {
        let pool = memory_pool().await;
        let created = insert(&pool, draft("dQw4w9WgXcQ", "Intro")).await.unwrap();

        let notes = list_for_video(&pool, "dQw4w9WgXcQ").await.unwrap();
        assert_eq!(notes, vec![created]);
    }

    #[tokio::test]
    async fn test_list_is_scoped_and_ordered() {
        let pool = memory_pool().await;
        let first = insert(&pool, draft("aaaaaaaaaaa", "first")).await.unwrap();
        insert(&pool, draft("bbbbbbbbbbb", "other")).await.unwrap();
        let second = insert(&pool, draft("aaaaaaaaaaa", "second")).await.unwrap();

        let notes = list_for_video(&pool, "aaaaaaaaaaa").await.unwrap();
        let ids: Vec<_> = notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec![first.id.as_str(), second.id.as_str()]);
    }

    #[tokio::test]
    async fn test_update_changes_only_given_fields() {
        let pool = memory_pool().await;
        let created = insert(&pool, draft("dQw4w9WgXcQ", "Intro")).await.unwrap();

        let updated = update(
            &pool,
            &created.id,
            NoteUpdate {
                priority: Some(NotePriority::Low),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.title, "Intro");
        assert_eq!(updated.priority, NotePriority::Low);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(get(&pool, &created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_missing_note_is_not_found() {
        let pool = memory_pool().await;
        assert!(matches!(get(&pool, "nope").await, Err(Error::NotFound(_))));
        assert!(matches!(
            update(&pool, "nope", NoteUpdate::default()).await,
            Err(Error::NotFound(_))
        ));
        assert!(matches!(delete(&pool, "nope").await, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_note() {
        let pool = memory_pool().await;
        let created = insert(&pool, draft("dQw4w9WgXcQ", "Intro")).await.unwrap();

        let removed = delete(&pool, &created.id).await.unwrap();
        assert_eq!(removed.id, created.id);
        assert!(list_for_video(&pool, "dQw4w9WgXcQ").await.unwrap().is_empty());
    }
}
