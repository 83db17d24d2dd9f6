//! Note endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use ytdesk_common::api::Envelope;
use ytdesk_common::models::event_log::actions;
use ytdesk_common::models::{Note, NoteDraft, NoteUpdate};

use super::record_event;
use crate::db;
use crate::{ApiError, ApiResult, AppState};

/// GET /api/notes query
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesQuery {
    pub video_id: Option<String>,
}

/// GET /api/notes?videoId=
///
/// Notes for one video in creation order.
pub async fn list_notes(
    State(state): State<AppState>,
    query: Result<Query<NotesQuery>, QueryRejection>,
) -> ApiResult<Json<Envelope<Vec<Note>>>> {
    let Query(query) = query?;
    let video_id = query
        .video_id
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::Validation("Video ID is required".to_string()))?;

    let notes = db::notes::list_for_video(&state.db, &video_id).await?;
    Ok(Json(Envelope::ok(notes)))
}

/// GET /api/notes/:id
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<Note>>> {
    let note = db::notes::get(&state.db, &id).await?;
    Ok(Json(Envelope::ok(note)))
}

/// POST /api/notes
pub async fn create_note(
    State(state): State<AppState>,
    payload: Result<Json<NoteDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<Note>>)> {
    let Json(draft) = payload?;
    let draft = draft.validated()?;

    let note = db::notes::insert(&state.db, draft).await?;
    tracing::info!(note_id = %note.id, video_id = %note.video_id, "Note created");

    record_event(
        &state,
        Some(&note.video_id),
        actions::NOTE_CREATED,
        Some(note.title.clone()),
    )
    .await;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok_with_message(note, "Note created")),
    ))
}

/// PUT /api/notes/:id
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NoteUpdate>, JsonRejection>,
) -> ApiResult<Json<Envelope<Note>>> {
    let Json(changes) = payload?;
    if changes.is_empty() {
        return Err(ApiError::Validation("No fields to update".to_string()));
    }
    let changes = changes.validated()?;

    let note = db::notes::update(&state.db, &id, changes).await?;
    tracing::info!(note_id = %note.id, "Note updated");

    record_event(
        &state,
        Some(&note.video_id),
        actions::NOTE_UPDATED,
        Some(note.title.clone()),
    )
    .await;

    Ok(Json(Envelope::ok_with_message(note, "Note updated")))
}

/// DELETE /api/notes/:id
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<()>>> {
    let note = db::notes::delete(&state.db, &id).await?;
    tracing::info!(note_id = %note.id, "Note deleted");

    record_event(&state, Some(&note.video_id), actions::NOTE_DELETED, Some(note.title)).await;

    Ok(Json(Envelope::done("Note deleted")))
}

pub fn note_routes() -> Router<AppState> {
    Router::new()
        .route("/api/notes", get(list_notes).post(create_note))
        .route(
            "/api/notes/:id",
            get(get_note).put(update_note).delete(delete_note),
        )
}
