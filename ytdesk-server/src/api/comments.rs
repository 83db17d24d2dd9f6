//! Comment moderation endpoints
//!
//! Thin pass-through to YouTube. Clients re-list threads after each mutation.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use ytdesk_common::api::Envelope;
use ytdesk_common::models::event_log::actions;
use ytdesk_common::models::{Comment, CommentText, CommentThread};

use super::record_event;
use crate::{ApiResult, AppState};

/// GET /api/videos/:id/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> ApiResult<Json<Envelope<Vec<CommentThread>>>> {
    let threads = state.youtube.comment_threads(&video_id).await?;
    Ok(Json(Envelope::ok(threads)))
}

/// POST /api/videos/:id/comments
pub async fn add_comment(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    payload: Result<Json<CommentText>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<CommentThread>>)> {
    let Json(body) = payload?;
    let text = body.validated()?;

    let thread = state.youtube.add_comment(&video_id, &text).await?;

    record_event(&state, Some(&video_id), actions::COMMENT_ADDED, Some(thread.id.clone())).await;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok_with_message(thread, "Comment added")),
    ))
}

/// POST /api/videos/:id/comments/:comment_id/replies
pub async fn reply_to_comment(
    State(state): State<AppState>,
    Path((video_id, comment_id)): Path<(String, String)>,
    payload: Result<Json<CommentText>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<Comment>>)> {
    let Json(body) = payload?;
    let text = body.validated()?;

    let reply = state.youtube.reply_to_comment(&comment_id, &text).await?;

    record_event(
        &state,
        Some(&video_id),
        actions::COMMENT_REPLIED,
        Some(format!("{} -> {}", comment_id, reply.id)),
    )
    .await;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok_with_message(reply, "Reply added")),
    ))
}

/// DELETE /api/videos/:id/comments/:comment_id
pub async fn delete_comment(
    State(state): State<AppState>,
    Path((video_id, comment_id)): Path<(String, String)>,
) -> ApiResult<Json<Envelope<()>>> {
    state.youtube.delete_comment(&comment_id).await?;

    record_event(&state, Some(&video_id), actions::COMMENT_DELETED, Some(comment_id)).await;

    Ok(Json(Envelope::done("Comment deleted")))
}

pub fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/api/videos/:id/comments", get(list_comments).post(add_comment))
        .route(
            "/api/videos/:id/comments/:comment_id/replies",
            post(reply_to_comment),
        )
        .route("/api/videos/:id/comments/:comment_id", delete(delete_comment))
}
