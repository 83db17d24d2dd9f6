//! Video metadata endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Json, Router,
};
use ytdesk_common::api::Envelope;
use ytdesk_common::models::event_log::actions;
use ytdesk_common::models::{VideoDetails, VideoUpdate};

use super::record_event;
use crate::{ApiResult, AppState};

/// GET /api/videos/:id
pub async fn get_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> ApiResult<Json<Envelope<VideoDetails>>> {
    let details = state.youtube.video(&video_id).await?;
    Ok(Json(Envelope::ok(details)))
}

/// PUT /api/videos/:id
///
/// Body: `{ title?, description? }`. Returns the refreshed metadata.
pub async fn update_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    payload: Result<Json<VideoUpdate>, JsonRejection>,
) -> ApiResult<Json<Envelope<VideoDetails>>> {
    let Json(update) = payload?;
    let update = update.validated()?;

    let details = state.youtube.update_video(&video_id, update).await?;

    record_event(
        &state,
        Some(&video_id),
        actions::VIDEO_UPDATED,
        Some(details.title.clone()),
    )
    .await;

    Ok(Json(Envelope::ok_with_message(details, "Video updated")))
}

pub fn video_routes() -> Router<AppState> {
    Router::new().route("/api/videos/:id", get(get_video).put(update_video))
}
