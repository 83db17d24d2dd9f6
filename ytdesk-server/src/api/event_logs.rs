//! Activity log endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use ytdesk_common::api::Envelope;
use ytdesk_common::models::{EventLog, NewEventLog};

use crate::db::{self, event_logs::DEFAULT_LIMIT};
use crate::{ApiError, ApiResult, AppState};

/// GET /api/event-logs query
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLogQuery {
    pub video_id: Option<String>,
    pub limit: Option<u32>,
}

/// GET /api/event-logs?videoId=&limit=
///
/// Newest first; `limit` defaults to 50 and is capped at 500.
pub async fn list_event_logs(
    State(state): State<AppState>,
    query: Result<Query<EventLogQuery>, QueryRejection>,
) -> ApiResult<Json<Envelope<Vec<EventLog>>>> {
    let Query(query) = query?;
    let video_id = query.video_id.as_deref().map(str::trim).filter(|v| !v.is_empty());

    let logs = db::event_logs::list(&state.db, video_id, query.limit.unwrap_or(DEFAULT_LIMIT)).await?;
    Ok(Json(Envelope::ok(logs)))
}

/// POST /api/event-logs
///
/// Records a client-side event.
pub async fn create_event_log(
    State(state): State<AppState>,
    payload: Result<Json<NewEventLog>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<EventLog>>)> {
    let Json(mut entry) = payload?;
    entry.action = entry.action.trim().to_string();
    if entry.action.is_empty() {
        return Err(ApiError::Validation("Action is required".to_string()));
    }

    let log = db::event_logs::insert(&state.db, entry).await?;
    Ok((StatusCode::CREATED, Json(Envelope::ok(log))))
}

pub fn event_log_routes() -> Router<AppState> {
    Router::new().route("/api/event-logs", get(list_event_logs).post(create_event_log))
}
