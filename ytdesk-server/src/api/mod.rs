//! HTTP API handlers

pub mod comments;
pub mod event_logs;
pub mod health;
pub mod notes;
pub mod videos;

pub use comments::comment_routes;
pub use event_logs::event_log_routes;
pub use health::health_routes;
pub use notes::note_routes;
pub use videos::video_routes;

use ytdesk_common::models::NewEventLog;

use crate::AppState;

/// Append an activity entry after a successful mutation
///
/// A failed write is logged and swallowed; the mutation it describes has
/// already happened.
pub(crate) async fn record_event(
    state: &AppState,
    video_id: Option<&str>,
    action: &str,
    detail: Option<String>,
) {
    let entry = NewEventLog {
        video_id: video_id.map(str::to_string),
        action: action.to_string(),
        detail,
    };

    if let Err(e) = crate::db::event_logs::insert(&state.db, entry).await {
        tracing::warn!(action, video_id, error = %e, "Failed to record event log");
    }
}
