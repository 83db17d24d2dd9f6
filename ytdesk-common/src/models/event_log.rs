//! Activity log entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded dashboard action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLog {
    pub id: String,
    pub video_id: Option<String>,
    pub action: String,
    pub detail: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// POST /api/event-logs body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEventLog {
    #[serde(default)]
    pub video_id: Option<String>,
    pub action: String,
    #[serde(default)]
    pub detail: Option<String>,
}

/// Event-log action names
///
/// The server records all but `VIDEO_VIEWED` on its own after a successful
/// mutation; the dashboard posts `VIDEO_VIEWED` when it opens a video.
pub mod actions {
    pub const NOTE_CREATED: &str = "note_created";
    pub const NOTE_UPDATED: &str = "note_updated";
    pub const NOTE_DELETED: &str = "note_deleted";
    pub const COMMENT_ADDED: &str = "comment_added";
    pub const COMMENT_REPLIED: &str = "comment_replied";
    pub const COMMENT_DELETED: &str = "comment_deleted";
    pub const VIDEO_UPDATED: &str = "video_updated";
    pub const VIDEO_VIEWED: &str = "video_viewed";
}
