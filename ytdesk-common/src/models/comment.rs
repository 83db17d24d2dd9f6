//! Comment threads, mirroring the YouTube Data API v3 resource shape
//!
//! Kept structurally identical to `commentThread` / `comment` resources so the
//! dashboard can read `snippet.topLevelComment.snippet.textDisplay` the same
//! way it would from the upstream API. Unknown upstream fields are dropped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A top-level comment with its ordered replies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThread {
    pub id: String,
    pub snippet: CommentThreadSnippet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replies: Option<CommentReplies>,
}

impl CommentThread {
    pub fn top_level(&self) -> &Comment {
        &self.snippet.top_level_comment
    }

    /// Replies in upstream order (empty when the thread has none)
    pub fn reply_list(&self) -> &[Comment] {
        self.replies
            .as_ref()
            .map(|r| r.comments.as_slice())
            .unwrap_or(&[])
    }

    /// True if `comment_id` is the top-level comment or one of the replies
    pub fn contains(&self, comment_id: &str) -> bool {
        self.top_level().id == comment_id || self.reply_list().iter().any(|c| c.id == comment_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    #[serde(default)]
    pub video_id: String,
    pub top_level_comment: Comment,
    #[serde(default)]
    pub total_reply_count: u32,
    #[serde(default)]
    pub can_reply: bool,
    #[serde(default)]
    pub is_public: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentReplies {
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub snippet: CommentSnippet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnippet {
    #[serde(default)]
    pub author_display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_profile_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_channel_url: Option<String>,
    #[serde(default)]
    pub text_display: String,
    #[serde(default)]
    pub text_original: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub like_count: u64,
    pub published_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// POST /api/videos/:id/comments and .../replies body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentText {
    pub text: String,
}

impl CommentText {
    /// Trimmed text, rejecting blank input
    pub fn validated(self) -> crate::Result<String> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(crate::Error::Validation("Comment text is required".to_string()));
        }
        Ok(text.to_string())
    }
}
