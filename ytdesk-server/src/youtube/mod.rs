//! YouTube Data API access
//!
//! Handlers talk to YouTube only through [`VideoPlatform`], so tests can swap
//! in a scripted platform without any network.

pub mod auth;
pub mod client;
pub mod wire;

use async_trait::async_trait;
use ytdesk_common::models::{Comment, CommentThread, VideoDetails, VideoUpdate};
use ytdesk_common::Result;

pub use auth::{Credentials, RefreshCredentials, TokenSource};
pub use client::{YouTubeClient, YouTubeSettings};

/// Remote video platform operations used by the dashboard
///
/// Every method is a single request/response against the platform. Nothing
/// is cached: callers re-list comment threads after each mutation.
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    /// Video metadata; `NotFound` when the identifier matches no video
    async fn video(&self, video_id: &str) -> Result<VideoDetails>;

    /// Change title and/or description, returning the refreshed metadata
    async fn update_video(&self, video_id: &str, update: VideoUpdate) -> Result<VideoDetails>;

    /// Comment threads (top-level comment plus replies) for a video
    async fn comment_threads(&self, video_id: &str) -> Result<Vec<CommentThread>>;

    /// Post a new top-level comment
    async fn add_comment(&self, video_id: &str, text: &str) -> Result<CommentThread>;

    /// Reply to an existing top-level comment
    async fn reply_to_comment(&self, parent_id: &str, text: &str) -> Result<Comment>;

    /// Delete a comment or reply
    async fn delete_comment(&self, comment_id: &str) -> Result<()>;
}
