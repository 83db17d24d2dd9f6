//! Shared fixtures for ytdesk-server integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use chrono::Utc;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use ytdesk_common::models::{
    Comment, CommentReplies, CommentSnippet, CommentThread, CommentThreadSnippet, VideoDetails,
    VideoUpdate,
};
use ytdesk_common::{Error, Result};
use ytdesk_server::{build_router, AppState, VideoPlatform};

pub const VIDEO_ID: &str = "dQw4w9WgXcQ";

/// In-memory stand-in for the YouTube Data API
#[derive(Default)]
pub struct FakePlatform {
    videos: Mutex<HashMap<String, VideoDetails>>,
    threads: Mutex<HashMap<String, Vec<CommentThread>>>,
    failure: Mutex<Option<(u16, String)>>,
    next_id: AtomicU32,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_video(self, video_id: &str) -> Self {
        self.videos
            .lock()
            .unwrap()
            .insert(video_id.to_string(), sample_video(video_id));
        self
    }

    /// Make every subsequent call fail with this upstream status
    pub fn fail_with(&self, status: u16, message: &str) {
        *self.failure.lock().unwrap() = Some((status, message.to_string()));
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn thread_count(&self, video_id: &str) -> usize {
        self.threads
            .lock()
            .unwrap()
            .get(video_id)
            .map_or(0, Vec::len)
    }

    fn check(&self) -> Result<()> {
        match self.failure.lock().unwrap().clone() {
            Some((status, message)) => Err(Error::remote(status, message)),
            None => Ok(()),
        }
    }

    fn fresh_id(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl VideoPlatform for FakePlatform {
    async fn video(&self, video_id: &str) -> Result<VideoDetails> {
        self.check()?;
        self.videos
            .lock()
            .unwrap()
            .get(video_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Video not found: {}", video_id)))
    }

    async fn update_video(&self, video_id: &str, update: VideoUpdate) -> Result<VideoDetails> {
        self.check()?;
        let mut videos = self.videos.lock().unwrap();
        let video = videos
            .get_mut(video_id)
            .ok_or_else(|| Error::NotFound(format!("Video not found: {}", video_id)))?;
        if let Some(title) = update.title {
            video.title = title;
        }
        if let Some(description) = update.description {
            video.description = description;
        }
        Ok(video.clone())
    }

    async fn comment_threads(&self, video_id: &str) -> Result<Vec<CommentThread>> {
        self.check()?;
        Ok(self
            .threads
            .lock()
            .unwrap()
            .get(video_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_comment(&self, video_id: &str, text: &str) -> Result<CommentThread> {
        self.check()?;
        let id = self.fresh_id("Ugz");
        let thread = CommentThread {
            id: id.clone(),
            snippet: CommentThreadSnippet {
                video_id: video_id.to_string(),
                top_level_comment: comment(&id, text, None),
                total_reply_count: 0,
                can_reply: true,
                is_public: true,
            },
            replies: None,
        };
        self.threads
            .lock()
            .unwrap()
            .entry(video_id.to_string())
            .or_default()
            .insert(0, thread.clone());
        Ok(thread)
    }

    async fn reply_to_comment(&self, parent_id: &str, text: &str) -> Result<Comment> {
        self.check()?;
        let mut threads = self.threads.lock().unwrap();
        let thread = threads
            .values_mut()
            .flatten()
            .find(|t| t.id == parent_id)
            .ok_or_else(|| Error::NotFound("The comment identified by parentId could not be found.".to_string()))?;

        let reply = comment(
            &format!("{}.{}", parent_id, self.fresh_id("r")),
            text,
            Some(parent_id),
        );
        thread
            .replies
            .get_or_insert_with(CommentReplies::default)
            .comments
            .push(reply.clone());
        thread.snippet.total_reply_count += 1;
        Ok(reply)
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<()> {
        self.check()?;
        let mut threads = self.threads.lock().unwrap();
        for list in threads.values_mut() {
            if let Some(pos) = list.iter().position(|t| t.id == comment_id) {
                list.remove(pos);
                return Ok(());
            }
            for thread in list.iter_mut() {
                if let Some(replies) = thread.replies.as_mut() {
                    if let Some(pos) = replies.comments.iter().position(|c| c.id == comment_id) {
                        replies.comments.remove(pos);
                        thread.snippet.total_reply_count -= 1;
                        return Ok(());
                    }
                }
            }
        }
        Err(Error::NotFound("The comment could not be found.".to_string()))
    }
}

pub fn sample_video(video_id: &str) -> VideoDetails {
    VideoDetails {
        youtube_id: video_id.to_string(),
        title: "Never Gonna Give You Up".to_string(),
        description: "The official video".to_string(),
        channel_id: "UCuAXFkgsw1L7xaCfnd5JJOw".to_string(),
        channel_title: "Rick Astley".to_string(),
        thumbnail_url: None,
        published_at: None,
        category_id: Some("10".to_string()),
        tags: Vec::new(),
        privacy_status: Some("public".to_string()),
        view_count: Some(1),
        like_count: Some(1),
        comment_count: Some(0),
    }
}

pub fn comment(id: &str, text: &str, parent_id: Option<&str>) -> Comment {
    Comment {
        id: id.to_string(),
        snippet: CommentSnippet {
            author_display_name: "Channel Owner".to_string(),
            author_profile_image_url: None,
            author_channel_url: None,
            text_display: text.to_string(),
            text_original: text.to_string(),
            parent_id: parent_id.map(str::to_string),
            like_count: 0,
            published_at: Utc::now(),
            updated_at: None,
        },
    }
}

/// Single-connection in-memory database with tables created
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    ytdesk_server::db::init_tables(&pool)
        .await
        .expect("create tables");
    pool
}

/// Router over an in-memory store and the given platform
pub async fn setup_app(platform: Arc<FakePlatform>) -> (axum::Router, SqlitePool) {
    let pool = memory_pool().await;
    let state = AppState::new(pool.clone(), platform);
    let origins = vec![
        "http://localhost:3000".to_string(),
        "https://*.vercel.app".to_string(),
    ];
    (build_router(state, &origins), pool)
}

pub fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}
