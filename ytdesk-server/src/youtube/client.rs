//! YouTube Data API v3 client
//!
//! Reads authenticate with the API key (falling back to the bearer token when
//! no key is configured); writes always use an OAuth bearer token.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use ytdesk_common::config::DEFAULT_YOUTUBE_BASE_URL;
use ytdesk_common::models::{Comment, CommentThread, VideoDetails, VideoUpdate};
use ytdesk_common::{Error, Result};

use super::auth::{Credentials, TokenSource, GOOGLE_TOKEN_URL};
use super::wire::{ErrorResponse, ListResponse, VideoResource};
use super::VideoPlatform;

const USER_AGENT: &str = concat!("ytdesk/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Comment threads fetched per listing (YouTube's maximum page size)
const COMMENT_PAGE_SIZE: u32 = 100;

/// Connection settings for [`YouTubeClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YouTubeSettings {
    pub api_key: Option<String>,
    pub credentials: Credentials,
    pub base_url: String,
    pub token_url: String,
}

impl Default for YouTubeSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            credentials: Credentials::None,
            base_url: DEFAULT_YOUTUBE_BASE_URL.to_string(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
        }
    }
}

/// YouTube Data API client
pub struct YouTubeClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    tokens: TokenSource,
}

impl YouTubeClient {
    pub fn new(settings: YouTubeSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Internal(format!("HTTP client build failed: {}", e)))?;

        let tokens = TokenSource::new(http_client.clone(), settings.credentials, settings.token_url);

        Ok(Self {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key,
            tokens,
        })
    }

    pub fn can_write(&self) -> bool {
        self.tokens.can_write()
    }

    fn url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }

    /// Request authorized for reading
    async fn read_request(&self, resource: &str) -> Result<RequestBuilder> {
        let request = self.http_client.get(self.url(resource));
        match &self.api_key {
            Some(key) => Ok(request.query(&[("key", key.as_str())])),
            None if self.tokens.can_write() => Ok(request.bearer_auth(self.tokens.bearer().await?)),
            None => Err(Error::remote(
                401,
                "YouTube API key is not configured (set YOUTUBE_API_KEY)",
            )),
        }
    }

    /// Request authorized for writing
    async fn write_request(&self, method: Method, resource: &str) -> Result<RequestBuilder> {
        let token = self.tokens.bearer().await?;
        Ok(self
            .http_client
            .request(method, self.url(resource))
            .bearer_auth(token))
    }

    async fn send(&self, request: RequestBuilder, operation: &'static str) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(operation, error = %e, "YouTube request failed");
            Error::remote(None, format!("YouTube request failed: {}", e))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let (message, reason) = match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(err) => {
                let reason = err.error.reason().map(str::to_string);
                (err.error.message, reason)
            }
            Err(_) if body.trim().is_empty() => (
                status.canonical_reason().unwrap_or("Unknown error").to_string(),
                None,
            ),
            Err(_) => (body, None),
        };

        tracing::warn!(
            operation,
            status = status.as_u16(),
            reason = reason.as_deref().unwrap_or("-"),
            "YouTube API returned an error"
        );

        // commentNotFound, videoNotFound, parentId unknown
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(message));
        }
        Err(Error::remote(status.as_u16(), message))
    }

    async fn json<T: DeserializeOwned>(response: Response, operation: &'static str) -> Result<T> {
        response
            .json()
            .await
            .map_err(|e| Error::remote(None, format!("YouTube {} response parse error: {}", operation, e)))
    }

    async fn video_resource(&self, video_id: &str, parts: &str) -> Result<VideoResource> {
        let request = self
            .read_request("videos")
            .await?
            .query(&[("part", parts), ("id", video_id)]);
        let response = self.send(request, "videos.list").await?;
        let list: ListResponse<VideoResource> = Self::json(response, "videos.list").await?;

        list.items
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("Video not found: {}", video_id)))
    }
}

#[async_trait]
impl VideoPlatform for YouTubeClient {
    async fn video(&self, video_id: &str) -> Result<VideoDetails> {
        let resource = self.video_resource(video_id, "snippet,statistics,status").await?;
        tracing::debug!(video_id, "Fetched video metadata");
        Ok(resource.into_details())
    }

    async fn update_video(&self, video_id: &str, update: VideoUpdate) -> Result<VideoDetails> {
        // videos.update replaces the whole snippet, so start from the current one
        let current = self.video_resource(video_id, "snippet").await?;
        let snippet = current.snippet.unwrap_or_default();

        let mut body = json!({
            "id": video_id,
            "snippet": {
                "title": update.title.unwrap_or(snippet.title),
                "description": update.description.unwrap_or(snippet.description),
                "categoryId": snippet.category_id.unwrap_or_else(|| "22".to_string()),
            }
        });
        if let Some(tags) = snippet.tags {
            body["snippet"]["tags"] = json!(tags);
        }
        if let Some(lang) = snippet.default_language {
            body["snippet"]["defaultLanguage"] = json!(lang);
        }

        let request = self
            .write_request(Method::PUT, "videos")
            .await?
            .query(&[("part", "snippet")])
            .json(&body);
        self.send(request, "videos.update").await?;

        tracing::info!(video_id, "Video snippet updated");
        self.video(video_id).await
    }

    async fn comment_threads(&self, video_id: &str) -> Result<Vec<CommentThread>> {
        let page_size = COMMENT_PAGE_SIZE.to_string();
        let request = self.read_request("commentThreads").await?.query(&[
            ("part", "snippet,replies"),
            ("videoId", video_id),
            ("maxResults", page_size.as_str()),
            ("order", "time"),
            ("textFormat", "plainText"),
        ]);
        let response = self.send(request, "commentThreads.list").await?;
        let list: ListResponse<CommentThread> = Self::json(response, "commentThreads.list").await?;

        tracing::debug!(video_id, threads = list.items.len(), "Fetched comment threads");
        Ok(list.items)
    }

    async fn add_comment(&self, video_id: &str, text: &str) -> Result<CommentThread> {
        let body = json!({
            "snippet": {
                "videoId": video_id,
                "topLevelComment": { "snippet": { "textOriginal": text } }
            }
        });
        let request = self
            .write_request(Method::POST, "commentThreads")
            .await?
            .query(&[("part", "snippet")])
            .json(&body);
        let response = self.send(request, "commentThreads.insert").await?;
        let thread: CommentThread = Self::json(response, "commentThreads.insert").await?;

        tracing::info!(video_id, thread_id = %thread.id, "Comment posted");
        Ok(thread)
    }

    async fn reply_to_comment(&self, parent_id: &str, text: &str) -> Result<Comment> {
        let body = json!({
            "snippet": { "parentId": parent_id, "textOriginal": text }
        });
        let request = self
            .write_request(Method::POST, "comments")
            .await?
            .query(&[("part", "snippet")])
            .json(&body);
        let response = self.send(request, "comments.insert").await?;
        let reply: Comment = Self::json(response, "comments.insert").await?;

        tracing::info!(parent_id, reply_id = %reply.id, "Reply posted");
        Ok(reply)
    }

    async fn delete_comment(&self, comment_id: &str) -> Result<()> {
        let request = self
            .write_request(Method::DELETE, "comments")
            .await?
            .query(&[("id", comment_id)]);
        self.send(request, "comments.delete").await?;

        tracing::info!(comment_id, "Comment deleted");
        Ok(())
    }
}
