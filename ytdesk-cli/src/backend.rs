//! Server access for the dashboard
//!
//! [`DashboardBackend`] is the seam between the coordinator and the REST
//! server; [`HttpBackend`] is the production implementation.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use ytdesk_common::api::{Envelope, ERROR_KIND_HEADER};
use ytdesk_common::models::{
    Comment, CommentThread, EventLog, NewEventLog, Note, NoteDraft, NoteUpdate, VideoDetails,
    VideoUpdate,
};
use ytdesk_common::{Error, Result};

const USER_AGENT: &str = concat!("ytdesk/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Operations the dashboard needs from the server
#[async_trait]
pub trait DashboardBackend: Send + Sync {
    async fn video(&self, video_id: &str) -> Result<VideoDetails>;
    async fn update_video(&self, video_id: &str, update: &VideoUpdate) -> Result<VideoDetails>;

    async fn list_notes(&self, video_id: &str) -> Result<Vec<Note>>;
    async fn create_note(&self, draft: &NoteDraft) -> Result<Note>;
    async fn update_note(&self, note_id: &str, changes: &NoteUpdate) -> Result<Note>;
    async fn delete_note(&self, note_id: &str) -> Result<()>;

    async fn list_comments(&self, video_id: &str) -> Result<Vec<CommentThread>>;
    async fn add_comment(&self, video_id: &str, text: &str) -> Result<CommentThread>;
    async fn reply_to_comment(&self, video_id: &str, comment_id: &str, text: &str) -> Result<Comment>;
    async fn delete_comment(&self, video_id: &str, comment_id: &str) -> Result<()>;

    async fn event_logs(&self, video_id: Option<&str>, limit: u32) -> Result<Vec<EventLog>>;
    async fn record_event(&self, entry: &NewEventLog) -> Result<EventLog>;
}

#[async_trait]
impl<T: DashboardBackend + ?Sized> DashboardBackend for Arc<T> {
    async fn video(&self, video_id: &str) -> Result<VideoDetails> {
        (**self).video(video_id).await
    }
    async fn update_video(&self, video_id: &str, update: &VideoUpdate) -> Result<VideoDetails> {
        (**self).update_video(video_id, update).await
    }
    async fn list_notes(&self, video_id: &str) -> Result<Vec<Note>> {
        (**self).list_notes(video_id).await
    }
    async fn create_note(&self, draft: &NoteDraft) -> Result<Note> {
        (**self).create_note(draft).await
    }
    async fn update_note(&self, note_id: &str, changes: &NoteUpdate) -> Result<Note> {
        (**self).update_note(note_id, changes).await
    }
    async fn delete_note(&self, note_id: &str) -> Result<()> {
        (**self).delete_note(note_id).await
    }
    async fn list_comments(&self, video_id: &str) -> Result<Vec<CommentThread>> {
        (**self).list_comments(video_id).await
    }
    async fn add_comment(&self, video_id: &str, text: &str) -> Result<CommentThread> {
        (**self).add_comment(video_id, text).await
    }
    async fn reply_to_comment(&self, video_id: &str, comment_id: &str, text: &str) -> Result<Comment> {
        (**self).reply_to_comment(video_id, comment_id, text).await
    }
    async fn delete_comment(&self, video_id: &str, comment_id: &str) -> Result<()> {
        (**self).delete_comment(video_id, comment_id).await
    }
    async fn event_logs(&self, video_id: Option<&str>, limit: u32) -> Result<Vec<EventLog>> {
        (**self).event_logs(video_id, limit).await
    }
    async fn record_event(&self, entry: &NewEventLog) -> Result<EventLog> {
        (**self).record_event(entry).await
    }
}

/// REST client for ytdesk-server
pub struct HttpBackend {
    http_client: reqwest::Client,
    base_url: String,
    base: Url,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Internal(format!("HTTP client build failed: {}", e)))?;

        let base_url = base_url.trim_end_matches('/').to_string();
        let base = Url::parse(&base_url)
            .map_err(|e| Error::Config(format!("Invalid server URL {}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(Error::Config(format!("Invalid server URL {}", base_url)));
        }

        Ok(Self {
            http_client,
            base_url,
            base,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL for `segments` under the base, each segment percent-encoded
    ///
    /// Identifiers come from user input verbatim, so `?`, `#` or `/` in them
    /// must stay inside their segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.http_client.request(method, self.endpoint(segments))
    }

    /// Send and unwrap the envelope, keeping `data` optional
    async fn exchange<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Option<T>> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::remote(None, format!("Server unreachable: {}", e)))?;

        let status = response.status();
        let kind = response
            .headers()
            .get(ERROR_KIND_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::remote(status.as_u16(), format!("Read response failed: {}", e)))?;

        let envelope: Envelope<T> = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return Err(Error::remote(
                    status.as_u16(),
                    format!("Unexpected response body: {}", e),
                ))
            }
            // Non-envelope error page (proxy, wrong URL)
            Err(_) => Envelope::error(
                status.canonical_reason().unwrap_or("Request failed").to_string(),
            ),
        };

        if status.is_success() && envelope.success {
            return Ok(envelope.data);
        }

        let message = envelope
            .message
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
        Err(classify(status, kind.as_deref(), message))
    }

    /// Send and require `data` in the envelope
    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        self.exchange(request)
            .await?
            .ok_or_else(|| Error::remote(None, "Response envelope has no data"))
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T> {
        self.fetch(self.request(method, segments).json(body)).await
    }
}

/// Map a failed response back onto the error kinds
fn classify(status: StatusCode, kind: Option<&str>, message: String) -> Error {
    match kind {
        Some("validation") => Error::Validation(message),
        Some("not_found") => Error::NotFound(message),
        Some(_) => Error::remote(status.as_u16(), message),
        None => match status {
            StatusCode::BAD_REQUEST => Error::Validation(message),
            StatusCode::NOT_FOUND => Error::NotFound(message),
            _ => Error::remote(status.as_u16(), message),
        },
    }
}

#[async_trait]
impl DashboardBackend for HttpBackend {
    async fn video(&self, video_id: &str) -> Result<VideoDetails> {
        self.fetch(self.request(Method::GET, &["api", "videos", video_id]))
            .await
    }

    async fn update_video(&self, video_id: &str, update: &VideoUpdate) -> Result<VideoDetails> {
        self.send_json(Method::PUT, &["api", "videos", video_id], update)
            .await
    }

    async fn list_notes(&self, video_id: &str) -> Result<Vec<Note>> {
        self.fetch(
            self.request(Method::GET, &["api", "notes"])
                .query(&[("videoId", video_id)]),
        )
        .await
    }

    async fn create_note(&self, draft: &NoteDraft) -> Result<Note> {
        self.send_json(Method::POST, &["api", "notes"], draft).await
    }

    async fn update_note(&self, note_id: &str, changes: &NoteUpdate) -> Result<Note> {
        self.send_json(Method::PUT, &["api", "notes", note_id], changes)
            .await
    }

    async fn delete_note(&self, note_id: &str) -> Result<()> {
        self.exchange::<serde_json::Value>(
            self.request(Method::DELETE, &["api", "notes", note_id]),
        )
        .await
        .map(|_| ())
    }

    async fn list_comments(&self, video_id: &str) -> Result<Vec<CommentThread>> {
        self.fetch(self.request(Method::GET, &["api", "videos", video_id, "comments"]))
            .await
    }

    async fn add_comment(&self, video_id: &str, text: &str) -> Result<CommentThread> {
        self.send_json(
            Method::POST,
            &["api", "videos", video_id, "comments"],
            &json!({ "text": text }),
        )
        .await
    }

    async fn reply_to_comment(&self, video_id: &str, comment_id: &str, text: &str) -> Result<Comment> {
        self.send_json(
            Method::POST,
            &["api", "videos", video_id, "comments", comment_id, "replies"],
            &json!({ "text": text }),
        )
        .await
    }

    async fn delete_comment(&self, video_id: &str, comment_id: &str) -> Result<()> {
        self.exchange::<serde_json::Value>(self.request(
            Method::DELETE,
            &["api", "videos", video_id, "comments", comment_id],
        ))
        .await
        .map(|_| ())
    }

    async fn event_logs(&self, video_id: Option<&str>, limit: u32) -> Result<Vec<EventLog>> {
        let mut request = self
            .request(Method::GET, &["api", "event-logs"])
            .query(&[("limit", limit)]);
        if let Some(video_id) = video_id {
            request = request.query(&[("videoId", video_id)]);
        }
        self.fetch(request).await
    }

    async fn record_event(&self, entry: &NewEventLog) -> Result<EventLog> {
        self.send_json(Method::POST, &["api", "event-logs"], entry).await
    }
}
