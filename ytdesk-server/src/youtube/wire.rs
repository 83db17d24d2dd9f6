//! YouTube Data API v3 resource shapes consumed by the client
//!
//! Only the fields the dashboard uses are modeled. Statistics arrive as
//! decimal strings upstream.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use ytdesk_common::models::VideoDetails;

/// Generic `*.list` response (first page only)
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoResource {
    pub id: String,
    #[serde(default)]
    pub snippet: Option<VideoSnippet>,
    #[serde(default)]
    pub statistics: Option<VideoStatistics>,
    #[serde(default)]
    pub status: Option<VideoStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoSnippet {
    pub published_at: Option<DateTime<Utc>>,
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub thumbnails: Option<Thumbnails>,
    pub channel_title: String,
    pub tags: Option<Vec<String>>,
    pub category_id: Option<String>,
    pub default_language: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
    pub standard: Option<Thumbnail>,
    pub maxres: Option<Thumbnail>,
}

impl Thumbnails {
    /// Largest available thumbnail
    pub fn best_url(&self) -> Option<String> {
        [&self.maxres, &self.standard, &self.high, &self.medium, &self.default]
            .into_iter()
            .flatten()
            .map(|t| t.url.clone())
            .next()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoStatistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoStatus {
    pub privacy_status: Option<String>,
}

impl VideoResource {
    pub fn into_details(self) -> VideoDetails {
        let snippet = self.snippet.unwrap_or_default();
        let statistics = self.statistics.unwrap_or_default();
        let count = |v: &Option<String>| v.as_deref().and_then(|s| s.parse::<u64>().ok());

        VideoDetails {
            youtube_id: self.id,
            thumbnail_url: snippet.thumbnails.as_ref().and_then(Thumbnails::best_url),
            title: snippet.title,
            description: snippet.description,
            channel_id: snippet.channel_id,
            channel_title: snippet.channel_title,
            published_at: snippet.published_at,
            category_id: snippet.category_id,
            tags: snippet.tags.unwrap_or_default(),
            privacy_status: self.status.and_then(|s| s.privacy_status),
            view_count: count(&statistics.view_count),
            like_count: count(&statistics.like_count),
            comment_count: count(&statistics.comment_count),
        }
    }
}

/// Google API error body: `{ "error": { "code", "message", "errors": [...] } }`
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<ErrorItem>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorItem {
    #[serde(default)]
    pub reason: Option<String>,
}

impl ErrorBody {
    /// First machine-readable reason (e.g. `quotaExceeded`, `commentsDisabled`)
    pub fn reason(&self) -> Option<&str> {
        self.errors.iter().find_map(|e| e.reason.as_deref())
    }
}

/// OAuth token endpoint response
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}
