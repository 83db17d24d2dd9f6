//! Video metadata as shown on the dashboard

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Flattened video metadata returned by GET /api/videos/:id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    pub youtube_id: String,
    pub title: String,
    pub description: String,
    pub channel_id: String,
    pub channel_title: String,
    pub thumbnail_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub category_id: Option<String>,
    pub tags: Vec<String>,
    pub privacy_status: Option<String>,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
}

/// PUT /api/videos/:id body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl VideoUpdate {
    /// Trim the title and reject an empty one; descriptions may be blank
    pub fn validated(self) -> Result<Self> {
        let title = match self.title {
            Some(t) if t.trim().is_empty() => {
                return Err(Error::Validation("Video title cannot be empty".to_string()))
            }
            Some(t) => Some(t.trim().to_string()),
            None => None,
        };
        if title.is_none() && self.description.is_none() {
            return Err(Error::Validation(
                "Nothing to update: provide a title or description".to_string(),
            ));
        }
        Ok(Self {
            title,
            description: self.description,
        })
    }
}
