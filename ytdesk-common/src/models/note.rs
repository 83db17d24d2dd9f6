//! Private notes attached to a video

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Note category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteCategory {
    #[default]
    General,
    Improvement,
    Ideas,
    Feedback,
}

impl NoteCategory {
    pub const ALL: [NoteCategory; 4] = [
        NoteCategory::General,
        NoteCategory::Improvement,
        NoteCategory::Ideas,
        NoteCategory::Feedback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NoteCategory::General => "general",
            NoteCategory::Improvement => "improvement",
            NoteCategory::Ideas => "ideas",
            NoteCategory::Feedback => "feedback",
        }
    }
}

impl fmt::Display for NoteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        NoteCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::Validation(format!("Unknown note category: {}", s)))
    }
}

/// Note priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotePriority {
    Low,
    #[default]
    Medium,
    High,
}

impl NotePriority {
    pub const ALL: [NotePriority; 3] = [NotePriority::Low, NotePriority::Medium, NotePriority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            NotePriority::Low => "low",
            NotePriority::Medium => "medium",
            NotePriority::High => "high",
        }
    }
}

impl fmt::Display for NotePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotePriority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        NotePriority::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| Error::Validation(format!("Unknown note priority: {}", s)))
    }
}

/// A persisted note
///
/// `video_id` is the external video identifier in scope when the note was
/// created. Nothing checks that the video still exists on YouTube.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub video_id: String,
    pub title: String,
    pub content: String,
    pub category: NoteCategory,
    pub priority: NotePriority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// POST /api/notes body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
    pub video_id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category: NoteCategory,
    #[serde(default)]
    pub priority: NotePriority,
}

impl NoteDraft {
    /// Trim text fields and reject empty title/content
    pub fn validated(self) -> Result<Self> {
        let video_id = self.video_id.trim().to_string();
        let title = self.title.trim().to_string();
        let content = self.content.trim().to_string();

        if video_id.is_empty() {
            return Err(Error::Validation("Video ID is required".to_string()));
        }
        if title.is_empty() || content.is_empty() {
            return Err(Error::Validation("Title and content are required".to_string()));
        }

        Ok(Self {
            video_id,
            title,
            content,
            ..self
        })
    }
}

/// PUT /api/notes/:id body; absent fields keep their stored value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<NoteCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<NotePriority>,
}

impl NoteUpdate {
    /// Trim supplied text fields and reject any that end up empty
    pub fn validated(self) -> Result<Self> {
        let title = trimmed_non_empty(self.title, "Title")?;
        let content = trimmed_non_empty(self.content, "Content")?;
        Ok(Self {
            title,
            content,
            ..self
        })
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.category.is_none()
            && self.priority.is_none()
    }

    /// Apply this update onto an existing note, bumping `updated_at`
    pub fn apply(self, note: &mut Note, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            note.title = title;
        }
        if let Some(content) = self.content {
            note.content = content;
        }
        if let Some(category) = self.category {
            note.category = category;
        }
        if let Some(priority) = self.priority {
            note.priority = priority;
        }
        note.updated_at = now;
    }
}

fn trimmed_non_empty(value: Option<String>, field: &str) -> Result<Option<String>> {
    match value {
        Some(v) => {
            let v = v.trim();
            if v.is_empty() {
                Err(Error::Validation(format!("{} cannot be empty", field)))
            } else {
                Ok(Some(v.to_string()))
            }
        }
        None => Ok(None),
    }
}
