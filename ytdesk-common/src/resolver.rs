//! Video identifier resolution
//!
//! Turns whatever the user typed into the search box into the 11-character
//! identifier YouTube uses to address a video. Recognized shapes:
//!
//! - `https://www.youtube.com/watch?v=<id>` (any position of `v` in the query)
//! - `https://youtu.be/<id>`
//! - `https://www.youtube.com/embed/<id>`, `/v/<id>`, `/e/<id>`
//! - `https://www.youtube.com/<a>/<b>/<id>` style user/channel paths
//!
//! Anything else is returned trimmed but otherwise untouched. No length or
//! character-set check happens here: a bad identifier fails at the video lookup.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static VIDEO_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
    )
    .expect("video URL pattern is valid")
});

/// Resolve raw user input to a video identifier
///
/// Returns the captured 11-character token when `input` matches a known URL
/// shape, otherwise the trimmed input verbatim.
///
/// # Examples
/// ```
/// use ytdesk_common::resolver::resolve;
///
/// assert_eq!(resolve("https://youtu.be/dQw4w9WgXcQ"), "dQw4w9WgXcQ");
/// assert_eq!(resolve("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=5s"), "dQw4w9WgXcQ");
/// assert_eq!(resolve("  dQw4w9WgXcQ "), "dQw4w9WgXcQ");
/// ```
pub fn resolve(input: &str) -> String {
    let trimmed = input.trim();
    match VIDEO_URL.captures(trimmed).and_then(|c| c.get(1)) {
        Some(token) => token.as_str().to_string(),
        None => trimmed.to_string(),
    }
}

/// Transient key scoping every fetch for one looked-up video
///
/// Never persisted. Notes copy `external_id` into their `video_id` at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoRef {
    external_id: String,
}

impl VideoRef {
    /// Resolve raw input into a reference (see [`resolve`])
    pub fn parse(input: &str) -> Self {
        Self {
            external_id: resolve(input),
        }
    }

    pub fn external_id(&self) -> &str {
        &self.external_id
    }
}

impl fmt::Display for VideoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.external_id)
    }
}

impl AsRef<str> for VideoRef {
    fn as_ref(&self) -> &str {
        &self.external_id
    }
}
