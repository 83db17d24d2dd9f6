//! Common error types for ytdesk
//!
//! The three kinds surfaced to a user action are `Validation`, `NotFound` and
//! `RemoteApi`. The remaining variants are ambient failures that the server
//! folds into `RemoteApi`-style responses before they reach a client.

use thiserror::Error;

/// Common result type for ytdesk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across ytdesk crates
#[derive(Error, Debug)]
pub enum Error {
    /// Client-supplied data fails a precondition (empty note title, empty comment text)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced note, video or comment does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// YouTube Data API or store call failed
    ///
    /// `status` carries the upstream HTTP status when one was received.
    #[error("Remote API error{}: {message}", status.map(|s| format!(" ({})", s)).unwrap_or_default())]
    RemoteApi {
        status: Option<u16>,
        message: String,
    },

    /// A mutating action of the same kind is still in flight
    #[error("Action already in progress: {0}")]
    ActionInFlight(String),

    /// Database operation error (wraps sqlx::Error)
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Build a `RemoteApi` error from an upstream status and message
    pub fn remote(status: impl Into<Option<u16>>, message: impl Into<String>) -> Self {
        Error::RemoteApi {
            status: status.into(),
            message: message.into(),
        }
    }

    /// Upstream status carried by a `RemoteApi` error, if any
    pub fn remote_status(&self) -> Option<u16> {
        match self {
            Error::RemoteApi { status, .. } => *status,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_display_with_status() {
        let err = Error::remote(403, "The request cannot be completed because you have exceeded your quota.");
        assert_eq!(
            err.to_string(),
            "Remote API error (403): The request cannot be completed because you have exceeded your quota."
        );
        assert_eq!(err.remote_status(), Some(403));
    }

    #[test]
    fn test_remote_error_display_without_status() {
        let err = Error::remote(None, "connection refused");
        assert_eq!(err.to_string(), "Remote API error: connection refused");
        assert_eq!(err.remote_status(), None);
    }

    #[test]
    fn test_non_remote_has_no_status() {
        assert_eq!(Error::NotFound("note".into()).remote_status(), None);
    }
}
