//! Error types for ytdesk-server
//!
//! Every failure leaves the server as a `{ success: false, message }` envelope
//! with the error kind in the [`ERROR_KIND_HEADER`] header.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
pub use ytdesk_common::api::ERROR_KIND_HEADER;
use ytdesk_common::api::Envelope;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client data failed a precondition (400)
    #[error("{0}")]
    Validation(String),

    /// Note, video or comment not found (404)
    #[error("{0}")]
    NotFound(String),

    /// YouTube call failed; upstream status is passed through when known
    #[error("{message}")]
    RemoteApi {
        status: Option<u16>,
        message: String,
    },

    /// Note store failure (500)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Wire name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation",
            ApiError::NotFound(_) => "not_found",
            ApiError::RemoteApi { .. } | ApiError::Database(_) | ApiError::Internal(_) => {
                "remote_api"
            }
        }
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::RemoteApi { status, .. } => status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ytdesk_common::Error> for ApiError {
    fn from(err: ytdesk_common::Error) -> Self {
        use ytdesk_common::Error;
        match err {
            Error::Validation(msg) => ApiError::Validation(msg),
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::RemoteApi { status, message } => ApiError::RemoteApi { status, message },
            Error::Database(e) => ApiError::Database(e),
            Error::ActionInFlight(msg) => ApiError::Validation(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(format!("Invalid query string: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), kind, error = %self, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), kind, error = %self, "Request rejected");
        }

        let body = Json(Envelope::<()>::error(self.to_string()));
        let mut response = (status, body).into_response();
        response
            .headers_mut()
            .insert(ERROR_KIND_HEADER, HeaderValue::from_static(kind));
        response
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
