//! ytdesk-server library
//!
//! REST backend for the creator dashboard: video lookup and comment
//! moderation through the YouTube Data API, plus locally stored notes and an
//! activity log.

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod cors;
pub mod db;
pub mod error;
pub mod youtube;

pub use crate::error::{ApiError, ApiResult};
pub use crate::youtube::VideoPlatform;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Note and event-log store
    pub db: SqlitePool,
    /// YouTube Data API (or a stand-in under test)
    pub youtube: Arc<dyn VideoPlatform>,
    /// Service startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, youtube: Arc<dyn VideoPlatform>) -> Self {
        Self {
            db,
            youtube,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::video_routes())
        .merge(api::comment_routes())
        .merge(api::note_routes())
        .merge(api::event_log_routes())
        .with_state(state)
        .layer(cors::cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
