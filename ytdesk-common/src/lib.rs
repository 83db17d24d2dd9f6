//! # ytdesk Common Library
//!
//! Shared code for the ytdesk server and dashboard:
//! - Note, video and comment-thread models
//! - The `{ success, data?, message? }` response envelope
//! - Video identifier resolution (raw ID or URL to the 11-character token)
//! - Configuration file loading
//! - Common error type

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod resolver;

pub use error::{Error, Result};
pub use resolver::{resolve, VideoRef};
