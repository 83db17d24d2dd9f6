//! Configuration file loading and default locations
//!
//! Settings resolve in this order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Tiers 1 and 2 are handled by each binary's clap definition; this module
//! owns tiers 3 and 4. A missing config file is not an error.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default HTTP port for ytdesk-server
pub const DEFAULT_PORT: u16 = 5000;

/// Default bind address for ytdesk-server
pub const DEFAULT_BIND: &str = "0.0.0.0";

/// Default YouTube Data API v3 endpoint
pub const DEFAULT_YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Default server URL used by the dashboard client
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Origins allowed to call the REST API when none are configured
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:5173"];

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub port: Option<u16>,
    pub bind: Option<String>,
    pub database_url: Option<String>,
    pub allowed_origins: Option<Vec<String>>,
    /// Used by the `ytdesk` dashboard to reach the server
    pub server_url: Option<String>,
    pub youtube: YouTubeConfig,
}

/// `[youtube]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YouTubeConfig {
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    pub base_url: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
}

/// Platform config file location: `<config dir>/ytdesk/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ytdesk").join("config.toml"))
}

/// OS-dependent data folder holding the SQLite database
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("ytdesk"))
        .unwrap_or_else(|| PathBuf::from("./ytdesk_data"))
}

/// Default sqlx connection string: `<data dir>/ytdesk.db`, created on first use
pub fn default_database_url() -> String {
    format!(
        "sqlite://{}?mode=rwc",
        default_data_dir().join("ytdesk.db").display()
    )
}

/// Load a TOML config file
///
/// A missing file yields the empty config (with a warning). A file that
/// exists but does not parse is a configuration error.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        warn!("Config file not found at {}, using defaults", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    debug!("Loaded config file {}", path.display());
    Ok(config)
}

/// Load the config at `explicit` or, failing that, the platform default path
pub fn load_config_or_default(explicit: Option<&Path>) -> Result<TomlConfig> {
    match explicit {
        Some(path) => load_toml_config(path),
        None => match default_config_path() {
            Some(path) => load_toml_config(&path),
            None => Ok(TomlConfig::default()),
        },
    }
}

/// Split a comma-separated origin list, dropping blanks
pub fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Treat empty and whitespace-only values as unset
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
