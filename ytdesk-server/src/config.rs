//! Server configuration
//!
//! Command-line flags and environment variables come from clap; anything left
//! unset falls back to `config.toml`, then to compiled defaults.

use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use ytdesk_common::config::{
    default_database_url, non_blank, parse_origin_list, TomlConfig, DEFAULT_ALLOWED_ORIGINS,
    DEFAULT_BIND, DEFAULT_PORT, DEFAULT_YOUTUBE_BASE_URL,
};
use ytdesk_common::{Error, Result};

use crate::youtube::{Credentials, RefreshCredentials, YouTubeSettings};
use crate::youtube::auth::GOOGLE_TOKEN_URL;

/// Command-line arguments for ytdesk-server
#[derive(Parser, Debug, Default)]
#[command(name = "ytdesk-server")]
#[command(about = "REST backend for the ytdesk creator dashboard")]
#[command(version)]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "YTDESK_BIND")]
    pub bind: Option<String>,

    /// YouTube Data API key used for reads
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    pub youtube_api_key: Option<String>,

    /// Static OAuth access token used for writes
    #[arg(long, env = "YOUTUBE_ACCESS_TOKEN", hide_env_values = true)]
    pub youtube_access_token: Option<String>,

    /// OAuth client id for refreshing access tokens
    #[arg(long, env = "GOOGLE_CLIENT_ID")]
    pub google_client_id: Option<String>,

    /// OAuth client secret for refreshing access tokens
    #[arg(long, env = "GOOGLE_CLIENT_SECRET", hide_env_values = true)]
    pub google_client_secret: Option<String>,

    /// OAuth refresh token
    #[arg(long, env = "GOOGLE_REFRESH_TOKEN", hide_env_values = true)]
    pub google_refresh_token: Option<String>,

    /// YouTube Data API base URL
    #[arg(long, env = "YOUTUBE_API_BASE_URL")]
    pub youtube_base_url: Option<String>,

    /// sqlx SQLite connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Comma-separated CORS origins; `*` matches a host label
    #[arg(long, env = "ALLOWED_ORIGINS")]
    pub allowed_origins: Option<String>,

    /// Config file path
    #[arg(long, env = "YTDESK_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Fully resolved server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    pub database_url: String,
    pub allowed_origins: Vec<String>,
    pub youtube: YouTubeSettings,
}

impl ServerConfig {
    /// Merge CLI/env values over the TOML file over defaults
    pub fn resolve(args: Args, toml: TomlConfig) -> Result<Self> {
        let port = args.port.or(toml.port).unwrap_or(DEFAULT_PORT);
        let bind = non_blank(args.bind)
            .or(non_blank(toml.bind))
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let ip: IpAddr = bind
            .parse()
            .map_err(|_| Error::Config(format!("Invalid bind address: {}", bind)))?;

        let database_url = non_blank(args.database_url)
            .or(non_blank(toml.database_url))
            .unwrap_or_else(default_database_url);

        let allowed_origins = match non_blank(args.allowed_origins) {
            Some(raw) => parse_origin_list(&raw),
            None => toml.allowed_origins.unwrap_or_else(|| {
                DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect()
            }),
        };

        let yt = toml.youtube;
        let access_token = non_blank(args.youtube_access_token).or(non_blank(yt.access_token));
        let client_id = non_blank(args.google_client_id).or(non_blank(yt.client_id));
        let client_secret = non_blank(args.google_client_secret).or(non_blank(yt.client_secret));
        let refresh_token = non_blank(args.google_refresh_token).or(non_blank(yt.refresh_token));

        // A complete refresh grant wins over a static token
        let credentials = match (client_id, client_secret, refresh_token, access_token) {
            (Some(client_id), Some(client_secret), Some(refresh_token), _) => {
                Credentials::Refresh(RefreshCredentials {
                    client_id,
                    client_secret,
                    refresh_token,
                })
            }
            (_, _, _, Some(token)) => Credentials::Static(token),
            _ => Credentials::None,
        };

        let youtube = YouTubeSettings {
            api_key: non_blank(args.youtube_api_key).or(non_blank(yt.api_key)),
            credentials,
            base_url: non_blank(args.youtube_base_url)
                .or(non_blank(yt.base_url))
                .unwrap_or_else(|| DEFAULT_YOUTUBE_BASE_URL.to_string()),
            token_url: GOOGLE_TOKEN_URL.to_string(),
        };

        Ok(Self {
            listen_addr: SocketAddr::new(ip, port),
            database_url,
            allowed_origins,
            youtube,
        })
    }
}
