//! ytdesk-server - REST backend for the creator dashboard
//!
//! Serves video lookup, comment moderation and private notes over HTTP.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ytdesk_common::config::load_config_or_default;
use ytdesk_server::config::{Args, ServerConfig};
use ytdesk_server::db::init_database_pool;
use ytdesk_server::youtube::YouTubeClient;
use ytdesk_server::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ytdesk_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build identification before anything that can stall
    info!(
        "Starting ytdesk-server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let toml = load_config_or_default(args.config.as_deref()).context("Failed to load config file")?;
    let config = ServerConfig::resolve(args, toml).context("Invalid configuration")?;

    if config.youtube.api_key.is_none() {
        warn!("YOUTUBE_API_KEY is not set; video and comment reads will fail");
    }

    let pool = init_database_pool(&config.database_url)
        .await
        .context("Failed to open database")?;

    let youtube = YouTubeClient::new(config.youtube.clone()).context("Failed to create YouTube client")?;
    if youtube.can_write() {
        info!("YouTube write access configured");
    } else {
        warn!("No YouTube OAuth credentials; comment and video writes will be rejected");
    }

    info!("Allowed origins: {}", config.allowed_origins.join(", "));

    let state = AppState::new(pool, Arc::new(youtube));
    let app = build_router(state, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.listen_addr))?;
    info!("ytdesk-server listening on http://{}", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
