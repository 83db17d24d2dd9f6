//! OAuth bearer tokens for YouTube write calls
//!
//! Reads only need the API key. Inserting and deleting comments or editing a
//! video needs an OAuth access token, supplied either directly or minted from
//! a refresh token.

use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use ytdesk_common::{Error, Result};

use super::wire::{ErrorResponse, TokenResponse};

/// Google OAuth 2.0 token endpoint
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Tokens are refreshed this long before Google says they expire
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Lifetime assumed when the token endpoint omits `expires_in`
const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(3600);

/// Refresh-token grant parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

/// How write calls are authorized
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// No write access configured
    None,
    /// Fixed access token (expires on Google's schedule, never refreshed)
    Static(String),
    /// Exchange a refresh token for short-lived access tokens
    Refresh(RefreshCredentials),
}

struct CachedToken {
    value: String,
    refresh_at: Instant,
}

/// Hands out bearer tokens, refreshing through the token endpoint when needed
pub struct TokenSource {
    http_client: reqwest::Client,
    token_url: String,
    credentials: Credentials,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenSource {
    pub fn new(http_client: reqwest::Client, credentials: Credentials, token_url: impl Into<String>) -> Self {
        Self {
            http_client,
            token_url: token_url.into(),
            credentials,
            cached: Mutex::new(None),
        }
    }

    pub fn can_write(&self) -> bool {
        !matches!(self.credentials, Credentials::None)
    }

    /// Current bearer token
    ///
    /// Fails with a 401 `RemoteApi` error when no write credentials exist.
    pub async fn bearer(&self) -> Result<String> {
        match &self.credentials {
            Credentials::None => Err(Error::remote(
                401,
                "YouTube write access is not configured (set YOUTUBE_ACCESS_TOKEN or GOOGLE_REFRESH_TOKEN)",
            )),
            Credentials::Static(token) => Ok(token.clone()),
            Credentials::Refresh(refresh) => {
                let mut cached = self.cached.lock().await;
                if let Some(token) = cached.as_ref() {
                    if Instant::now() < token.refresh_at {
                        return Ok(token.value.clone());
                    }
                }

                let fresh = self.exchange(refresh).await?;
                let value = fresh.value.clone();
                *cached = Some(fresh);
                Ok(value)
            }
        }
    }

    async fn exchange(&self, refresh: &RefreshCredentials) -> Result<CachedToken> {
        tracing::debug!(token_url = %self.token_url, "Refreshing YouTube access token");

        let params = [
            ("client_id", refresh.client_id.as_str()),
            ("client_secret", refresh.client_secret.as_str()),
            ("refresh_token", refresh.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| Error::remote(None, format!("Token refresh failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            tracing::warn!(status = status.as_u16(), "YouTube token refresh rejected");
            return Err(Error::remote(
                status.as_u16(),
                format!("Token refresh rejected: {}", message),
            ));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::remote(None, format!("Token response parse error: {}", e)))?;

        let lifetime = token
            .expires_in
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TOKEN_LIFETIME);

        tracing::info!(expires_in_secs = lifetime.as_secs(), "YouTube access token refreshed");

        Ok(CachedToken {
            value: token.access_token,
            refresh_at: Instant::now() + lifetime.saturating_sub(EXPIRY_MARGIN),
        })
    }
}
