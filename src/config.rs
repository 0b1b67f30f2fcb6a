// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Credentials are read once at startup and never change afterwards.

use std::env;
use std::fmt;

/// Default Strava REST API base URL.
pub const DEFAULT_STRAVA_API_URL: &str = "https://www.strava.com/api/v3";
/// Default Strava OAuth base URL.
pub const DEFAULT_STRAVA_OAUTH_URL: &str = "https://www.strava.com/oauth";

/// Application configuration, loaded once at startup.
#[derive(Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Strava OAuth client ID (public)
    pub client_id: String,
    /// Server port
    pub port: u16,
    /// Strava REST API base URL (overridable for tests)
    pub strava_api_url: String,
    /// Strava OAuth base URL (overridable for tests)
    pub strava_oauth_url: String,

    // --- Secrets ---
    /// Strava OAuth client secret
    pub client_secret: String,
    /// Long-lived refresh token of the athlete whose activities are filtered
    pub refresh_token: String,
    /// Webhook verification token
    pub verify_token: String,
}

// Secrets must never reach the logs, so Debug only reports their presence.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("port", &self.port)
            .field("strava_api_url", &self.strava_api_url)
            .field("strava_oauth_url", &self.strava_oauth_url)
            .field("client_secret", &redacted(&self.client_secret))
            .field("refresh_token", &redacted(&self.refresh_token))
            .field("verify_token", &redacted(&self.verify_token))
            .finish()
    }
}

fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<empty>"
    } else {
        "<redacted>"
    }
}

impl Config {
    /// Config for testing only.
    pub fn test_default() -> Self {
        Self {
            client_id: "test_client_id".to_string(),
            port: 8080,
            strava_api_url: DEFAULT_STRAVA_API_URL.to_string(),
            strava_oauth_url: DEFAULT_STRAVA_OAUTH_URL.to_string(),
            client_secret: "test_secret".to_string(),
            refresh_token: "test_refresh_token".to_string(),
            verify_token: "test_verify_token".to_string(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            client_id: required("CLIENT_ID")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            strava_api_url: base_url("STRAVA_API_URL", DEFAULT_STRAVA_API_URL),
            strava_oauth_url: base_url("STRAVA_OAUTH_URL", DEFAULT_STRAVA_OAUTH_URL),

            client_secret: required("CLIENT_SECRET")?,
            refresh_token: required("REFRESH_TOKEN")?,
            verify_token: required("VERIFY_TOKEN")?,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .map(|v| v.trim().to_string())
        .map_err(|_| ConfigError::Missing(name))
}

fn base_url(name: &str, default: &str) -> String {
    env::var(name)
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
