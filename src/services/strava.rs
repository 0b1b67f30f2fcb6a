// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client for fetching and hiding activities.
//!
//! Handles:
//! - Refresh token exchange
//! - Activity fetching
//! - Activity visibility updates
//!
//! Rate limits and expired credentials are reported as errors; nothing is
//! retried.

use crate::config::Config;
use crate::error::AppError;
use crate::models::{ActivityVisibility, ObjectId};
use serde::{Deserialize, Serialize};

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    oauth_url: String,
    client_id: String,
    client_secret: String,
}

impl StravaClient {
    /// Create a new Strava client with OAuth credentials.
    pub fn new(
        base_url: String,
        oauth_url: String,
        client_id: String,
        client_secret: String,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            oauth_url,
            client_id,
            client_secret,
        }
    }

    /// Create a client for the endpoints and credentials in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.strava_api_url.clone(),
            config.strava_oauth_url.clone(),
            config.client_id.clone(),
            config.client_secret.clone(),
        )
    }

    /// Exchange a refresh token for a fresh access token.
    pub async fn refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenRefreshResponse, AppError> {
        let url = format!("{}/token", self.oauth_url);

        let body = TokenRefreshRequest {
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            refresh_token,
            grant_type: "refresh_token",
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::StravaApi(format!("Token refresh request failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// Get a detailed activity by ID.
    pub async fn get_activity(
        &self,
        access_token: &str,
        activity_id: &ObjectId,
    ) -> Result<StravaActivity, AppError> {
        let url = self.activity_url(activity_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::StravaApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Update who can see an activity.
    pub async fn update_activity_visibility(
        &self,
        access_token: &str,
        activity_id: &ObjectId,
        visibility: ActivityVisibility,
    ) -> Result<(), AppError> {
        let url = self.activity_url(activity_id);

        let response = self
            .http
            .put(&url)
            .bearer_auth(access_token)
            .json(&visibility)
            .send()
            .await
            .map_err(|e| AppError::StravaApi(e.to_string()))?;

        self.check_response(response).await
    }

    /// URL of a single activity; the id is escaped so it stays one path segment.
    fn activity_url(&self, activity_id: &ObjectId) -> String {
        format!(
            "{}/activities/{}",
            self.base_url,
            urlencoding::encode(activity_id.as_str())
        )
    }

    /// Check response status and return error if not successful.
    async fn check_response(&self, response: reqwest::Response) -> Result<(), AppError> {
        if response.status().is_success() {
            return Ok(());
        }

        Err(Self::status_error(response).await)
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| AppError::StravaApi(format!("JSON parse error: {}", e)))
    }

    async fn status_error(response: reqwest::Response) -> AppError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        // Rate limit - reported, not retried
        if status.as_u16() == 429 {
            tracing::warn!("Strava rate limit hit (429)");
            return AppError::StravaApi(AppError::STRAVA_RATE_LIMIT.to_string());
        }

        // Unauthorized - token may be expired or revoked
        if status.as_u16() == 401 {
            return AppError::StravaApi(AppError::STRAVA_TOKEN_ERROR.to_string());
        }

        AppError::StravaApi(format!("HTTP {}: {}", status, body))
    }
}

/// Refresh token grant sent to the OAuth token endpoint.
#[derive(Serialize)]
struct TokenRefreshRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    refresh_token: &'a str,
    grant_type: &'a str,
}

/// Token refresh response from Strava.
///
/// Strava may rotate the refresh token, but the configured one stays in use.
#[derive(Clone, Deserialize)]
pub struct TokenRefreshResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_at: Option<i64>,
}

/// Detailed Strava activity response.
///
/// Only `type` matters for visibility; the rest is read for logging.
#[derive(Debug, Clone, Deserialize)]
pub struct StravaActivity {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub sport_type: Option<String>,
}
