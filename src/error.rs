// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid verify token")]
    InvalidVerifyToken,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Strava API error: {0}")]
    StravaApi(String),
}

impl AppError {
    /// Message used when Strava rejects our credentials (HTTP 401).
    pub const STRAVA_TOKEN_ERROR: &'static str = "Token expired or invalid";
    /// Message used when Strava rate limits us (HTTP 429).
    pub const STRAVA_RATE_LIMIT: &'static str = "Rate limit exceeded";

    /// Whether this error means Strava did not accept our token.
    pub fn is_strava_token_error(&self) -> bool {
        match self {
            AppError::StravaApi(msg) => {
                msg == Self::STRAVA_TOKEN_ERROR || msg.contains("invalid_grant")
            }
            _ => false,
        }
    }

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidVerifyToken => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::StravaApi(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (error, details) = match &self {
            // Strava expects a bare text body on a failed handshake
            AppError::InvalidVerifyToken => {
                return (status, self.to_string()).into_response();
            }
            AppError::BadRequest(msg) => ("bad_request", Some(msg.clone())),
            AppError::StravaApi(msg) => {
                tracing::error!(error = %msg, "Strava API error");
                ("strava_error", Some(msg.clone()))
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
