// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Webhook routes for Strava events.

use crate::error::{AppError, Result};
use crate::models::WebhookEvent;
use crate::services::{ActivityProcessor, ProcessResult};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Json, Query, State},
    response::IntoResponse,
    routing::{get, MethodRouter},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Webhook routes.
///
/// Strava is pointed at either the root or `/webhook`; both behave the same.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", webhook_methods())
        .route("/webhook", webhook_methods())
}

/// GET is the subscription handshake; any other method delivers an event.
///
/// `get` would also answer HEAD, so HEAD is routed to the event handler
/// explicitly.
fn webhook_methods() -> MethodRouter<Arc<AppState>> {
    get(verify).head(handle_event).fallback(handle_event)
}

/// Strava webhook verification query params.
///
/// A repeated parameter keeps its first value.
#[derive(Debug, Default, PartialEq, Eq)]
struct VerifyParams {
    mode: Option<String>,
    challenge: Option<String>,
    verify_token: Option<String>,
}

impl VerifyParams {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "hub.mode" => &mut params.mode,
                "hub.challenge" => &mut params.challenge,
                "hub.verify_token" => &mut params.verify_token,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

/// Verification response.
#[derive(Serialize)]
struct VerifyResponse {
    #[serde(rename = "hub.challenge")]
    challenge: Option<String>,
}

/// Verify webhook subscription (GET).
async fn verify(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse> {
    let params = VerifyParams::from_pairs(pairs);
    let token_matches = params.verify_token.as_deref().is_some_and(|token| {
        token
            .as_bytes()
            .ct_eq(state.config.verify_token.as_bytes())
            .into()
    });

    if !token_matches {
        tracing::warn!(
            mode = ?params.mode,
            token_present = params.verify_token.is_some(),
            "Webhook verification failed: invalid token"
        );
        return Err(AppError::InvalidVerifyToken);
    }

    tracing::info!(mode = ?params.mode, "Webhook subscription verified");
    Ok(Json(VerifyResponse {
        challenge: params.challenge,
    }))
}

/// Handle incoming webhook events (POST and any other non-GET method).
async fn handle_event(State(state): State<Arc<AppState>>, body: Bytes) -> Result<&'static str> {
    let payload: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Webhook body is not valid JSON");
        AppError::BadRequest(format!("Invalid JSON body: {}", e))
    })?;

    tracing::debug!(payload = %payload, "Webhook event received (raw)");

    let event: WebhookEvent = match serde_json::from_value(payload) {
        Ok(e) => e,
        Err(e) => {
            tracing::info!(error = %e, "Ignoring webhook payload without event fields");
            return Ok("OK");
        }
    };

    tracing::info!(
        object_type = %event.object_type,
        object_id = %event.object_id,
        aspect_type = %event.aspect_type,
        owner_id = ?event.owner_id,
        subscription_id = ?event.subscription_id,
        "Webhook event parsed successfully"
    );

    if !event.is_activity_create() {
        tracing::debug!(
            object_type = %event.object_type,
            aspect_type = %event.aspect_type,
            "Ignoring unhandled event type"
        );
        return Ok("OK");
    }

    let processor = ActivityProcessor::new(&state.strava, &state.config.refresh_token);
    match processor.process_activity(&event.object_id).await? {
        ProcessResult::HideFailed(reason) => {
            tracing::warn!(
                activity_id = %event.object_id,
                reason = %reason,
                "Acknowledging event although the activity could not be hidden"
            );
        }
        result => {
            tracing::debug!(activity_id = %event.object_id, ?result, "Activity processed");
        }
    }

    Ok("OK")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_value_wins() {
        let params = VerifyParams::from_pairs(pairs(&[
            ("hub.challenge", "first"),
            ("hub.verify_token", "token"),
            ("hub.challenge", "second"),
            ("hub.verify_token", "other"),
        ]));

        assert_eq!(params.challenge.as_deref(), Some("first"));
        assert_eq!(params.verify_token.as_deref(), Some("token"));
        assert_eq!(params.mode, None);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let params = VerifyParams::from_pairs(pairs(&[("foo", "bar"), ("hub.mode", "subscribe")]));

        assert_eq!(
            params,
            VerifyParams {
                mode: Some("subscribe".to_string()),
                ..VerifyParams::default()
            }
        );
    }
}
