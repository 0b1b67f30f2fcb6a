// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use strava_privacy_relay::config::Config;
use strava_privacy_relay::routes::create_router;
use strava_privacy_relay::AppState;
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Verify token accepted by the test app.
#[allow(dead_code)]
pub const VERIFY_TOKEN: &str = "test_verify_token";

/// Config whose Strava endpoints point at the mock server.
#[allow(dead_code)]
pub fn test_config(server: &MockServer) -> Config {
    Config {
        strava_api_url: format!("{}/api/v3", server.uri()),
        strava_oauth_url: format!("{}/oauth", server.uri()),
        ..Config::test_default()
    }
}

/// Create a test app talking to the given mock Strava server.
#[allow(dead_code)]
pub fn create_test_app(server: &MockServer) -> axum::Router {
    let state = Arc::new(AppState::new(test_config(server)));
    create_router(state)
}

/// Send a request through the router and collect the response.
#[allow(dead_code)]
pub async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// Build a POST request carrying a webhook event.
#[allow(dead_code)]
pub fn event_request(event: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(event).unwrap()))
        .unwrap()
}

/// Expect `times` refresh token exchanges, each answered with `access_token`.
#[allow(dead_code)]
pub async fn mount_token_exchange(server: &MockServer, access_token: &str, times: u64) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_json(json!({
            "client_id": "test_client_id",
            "client_secret": "test_secret",
            "refresh_token": "test_refresh_token",
            "grant_type": "refresh_token"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token_type": "Bearer",
            "access_token": access_token,
            "expires_at": 1_700_000_000,
            "expires_in": 21600,
            "refresh_token": "test_refresh_token"
        })))
        .expect(times)
        .mount(server)
        .await;
}

/// Serve an activity of the given type.
#[allow(dead_code)]
pub async fn mount_activity(server: &MockServer, activity_id: u64, activity_type: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v3/activities/{}", activity_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": activity_id,
            "name": "Afternoon Activity",
            "type": activity_type,
            "sport_type": activity_type,
            "distance": 12345.6,
            "private": false
        })))
        .mount(server)
        .await;
}
