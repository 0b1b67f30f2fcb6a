// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava Privacy Relay Server
//!
//! Answers the Strava webhook subscription handshake and hides every newly
//! created activity that is not a run.

use strava_privacy_relay::{config::Config, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        client_id = %config.client_id,
        api_url = %config.strava_api_url,
        oauth_url = %config.strava_oauth_url,
        "Starting Strava privacy relay"
    );

    let state = Arc::new(AppState::new(config.clone()));

    // Build router
    let app = strava_privacy_relay::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("strava_privacy_relay=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
