// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava privacy relay: hide every new activity that is not a run
//!
//! This crate receives Strava webhook events, looks up each newly created
//! activity, and marks it private unless it is a run.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::StravaClient;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub strava: StravaClient,
}

impl AppState {
    /// Build state with a Strava client pointed at the configured endpoints.
    pub fn new(config: Config) -> Self {
        let strava = StravaClient::from_config(&config);
        Self { config, strava }
    }
}
