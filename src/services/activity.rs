// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity processing service.
//!
//! Handles the core workflow:
//! 1. Exchange the refresh token for an access token
//! 2. Fetch the activity from Strava
//! 3. Hide the activity unless it is a run

use crate::error::Result;
use crate::models::{ActivityVisibility, ObjectId};
use crate::services::StravaClient;

/// Activity type that stays publicly visible.
pub const VISIBLE_ACTIVITY_TYPE: &str = "Run";

/// What to do with an activity once its type is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityDecision {
    KeepVisible,
    Hide,
}

impl VisibilityDecision {
    /// Decide from the activity's `type`. A missing type is not a run.
    pub fn for_activity_type(activity_type: Option<&str>) -> Self {
        if activity_type == Some(VISIBLE_ACTIVITY_TYPE) {
            VisibilityDecision::KeepVisible
        } else {
            VisibilityDecision::Hide
        }
    }
}

/// Result of processing one activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessResult {
    /// Activity is a run; no update was sent.
    KeptVisible,
    /// Activity was marked private and hidden from the home feed.
    Hidden,
    /// The visibility update was sent but Strava rejected it.
    HideFailed(String),
}

/// Process a newly created activity and hide it if it is not a run.
pub struct ActivityProcessor<'a> {
    strava: &'a StravaClient,
    refresh_token: &'a str,
}

impl<'a> ActivityProcessor<'a> {
    pub fn new(strava: &'a StravaClient, refresh_token: &'a str) -> Self {
        Self {
            strava,
            refresh_token,
        }
    }

    /// Process an activity by ID.
    ///
    /// Token exchange and activity fetch failures are returned to the caller.
    /// A failed visibility update is logged and reported as
    /// [`ProcessResult::HideFailed`] so the webhook is still acknowledged.
    pub async fn process_activity(&self, activity_id: &ObjectId) -> Result<ProcessResult> {
        tracing::info!(activity_id = %activity_id, "Processing activity");

        // 1. Fresh access token for every event (never cached)
        tracing::debug!("Refreshing access token");
        let tokens = self
            .strava
            .refresh_token(self.refresh_token)
            .await
            .inspect_err(|e| {
                if e.is_strava_token_error() {
                    tracing::warn!("Strava rejected the configured refresh token");
                }
            })?;
        tracing::debug!(expires_at = ?tokens.expires_at, "Access token refreshed");

        // 2. Fetch activity
        let activity = self
            .strava
            .get_activity(&tokens.access_token, activity_id)
            .await?;

        tracing::info!(
            activity_id = %activity_id,
            activity_type = ?activity.activity_type,
            sport_type = ?activity.sport_type,
            name = ?activity.name,
            "Fetched activity"
        );

        // 3. Hide anything that is not a run
        match VisibilityDecision::for_activity_type(activity.activity_type.as_deref()) {
            VisibilityDecision::KeepVisible => {
                tracing::info!(activity_id = %activity_id, "Activity is a run, keeping visible");
                Ok(ProcessResult::KeptVisible)
            }
            VisibilityDecision::Hide => {
                match self
                    .strava
                    .update_activity_visibility(
                        &tokens.access_token,
                        activity_id,
                        ActivityVisibility::HIDDEN,
                    )
                    .await
                {
                    Ok(()) => {
                        tracing::info!(activity_id = %activity_id, "Activity hidden");
                        Ok(ProcessResult::Hidden)
                    }
                    Err(e) => {
                        tracing::error!(
                            activity_id = %activity_id,
                            error = %e,
                            "Failed to hide activity"
                        );
                        Ok(ProcessResult::HideFailed(e.to_string()))
                    }
                }
            }
        }
    }
}
