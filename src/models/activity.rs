// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity visibility update sent to Strava.

use serde::Serialize;

/// Body of `PUT /activities/{id}` that changes who can see an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityVisibility {
    /// Only the owner can see the activity
    pub private: bool,
    /// Keep the activity out of followers' home feeds
    pub hide_from_home: bool,
}

impl ActivityVisibility {
    /// Fully hidden: private and muted from the home feed.
    pub const HIDDEN: Self = Self {
        private: true,
        hide_from_home: true,
    };
}
