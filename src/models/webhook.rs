// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava webhook event payload.

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;

/// Strava webhook event payload.
///
/// Only `object_type`, `aspect_type` and `object_id` drive behavior; the
/// remaining fields are kept for logging.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    /// "activity" or "athlete"
    pub object_type: String,
    /// "create", "update", "delete"
    pub aspect_type: String,
    pub object_id: ObjectId,
    #[serde(default)]
    pub owner_id: Option<u64>,
    #[serde(default)]
    pub subscription_id: Option<u64>,
    #[serde(default)]
    pub event_time: Option<i64>,
    #[serde(default)]
    pub updates: Option<HashMap<String, serde_json::Value>>,
}

impl WebhookEvent {
    /// Whether this event announces a newly created activity.
    pub fn is_activity_create(&self) -> bool {
        self.object_type == "activity" && self.aspect_type == "create"
    }
}

/// Identifier of the object an event refers to.
///
/// Strava sends a number, but a string of ASCII digits is accepted too.
/// Anything else is rejected so the id can only ever name an activity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for ObjectId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self(n.to_string())),
            Raw::Text(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => Ok(Self(s)),
            Raw::Text(s) => Err(serde::de::Error::custom(format!(
                "object_id must be numeric, got {:?}",
                s
            ))),
        }
    }
}
