// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod webhook;

pub use activity::ActivityVisibility;
pub use webhook::{ObjectId, WebhookEvent};
