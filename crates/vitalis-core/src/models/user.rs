// ABOUTME: User profile model including the stored billing customer id
// ABOUTME: UserProfile definition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated principal that exclusively owns its health data tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// User id
    pub id: Uuid,
    /// Email address
    pub email: String,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Chronological age in years, when the user has provided it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chronological_age: Option<u32>,
    /// Payment-provider customer id, created lazily on first payment-link request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_customer_id: Option<String>,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create a new profile with a random id
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            display_name: None,
            chronological_age: None,
            billing_customer_id: None,
            created_at: Utc::now(),
        }
    }
}
