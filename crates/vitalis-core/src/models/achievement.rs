// ABOUTME: Achievement progress records keyed by a predefined catalogue id
// ABOUTME: Achievement definition with unlock-once semantics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

use super::HealthDomain;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unlock/progress record for one catalogue achievement
///
/// Created once per user by catalogue initialization, then mutated in place
/// as entries accumulate. Once `is_unlocked` is set it is never cleared and
/// `unlocked_at` is never re-stamped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    /// Stable catalogue id (e.g. `sleep_streak_7`)
    pub id: String,
    /// Display title
    pub title: String,
    /// Display description
    pub description: String,
    /// Domain the achievement tracks
    pub domain: HealthDomain,
    /// Progress required to unlock
    pub requirement: f64,
    /// Current progress toward the requirement
    pub current_progress: f64,
    /// Whether the achievement has been unlocked
    pub is_unlocked: bool,
    /// When the achievement was first unlocked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Achievement {
    /// Fraction of the requirement reached, capped at 1.0
    #[must_use]
    pub fn completion_ratio(&self) -> f64 {
        if self.requirement <= 0.0 {
            return 0.0;
        }
        (self.current_progress / self.requirement).min(1.0)
    }
}
