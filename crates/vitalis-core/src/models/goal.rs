// ABOUTME: Goal models for per-domain targets with computed-on-read progress
// ABOUTME: Goal and GoalPriority definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

use super::HealthDomain;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Goal priority ordering for display
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum GoalPriority {
    /// Low priority
    Low,
    /// Medium priority
    Medium,
    /// High priority
    High,
}

/// A user-defined target for one health domain
///
/// Progress percentage and status are computed on read from the current
/// aggregate value; only `current_progress` (a denormalized counter for
/// streak-style goals) is ever persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    /// Goal id (uuid string)
    pub id: String,
    /// Domain the goal belongs to
    pub domain: HealthDomain,
    /// Display title
    pub title: String,
    /// Target value in `unit`
    pub target_value: f64,
    /// Unit of the target (hours, kcal, workouts, ...)
    pub unit: String,
    /// Optional deadline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    /// Display priority
    pub priority: GoalPriority,
    /// Whether the goal is active
    pub active: bool,
    /// Denormalized progress counter for streak-style goals
    #[serde(default)]
    pub current_progress: f64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
