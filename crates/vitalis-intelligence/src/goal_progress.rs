// ABOUTME: Goal progress evaluator mapping aggregates to progress and status
// ABOUTME: Pure stateless mapping recomputed on every read, never cached
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

use crate::config::GoalStatusPolicy;
use serde::{Deserialize, Serialize};
use vitalis_core::models::Goal;

/// Status classification of a goal at read time
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    /// Progress has reached the caller's achieved threshold
    Achieved,
    /// Some progress has been made
    InProgress,
    /// No progress yet
    Upcoming,
}

/// Computed progress for one goal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GoalProgress {
    /// Progress percentage, capped at 100
    pub progress_percent: f64,
    /// Status under the caller's policy
    pub status: GoalStatus,
}

/// Goal progress evaluator
pub struct GoalProgressEvaluator;

impl GoalProgressEvaluator {
    /// Evaluate a goal against the current aggregate value
    ///
    /// `policy` is chosen by the caller: the goals API uses
    /// [`GoalStatusPolicy::STANDARD`] (achieved at 100%), the dashboard
    /// summary [`GoalStatusPolicy::DASHBOARD`] (achieved at 90%). A
    /// non-positive target evaluates to zero progress rather than erroring.
    #[must_use]
    pub fn evaluate(goal: &Goal, current_value: f64, policy: GoalStatusPolicy) -> GoalProgress {
        let progress_percent = if goal.target_value <= 0.0 {
            0.0
        } else {
            (current_value / goal.target_value * 100.0).min(100.0)
        };

        let status = if progress_percent >= policy.achieved_threshold_percent {
            GoalStatus::Achieved
        } else if progress_percent > 0.0 {
            GoalStatus::InProgress
        } else {
            GoalStatus::Upcoming
        };

        GoalProgress {
            progress_percent,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use vitalis_core::models::{GoalPriority, HealthDomain};

    fn goal(target: f64) -> Goal {
        Goal {
            id: "g1".to_owned(),
            domain: HealthDomain::Workouts,
            title: "Monthly workouts".to_owned(),
            target_value: target,
            unit: "workouts".to_owned(),
            deadline: None,
            priority: GoalPriority::Medium,
            active: true,
            current_progress: 0.0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_target_reached_is_achieved() {
        let progress =
            GoalProgressEvaluator::evaluate(&goal(150.0), 150.0, GoalStatusPolicy::STANDARD);
        assert!((progress.progress_percent - 100.0).abs() < f64::EPSILON);
        assert_eq!(progress.status, GoalStatus::Achieved);
    }

    #[test]
    fn test_zero_progress_is_upcoming() {
        let progress =
            GoalProgressEvaluator::evaluate(&goal(150.0), 0.0, GoalStatusPolicy::STANDARD);
        assert!((progress.progress_percent - 0.0).abs() < f64::EPSILON);
        assert_eq!(progress.status, GoalStatus::Upcoming);
    }

    #[test]
    fn test_progress_caps_at_one_hundred() {
        let progress =
            GoalProgressEvaluator::evaluate(&goal(100.0), 250.0, GoalStatusPolicy::STANDARD);
        assert!((progress.progress_percent - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_policies_classify_differently_at_ninety() {
        let g = goal(100.0);
        let standard = GoalProgressEvaluator::evaluate(&g, 92.0, GoalStatusPolicy::STANDARD);
        let dashboard = GoalProgressEvaluator::evaluate(&g, 92.0, GoalStatusPolicy::DASHBOARD);
        assert_eq!(standard.status, GoalStatus::InProgress);
        assert_eq!(dashboard.status, GoalStatus::Achieved);
    }

    #[test]
    fn test_non_positive_target_degrades_to_zero() {
        let progress =
            GoalProgressEvaluator::evaluate(&goal(0.0), 10.0, GoalStatusPolicy::STANDARD);
        assert!((progress.progress_percent - 0.0).abs() < f64::EPSILON);
        assert_eq!(progress.status, GoalStatus::Upcoming);
    }
}
