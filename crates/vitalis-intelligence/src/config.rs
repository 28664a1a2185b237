// ABOUTME: Threshold and weight configuration for the intelligence calculators
// ABOUTME: Every calculator reads its constants from these structs, never inline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

//! Calculator configuration.
//!
//! Divergent per-feature policies are modeled explicitly rather than unified:
//! the optimization engine walks sleep streaks at 70, the milestone calculator
//! at 80, and the two consistency definitions are separate named metrics.
//! Collapsing any of these into one shared constant would silently change
//! observable behavior.

use serde::{Deserialize, Serialize};

/// Sleep stats calculator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepStatsConfig {
    /// Bounded window for rolling averages (entries)
    pub rolling_window_entries: usize,
    /// Trailing window for sleep-debt accounting (entries)
    pub weekly_window_entries: usize,
    /// Streak threshold used by the optimization engine
    pub quality_streak_threshold: f64,
    /// Streak threshold used by the milestone/achievement calculator
    pub milestone_streak_threshold: f64,
    /// Bedtime proximity tolerance for timing consistency (minutes)
    pub timing_tolerance_minutes: i64,
    /// Score floor for score-density consistency
    pub score_density_threshold: f64,
    /// Nightly sleep target for debt accounting (hours)
    pub nightly_target_hours: f64,
}

impl Default for SleepStatsConfig {
    fn default() -> Self {
        Self {
            rolling_window_entries: vitalis_core::constants::windows::ROLLING_AVERAGE_ENTRIES,
            weekly_window_entries: vitalis_core::constants::windows::WEEKLY_ENTRIES,
            quality_streak_threshold: 70.0,
            milestone_streak_threshold: 80.0,
            timing_tolerance_minutes: 45,
            score_density_threshold: 70.0,
            nightly_target_hours: vitalis_core::constants::SLEEP_TARGET_HOURS,
        }
    }
}

/// Daily macro targets used for weekly attainment scoring
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacroTargets {
    /// Daily energy target (kcal)
    pub calories: f64,
    /// Daily protein target (grams)
    pub protein: f64,
    /// Daily carbohydrate target (grams)
    pub carbs: f64,
    /// Daily fat target (grams)
    pub fats: f64,
}

impl Default for MacroTargets {
    fn default() -> Self {
        Self {
            calories: 2000.0,
            protein: 100.0,
            carbs: 250.0,
            fats: 70.0,
        }
    }
}

/// Weekly nutrition score configuration
///
/// The three component weights must sum to 1.0; each component is capped at
/// full attainment before weighting, which keeps the blended score monotone
/// non-decreasing in every input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionScoreConfig {
    /// Weight of macro-target attainment
    pub macro_weight: f64,
    /// Weight of micronutrient RDA coverage
    pub micro_weight: f64,
    /// Weight of hydration-goal attainment
    pub hydration_weight: f64,
    /// Daily macro targets
    pub macro_targets: MacroTargets,
    /// Trailing aggregation window (entries)
    pub weekly_window_entries: usize,
}

impl Default for NutritionScoreConfig {
    fn default() -> Self {
        Self {
            macro_weight: 0.5,
            micro_weight: 0.3,
            hydration_weight: 0.2,
            macro_targets: MacroTargets::default(),
            weekly_window_entries: vitalis_core::constants::windows::WEEKLY_ENTRIES,
        }
    }
}

/// Workout stats calculator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutStatsConfig {
    /// Rest days tolerated between sessions without breaking the streak
    pub streak_rest_day_tolerance: i64,
    /// Calendar window for weekly consistency (days)
    pub weekly_window_days: i64,
    /// Bounded window for rolling averages (entries)
    pub rolling_window_entries: usize,
}

impl Default for WorkoutStatsConfig {
    fn default() -> Self {
        Self {
            streak_rest_day_tolerance: 1,
            weekly_window_days: 7,
            rolling_window_entries: vitalis_core::constants::windows::ROLLING_AVERAGE_ENTRIES,
        }
    }
}

/// Supplement stats calculator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplementStatsConfig {
    /// Bounded window for adherence accounting (entries)
    pub window_entries: usize,
    /// Weight of logged-day adherence in the optimization score
    pub adherence_weight: f64,
    /// Weight of the per-entry protocol score in the optimization score
    pub protocol_weight: f64,
}

impl Default for SupplementStatsConfig {
    fn default() -> Self {
        Self {
            window_entries: vitalis_core::constants::windows::ROLLING_AVERAGE_ENTRIES,
            adherence_weight: 0.6,
            protocol_weight: 0.4,
        }
    }
}

/// Fixed weights of the longevity composite
///
/// These are product constants; existing dashboards depend on them exactly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LongevityWeights {
    /// Sleep domain weight
    pub sleep: f64,
    /// Workout domain weight
    pub workout: f64,
    /// Nutrition domain weight
    pub nutrition: f64,
    /// Supplement domain weight
    pub supplement: f64,
}

impl Default for LongevityWeights {
    fn default() -> Self {
        Self {
            sleep: 0.3,
            workout: 0.3,
            nutrition: 0.3,
            supplement: 0.1,
        }
    }
}

/// Per-caller goal completion policy
///
/// The goals API marks a goal achieved at 100%; the dashboard summary uses a
/// softer 90% cut. Callers pick their policy explicitly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GoalStatusPolicy {
    /// Progress percentage at which a goal counts as achieved
    pub achieved_threshold_percent: f64,
}

impl GoalStatusPolicy {
    /// Strict policy used by the goals API (achieved at 100%)
    pub const STANDARD: Self = Self {
        achieved_threshold_percent: 100.0,
    };

    /// Softer policy used by dashboard summaries (achieved at 90%)
    pub const DASHBOARD: Self = Self {
        achieved_threshold_percent: 90.0,
    };
}

impl Default for GoalStatusPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}
