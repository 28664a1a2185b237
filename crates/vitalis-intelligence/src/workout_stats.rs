// ABOUTME: Workout stats calculator producing totals, streaks, and weekly consistency
// ABOUTME: Pure aggregation over dated workout entries ordered most-recent-first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

use crate::config::WorkoutStatsConfig;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use vitalis_core::models::WorkoutEntry;

/// Summary statistics over a user's recent workouts
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct WorkoutStats {
    /// Completed workouts in the rolling window
    pub total_workouts: u32,
    /// Total training time in the rolling window (minutes)
    pub total_minutes: f64,
    /// Mean session duration (minutes)
    pub average_duration: f64,
    /// Mean energy expenditure over sessions that report it (kcal)
    pub average_calories_burned: f64,
    /// Consecutive completed sessions walking back from the newest, allowing
    /// the configured number of rest days between sessions
    pub current_streak: u32,
    /// Percent of the trailing calendar week with a completed workout —
    /// the workout input of the longevity composite
    pub weekly_consistency_percent: f64,
}

/// Workout stats calculator
pub struct WorkoutStatsCalculator;

impl WorkoutStatsCalculator {
    /// Calculate summary stats from entries ordered most-recent-first
    #[must_use]
    pub fn calculate(entries: &[WorkoutEntry], config: &WorkoutStatsConfig) -> WorkoutStats {
        let completed: Vec<&WorkoutEntry> = entries
            .iter()
            .take(config.rolling_window_entries)
            .filter(|e| e.completed)
            .collect();
        if completed.is_empty() {
            return WorkoutStats::default();
        }

        let total_workouts = completed.len() as u32;
        let total_minutes: f64 = completed.iter().map(|e| e.duration_minutes).sum();
        let average_duration = total_minutes / completed.len() as f64;

        let calories: Vec<f64> = completed.iter().filter_map(|e| e.calories_burned).collect();
        let average_calories_burned = if calories.is_empty() {
            0.0
        } else {
            calories.iter().sum::<f64>() / calories.len() as f64
        };

        let current_streak = Self::streak(&completed, config.streak_rest_day_tolerance);

        let newest = completed[0].date;
        let week_start = newest - Duration::days(config.weekly_window_days - 1);
        let mut active_days: Vec<chrono::NaiveDate> = completed
            .iter()
            .filter(|e| e.date >= week_start)
            .map(|e| e.date)
            .collect();
        active_days.dedup();
        let weekly_consistency_percent =
            active_days.len() as f64 / config.weekly_window_days as f64 * 100.0;

        WorkoutStats {
            total_workouts,
            total_minutes,
            average_duration,
            average_calories_burned,
            current_streak,
            weekly_consistency_percent,
        }
    }

    /// Consecutive-session streak with rest-day tolerance
    ///
    /// A gap of `tolerance + 1` calendar days between successive completed
    /// sessions (one allowed rest day at the default) continues the streak;
    /// anything longer ends it.
    fn streak(completed_desc: &[&WorkoutEntry], tolerance: i64) -> u32 {
        let mut streak = 1u32;
        for pair in completed_desc.windows(2) {
            let gap = (pair[0].date - pair[1].date).num_days();
            if gap <= tolerance + 1 {
                streak += 1;
            } else {
                break;
            }
        }
        streak
    }
}
