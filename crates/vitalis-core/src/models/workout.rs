// ABOUTME: Workout tracking models for logged training sessions
// ABOUTME: WorkoutEntry and WorkoutIntensity definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Subjective workout intensity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutIntensity {
    /// Low intensity (recovery, mobility)
    Low,
    /// Moderate intensity
    Moderate,
    /// High intensity
    High,
}

/// One day's logged workout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutEntry {
    /// Calendar date (natural key)
    pub date: NaiveDate,
    /// Workout type (run, strength, yoga, ...)
    pub workout_type: String,
    /// Session duration (minutes)
    pub duration_minutes: f64,
    /// Estimated energy expenditure (kcal)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<f64>,
    /// Session intensity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<WorkoutIntensity>,
    /// Whether the planned session was completed
    pub completed: bool,
}

impl WorkoutEntry {
    /// Create a completed entry with the required fields
    #[must_use]
    pub fn new(date: NaiveDate, workout_type: impl Into<String>, duration_minutes: f64) -> Self {
        Self {
            date,
            workout_type: workout_type.into(),
            duration_minutes,
            calories_burned: None,
            intensity: None,
            completed: true,
        }
    }
}
