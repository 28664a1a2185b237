// ABOUTME: Data models for dated health entries, goals, achievements, and profiles
// ABOUTME: Shared HealthDomain enum and per-domain model submodules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

//! Core data models for the Vitalis platform.
//!
//! Every tracked domain stores one entry per user per calendar date; the date
//! is the natural key. Entries serialize as JSON trees compatible with a
//! hosted realtime document store.

use serde::{Deserialize, Serialize};

pub mod achievement;
pub mod goal;
pub mod nutrition;
pub mod sleep;
pub mod supplement;
pub mod user;
pub mod workout;

pub use achievement::Achievement;
pub use goal::{Goal, GoalPriority};
pub use nutrition::{DailyTotals, FoodItem, Hydration, Meal, MealType, NutritionEntry};
pub use sleep::{SleepAnalysis, SleepEntry, SleepStages};
pub use supplement::{DoseTiming, SupplementDose, SupplementEntry};
pub use user::UserProfile;
pub use workout::{WorkoutEntry, WorkoutIntensity};

/// Tracked health domain
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HealthDomain {
    /// Sleep tracking
    Sleep,
    /// Nutrition tracking
    Nutrition,
    /// Workout tracking
    Workouts,
    /// Supplement tracking
    Supplements,
}

impl HealthDomain {
    /// Parse a domain from its URL path segment
    #[must_use]
    pub fn from_path_segment(s: &str) -> Option<Self> {
        match s {
            "sleep" => Some(Self::Sleep),
            "nutrition" => Some(Self::Nutrition),
            "workouts" => Some(Self::Workouts),
            "supplements" => Some(Self::Supplements),
            _ => None,
        }
    }

    /// Path segment used in the REST API and the store layout
    #[must_use]
    pub const fn as_path_segment(&self) -> &'static str {
        match self {
            Self::Sleep => "sleep",
            Self::Nutrition => "nutrition",
            Self::Workouts => "workouts",
            Self::Supplements => "supplements",
        }
    }
}

impl std::fmt::Display for HealthDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_path_segment())
    }
}
