// ABOUTME: Health intelligence engine: domain stats, composite scoring, goals
// ABOUTME: Pure calculators over in-memory entry lists, no I/O
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

//! # Vitalis Intelligence
//!
//! The derived-metrics layer of the Vitalis platform: per-domain stat
//! calculators (sleep, nutrition, workouts, supplements), the longevity
//! composite scorer, the goal progress evaluator, and the achievement
//! engine.
//!
//! Every calculator here is a pure, total function over bounded in-memory
//! entry lists: empty input produces documented defaults, never an error,
//! and no function performs I/O. The server crate owns fetching entries and
//! persisting results.

pub mod achievements;
pub mod config;
pub mod goal_progress;
pub mod longevity;
pub mod nutrition;
pub mod sleep_stats;
pub mod supplement_stats;
pub mod workout_stats;

pub use achievements::{AchievementEngine, AchievementInputs};
pub use config::{
    GoalStatusPolicy, LongevityWeights, MacroTargets, NutritionScoreConfig, SleepStatsConfig,
    SupplementStatsConfig, WorkoutStatsConfig,
};
pub use goal_progress::{GoalProgress, GoalProgressEvaluator, GoalStatus};
pub use longevity::{DomainScores, LongevityCalculator, LongevityMetrics};
pub use nutrition::{NutritionAggregator, NutritionWeekly};
pub use sleep_stats::{SleepStats, SleepStatsCalculator};
pub use supplement_stats::{SupplementStats, SupplementStatsCalculator};
pub use workout_stats::{WorkoutStats, WorkoutStatsCalculator};
