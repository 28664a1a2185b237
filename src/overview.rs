// ABOUTME: Loads a user's entries and runs every domain calculator plus the composite
// ABOUTME: Shared by the dashboard, coach, report, and achievement routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

use crate::store::StoreProvider;
use serde::Serialize;
use uuid::Uuid;
use vitalis_core::errors::AppResult;
use vitalis_core::models::{NutritionEntry, SleepEntry, SupplementEntry, WorkoutEntry};
use vitalis_intelligence::{
    DomainScores, LongevityCalculator, LongevityMetrics, LongevityWeights, NutritionAggregator,
    NutritionScoreConfig, NutritionWeekly, SleepStats, SleepStatsCalculator, SleepStatsConfig,
    SupplementStats, SupplementStatsCalculator, SupplementStatsConfig, WorkoutStats,
    WorkoutStatsCalculator, WorkoutStatsConfig,
};

/// Everything the presentation layer needs for one user
///
/// Domain stats are recomputed from the stored entries on every load; nothing
/// derived is persisted. While no domain has any data the composite is the
/// fixed placeholder object rather than a partially-computed value.
#[derive(Debug, Clone, Serialize)]
pub struct UserOverview {
    /// Sleep domain stats
    pub sleep: SleepStats,
    /// Weekly nutrition aggregate and score
    pub nutrition: NutritionWeekly,
    /// Workout domain stats
    pub workouts: WorkoutStats,
    /// Supplement domain stats
    pub supplements: SupplementStats,
    /// Composite longevity metrics
    pub longevity: LongevityMetrics,
    /// Lifetime entry counts per domain (sleep, nutrition, workouts,
    /// supplements) used by goal and achievement progress
    #[serde(skip)]
    pub entry_counts: [usize; 4],
    /// Sleep entries most-recent-first, kept for streak recomputation at
    /// other thresholds
    #[serde(skip)]
    pub sleep_entries: Vec<SleepEntry>,
    /// Nutrition entries most-recent-first
    #[serde(skip)]
    pub nutrition_entries: Vec<NutritionEntry>,
    /// Workout entries most-recent-first
    #[serde(skip)]
    pub workout_entries: Vec<WorkoutEntry>,
    /// Supplement entries most-recent-first
    #[serde(skip)]
    pub supplement_entries: Vec<SupplementEntry>,
}

impl UserOverview {
    /// Load entries and compute all derived stats for a user
    ///
    /// # Errors
    /// Propagates store failures; calculators themselves never fail.
    pub async fn load(store: &dyn StoreProvider, user_id: Uuid) -> AppResult<Self> {
        let sleep_entries = store.sleep_entries(user_id).await?;
        let nutrition_entries = store.nutrition_entries(user_id).await?;
        let workout_entries = store.workout_entries(user_id).await?;
        let supplement_entries = store.supplement_entries(user_id).await?;

        let sleep = SleepStatsCalculator::calculate(&sleep_entries, &SleepStatsConfig::default());
        // The aggregator expects chronological history
        let chronological: Vec<NutritionEntry> =
            nutrition_entries.iter().rev().cloned().collect();
        let nutrition =
            NutritionAggregator::calculate(&chronological, &NutritionScoreConfig::default());
        let workouts =
            WorkoutStatsCalculator::calculate(&workout_entries, &WorkoutStatsConfig::default());
        let supplements = SupplementStatsCalculator::calculate(
            &supplement_entries,
            &SupplementStatsConfig::default(),
        );

        let scores = DomainScores {
            sleep: (!sleep_entries.is_empty()).then_some(sleep.average_sleep_score),
            workout: (!workout_entries.is_empty()).then_some(workouts.weekly_consistency_percent),
            nutrition: (!nutrition_entries.is_empty())
                .then_some(nutrition.weekly_nutrition_score),
            supplement: (!supplement_entries.is_empty())
                .then_some(supplements.optimization_score),
        };

        let longevity = if scores.is_empty() {
            LongevityMetrics::placeholder()
        } else {
            let chronological_age = store
                .get_user(user_id)
                .await?
                .and_then(|profile| profile.chronological_age);
            LongevityCalculator::calculate(
                scores,
                chronological_age,
                &LongevityWeights::default(),
            )
        };

        Ok(Self {
            sleep,
            nutrition,
            workouts,
            supplements,
            longevity,
            entry_counts: [
                sleep_entries.len(),
                nutrition_entries.len(),
                workout_entries.len(),
                supplement_entries.len(),
            ],
            sleep_entries,
            nutrition_entries,
            workout_entries,
            supplement_entries,
        })
    }
}
