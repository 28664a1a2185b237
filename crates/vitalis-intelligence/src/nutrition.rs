// ABOUTME: Weekly nutrition aggregation and 0-100 scoring over daily entries
// ABOUTME: Trailing-window sums of macros, micronutrients, and hydration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

//! Weekly nutrition aggregation.
//!
//! History arrives in chronological order (the food diary's convention); the
//! aggregator sums the trailing seven entries and blends macro-target
//! attainment, micronutrient RDA coverage, and hydration attainment into one
//! 0-100 score. Each component is capped at full attainment before weighting,
//! so more goal attainment never lowers the score.

use crate::config::NutritionScoreConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vitalis_core::constants::MICRONUTRIENT_RDA;
use vitalis_core::models::{DailyTotals, Hydration, NutritionEntry};

/// Weekly nutrition aggregate and score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NutritionWeekly {
    /// Field-wise macro sums over the window
    pub weekly_totals: DailyTotals,
    /// Micronutrient sums over the window, keyed by nutrient id
    pub weekly_micronutrients: BTreeMap<String, f64>,
    /// Hydration sums over the window
    pub weekly_hydration: Hydration,
    /// Entries actually aggregated (≤ the window size)
    pub entries_counted: usize,
    /// Blended weekly score (0-100)
    pub weekly_nutrition_score: f64,
}

/// Weekly nutrition aggregator
pub struct NutritionAggregator;

impl NutritionAggregator {
    /// Aggregate the trailing window of a chronological history
    ///
    /// Fewer than seven entries aggregate whatever is available; an entry
    /// missing a field contributes zero. Never errors.
    #[must_use]
    pub fn calculate(history: &[NutritionEntry], config: &NutritionScoreConfig) -> NutritionWeekly {
        if history.is_empty() {
            return NutritionWeekly::default();
        }

        let start = history.len().saturating_sub(config.weekly_window_entries);
        let window = &history[start..];

        let mut weekly_totals = DailyTotals::default();
        let mut weekly_micronutrients: BTreeMap<String, f64> = BTreeMap::new();
        let mut weekly_hydration = Hydration::default();

        for entry in window {
            weekly_totals = weekly_totals.add(&entry.daily_totals);
            for (key, amount) in &entry.micronutrients {
                *weekly_micronutrients.entry(key.clone()).or_insert(0.0) += amount;
            }
            weekly_hydration.water_intake += entry.hydration.water_intake;
            weekly_hydration.target += entry.hydration.target;
        }

        let entries_counted = window.len();
        let weekly_nutrition_score = Self::score(
            &weekly_totals,
            &weekly_micronutrients,
            weekly_hydration,
            entries_counted,
            config,
        );

        NutritionWeekly {
            weekly_totals,
            weekly_micronutrients,
            weekly_hydration,
            entries_counted,
            weekly_nutrition_score,
        }
    }

    /// Blend macro attainment, RDA coverage, and hydration into 0-100
    fn score(
        totals: &DailyTotals,
        micronutrients: &BTreeMap<String, f64>,
        hydration: Hydration,
        days: usize,
        config: &NutritionScoreConfig,
    ) -> f64 {
        if days == 0 {
            return 0.0;
        }
        let days_f = days as f64;
        let targets = config.macro_targets;

        let macro_attainment = [
            (totals.calories, targets.calories),
            (totals.protein, targets.protein),
            (totals.carbs, targets.carbs),
            (totals.fats, targets.fats),
        ]
        .iter()
        .map(|(actual, daily_target)| capped_ratio(*actual, daily_target * days_f))
        .sum::<f64>()
            / 4.0;

        // Coverage averaged over the full RDA table: untracked nutrients
        // count as zero coverage rather than being skipped.
        let micro_coverage = MICRONUTRIENT_RDA
            .iter()
            .map(|(key, rda)| {
                let consumed = micronutrients.get(*key).copied().unwrap_or(0.0);
                capped_ratio(consumed, rda * days_f)
            })
            .sum::<f64>()
            / MICRONUTRIENT_RDA.len() as f64;

        let hydration_attainment = capped_ratio(hydration.water_intake, hydration.target);

        let blended = config.macro_weight * macro_attainment
            + config.micro_weight * micro_coverage
            + config.hydration_weight * hydration_attainment;
        (blended * 100.0).clamp(0.0, 100.0)
    }
}

/// `actual / target` capped at 1.0, 0.0 when the target is not positive
fn capped_ratio(actual: f64, target: f64) -> f64 {
    if target <= 0.0 {
        0.0
    } else {
        (actual / target).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(day: u32, calories: f64) -> NutritionEntry {
        let mut e = NutritionEntry::new(NaiveDate::from_ymd_opt(2025, 6, day).unwrap());
        e.daily_totals.calories = calories;
        e
    }

    #[test]
    fn test_empty_history_is_zero() {
        let weekly = NutritionAggregator::calculate(&[], &NutritionScoreConfig::default());
        assert_eq!(weekly.entries_counted, 0);
        assert!((weekly.weekly_nutrition_score - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_seven_identical_days_sum() {
        let history: Vec<NutritionEntry> = (1..=7).map(|d| entry(d, 2000.0)).collect();
        let weekly = NutritionAggregator::calculate(&history, &NutritionScoreConfig::default());
        assert!((weekly.weekly_totals.calories - 14000.0).abs() < f64::EPSILON);
        assert_eq!(weekly.entries_counted, 7);
    }

    #[test]
    fn test_window_trails_the_history() {
        // Ten days; only the last seven count
        let history: Vec<NutritionEntry> = (1..=10).map(|d| entry(d, 1000.0)).collect();
        let weekly = NutritionAggregator::calculate(&history, &NutritionScoreConfig::default());
        assert!((weekly.weekly_totals.calories - 7000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_short_history_aggregates_what_exists() {
        let history: Vec<NutritionEntry> = (1..=3).map(|d| entry(d, 1800.0)).collect();
        let weekly = NutritionAggregator::calculate(&history, &NutritionScoreConfig::default());
        assert_eq!(weekly.entries_counted, 3);
        assert!((weekly.weekly_totals.calories - 5400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_score_is_monotone_in_each_component() {
        let config = NutritionScoreConfig::default();

        let base: Vec<NutritionEntry> = (1..=7).map(|d| entry(d, 1000.0)).collect();
        let base_score =
            NutritionAggregator::calculate(&base, &config).weekly_nutrition_score;

        // More calories toward target: score must not drop
        let better_macros: Vec<NutritionEntry> = (1..=7).map(|d| entry(d, 2000.0)).collect();
        let macro_score =
            NutritionAggregator::calculate(&better_macros, &config).weekly_nutrition_score;
        assert!(macro_score >= base_score);

        // Adding hydration attainment: score must not drop
        let mut hydrated = better_macros.clone();
        for e in &mut hydrated {
            e.hydration.water_intake = 2.5;
            e.hydration.target = 2.5;
        }
        let hydration_score =
            NutritionAggregator::calculate(&hydrated, &config).weekly_nutrition_score;
        assert!(hydration_score >= macro_score);

        // Adding micronutrient coverage: score must not drop
        let mut covered = hydrated.clone();
        for e in &mut covered {
            e.micronutrients.insert("vitamin_c_mg".to_owned(), 90.0);
        }
        let covered_score =
            NutritionAggregator::calculate(&covered, &config).weekly_nutrition_score;
        assert!(covered_score >= hydration_score);
    }

    #[test]
    fn test_overshoot_does_not_inflate_score() {
        let config = NutritionScoreConfig::default();
        let on_target: Vec<NutritionEntry> = (1..=7).map(|d| entry(d, 2000.0)).collect();
        let overshoot: Vec<NutritionEntry> = (1..=7).map(|d| entry(d, 6000.0)).collect();
        let on_target_score =
            NutritionAggregator::calculate(&on_target, &config).weekly_nutrition_score;
        let overshoot_score =
            NutritionAggregator::calculate(&overshoot, &config).weekly_nutrition_score;
        assert!((on_target_score - overshoot_score).abs() < f64::EPSILON);
    }
}
