// ABOUTME: Longevity composite scorer blending the four domain scores
// ABOUTME: Deterministic pure function with fixed weights and clamped outputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

//! Longevity composite scoring.
//!
//! The composite blends four 0-100 domain scores (sleep average score,
//! workout weekly consistency, weekly nutrition score, supplement
//! optimization score) with fixed weights that existing dashboards depend on
//! exactly. Identical inputs always yield identical outputs, and increasing
//! any one input never lowers the longevity score.
//!
//! While domain stats have not loaded, callers serve
//! [`LongevityMetrics::placeholder`] rather than partially-computed values.

use crate::config::LongevityWeights;
use serde::{Deserialize, Serialize};
use vitalis_core::constants::defaults;

/// The four normalized domain inputs (0-100 each)
///
/// A `None` domain substitutes the documented neutral default of 70.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainScores {
    /// Average sleep score
    pub sleep: Option<f64>,
    /// Workout weekly consistency percent
    pub workout: Option<f64>,
    /// Weekly nutrition score
    pub nutrition: Option<f64>,
    /// Supplement optimization score
    pub supplement: Option<f64>,
}

impl DomainScores {
    /// True when no domain has produced a score yet
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.sleep.is_none()
            && self.workout.is_none()
            && self.nutrition.is_none()
            && self.supplement.is_none()
    }
}

/// Derived longevity metrics
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LongevityMetrics {
    /// Composite longevity score (0-10, one decimal)
    pub longevity_score: f64,
    /// Estimated biological age (years)
    pub biological_age: f64,
    /// Estimated healthspan (years)
    pub healthspan: f64,
    /// Vitality index (0-100)
    pub vitality_index: u8,
}

impl LongevityMetrics {
    /// Fixed placeholder served while domain stats load
    #[must_use]
    pub const fn placeholder() -> Self {
        Self {
            longevity_score: defaults::PLACEHOLDER_LONGEVITY_SCORE,
            biological_age: defaults::PLACEHOLDER_BIOLOGICAL_AGE,
            healthspan: defaults::PLACEHOLDER_HEALTHSPAN,
            vitality_index: defaults::PLACEHOLDER_VITALITY_INDEX,
        }
    }
}

/// Longevity composite calculator
pub struct LongevityCalculator;

impl LongevityCalculator {
    /// Compute the composite metrics from domain scores
    ///
    /// `chronological_age` comes from the user profile when stored; absent,
    /// the product placeholder of 35 applies. The biological-age clamp upper
    /// bound tracks the chronological age (`age + 10`).
    #[must_use]
    pub fn calculate(
        scores: DomainScores,
        chronological_age: Option<u32>,
        weights: &LongevityWeights,
    ) -> LongevityMetrics {
        let sleep = scores.sleep.unwrap_or(defaults::DOMAIN_SCORE).clamp(0.0, 100.0);
        let workout = scores.workout.unwrap_or(defaults::DOMAIN_SCORE).clamp(0.0, 100.0);
        let nutrition = scores
            .nutrition
            .unwrap_or(defaults::DOMAIN_SCORE)
            .clamp(0.0, 100.0);
        let supplement = scores
            .supplement
            .unwrap_or(defaults::DOMAIN_SCORE)
            .clamp(0.0, 100.0);

        let raw = weights.sleep * sleep
            + weights.workout * workout
            + weights.nutrition * nutrition
            + weights.supplement * supplement;

        let longevity_score = round_one_decimal(raw / 10.0).clamp(0.0, 10.0);

        let age = chronological_age
            .map_or(defaults::CHRONOLOGICAL_AGE_YEARS, f64::from);
        let biological_age =
            (age - (longevity_score - 7.0) * 2.0).clamp(20.0, age + 10.0);

        let healthspan = ((longevity_score - 7.0).mul_add(5.0, 80.0)).clamp(70.0, 100.0);

        let vitality_index =
            (0.25 * (sleep + workout + nutrition + supplement)).round().clamp(0.0, 100.0) as u8;

        LongevityMetrics {
            longevity_score,
            biological_age,
            healthspan,
            vitality_index,
        }
    }
}

/// Round to one decimal place
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all(score: f64) -> DomainScores {
        DomainScores {
            sleep: Some(score),
            workout: Some(score),
            nutrition: Some(score),
            supplement: Some(score),
        }
    }

    fn calculate(scores: DomainScores) -> LongevityMetrics {
        LongevityCalculator::calculate(scores, None, &LongevityWeights::default())
    }

    #[test]
    fn test_worked_example_all_eighty() {
        let metrics = calculate(all(80.0));
        assert!((metrics.longevity_score - 8.0).abs() < f64::EPSILON);
        assert!((metrics.biological_age - 33.0).abs() < f64::EPSILON);
        assert!((metrics.healthspan - 85.0).abs() < f64::EPSILON);
        assert_eq!(metrics.vitality_index, 80);
    }

    #[test]
    fn test_worked_example_defaults() {
        // Missing domains substitute 70 and land on the neutral point
        let metrics = calculate(DomainScores::default());
        assert!((metrics.longevity_score - 7.0).abs() < f64::EPSILON);
        assert!((metrics.biological_age - 35.0).abs() < f64::EPSILON);
        assert!((metrics.healthspan - 80.0).abs() < f64::EPSILON);
        assert_eq!(metrics.vitality_index, 70);
    }

    #[test]
    fn test_deterministic() {
        let a = calculate(all(63.7));
        let b = calculate(all(63.7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_monotone_in_each_domain() {
        let base = calculate(all(50.0));
        for bump in 0..4 {
            let mut scores = all(50.0);
            match bump {
                0 => scores.sleep = Some(90.0),
                1 => scores.workout = Some(90.0),
                2 => scores.nutrition = Some(90.0),
                _ => scores.supplement = Some(90.0),
            }
            let bumped = calculate(scores);
            assert!(bumped.longevity_score >= base.longevity_score);
        }
    }

    #[test]
    fn test_clamps_hold_over_input_grid() {
        for sleep in [0.0, 25.0, 50.0, 75.0, 100.0] {
            for workout in [0.0, 50.0, 100.0] {
                for nutrition in [0.0, 50.0, 100.0] {
                    for supplement in [0.0, 50.0, 100.0] {
                        let metrics = calculate(DomainScores {
                            sleep: Some(sleep),
                            workout: Some(workout),
                            nutrition: Some(nutrition),
                            supplement: Some(supplement),
                        });
                        assert!((0.0..=10.0).contains(&metrics.longevity_score));
                        assert!((20.0..=45.0).contains(&metrics.biological_age));
                        assert!((70.0..=100.0).contains(&metrics.healthspan));
                        assert!(metrics.vitality_index <= 100);
                    }
                }
            }
        }
    }

    #[test]
    fn test_stored_age_shifts_biological_age() {
        let metrics = LongevityCalculator::calculate(
            all(80.0),
            Some(50),
            &LongevityWeights::default(),
        );
        // 50 - (8.0 - 7.0) * 2
        assert!((metrics.biological_age - 48.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_placeholder_object() {
        let placeholder = LongevityMetrics::placeholder();
        assert!((placeholder.longevity_score - 7.0).abs() < f64::EPSILON);
        assert!((placeholder.biological_age - 35.0).abs() < f64::EPSILON);
        assert!((placeholder.healthspan - 80.0).abs() < f64::EPSILON);
        assert_eq!(placeholder.vitality_index, 75);
    }
}
