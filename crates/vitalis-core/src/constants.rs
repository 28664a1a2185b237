// ABOUTME: Shared constants for scoring defaults, windows, and nutrient references
// ABOUTME: Single source for values used across the intelligence and server crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

//! Platform-wide constants.
//!
//! Threshold tables that belong to a single calculator live in that
//! calculator's config struct; only values shared across crates live here.

/// Scoring defaults used while domain stats are loading or absent
pub mod defaults {
    /// Neutral domain score substituted when a domain has no data yet (0-100)
    pub const DOMAIN_SCORE: f64 = 70.0;

    /// Chronological age placeholder when the profile has no stored age
    pub const CHRONOLOGICAL_AGE_YEARS: f64 = 35.0;

    /// Placeholder longevity score shown while stats load
    pub const PLACEHOLDER_LONGEVITY_SCORE: f64 = 7.0;

    /// Placeholder biological age shown while stats load
    pub const PLACEHOLDER_BIOLOGICAL_AGE: f64 = 35.0;

    /// Placeholder healthspan shown while stats load
    pub const PLACEHOLDER_HEALTHSPAN: f64 = 80.0;

    /// Placeholder vitality index shown while stats load
    pub const PLACEHOLDER_VITALITY_INDEX: u8 = 75;
}

/// Aggregation window sizes (entry counts, not calendar days)
pub mod windows {
    /// Trailing window for weekly nutrition aggregation
    pub const WEEKLY_ENTRIES: usize = 7;

    /// Bounded window for rolling domain averages
    pub const ROLLING_AVERAGE_ENTRIES: usize = 30;
}

/// Nightly sleep target used for sleep-debt accounting (hours)
pub const SLEEP_TARGET_HOURS: f64 = 8.0;

/// Daily reference intakes for tracked micronutrients
///
/// Values follow the FDA adult Daily Value table. Keys match the
/// `micronutrients` map keys produced by the food parser.
pub const MICRONUTRIENT_RDA: &[(&str, f64)] = &[
    ("vitamin_a_mcg", 900.0),
    ("vitamin_c_mg", 90.0),
    ("vitamin_d_mcg", 20.0),
    ("vitamin_e_mg", 15.0),
    ("vitamin_k_mcg", 120.0),
    ("vitamin_b6_mg", 1.7),
    ("vitamin_b12_mcg", 2.4),
    ("folate_mcg", 400.0),
    ("calcium_mg", 1300.0),
    ("iron_mg", 18.0),
    ("magnesium_mg", 420.0),
    ("potassium_mg", 4700.0),
    ("zinc_mg", 11.0),
];

/// Look up the reference daily intake for a micronutrient key
#[must_use]
pub fn micronutrient_rda(key: &str) -> Option<f64> {
    MICRONUTRIENT_RDA
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, rda)| *rda)
}

/// Service name constants for logging
pub mod service_names {
    /// Primary server binary
    pub const VITALIS_SERVER: &str = "vitalis-server";
}
