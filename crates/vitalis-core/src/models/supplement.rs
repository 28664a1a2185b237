// ABOUTME: Supplement tracking models for daily dose logs
// ABOUTME: SupplementEntry, SupplementDose, and DoseTiming definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// When a dose was taken relative to the day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DoseTiming {
    /// Morning dose
    Morning,
    /// Afternoon dose
    Afternoon,
    /// Evening dose
    Evening,
    /// Taken alongside a meal
    WithMeal,
    /// Unspecified timing
    Other,
}

/// One supplement dose within a day's log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplementDose {
    /// Supplement name
    pub name: String,
    /// Dose size (milligrams)
    pub dose_mg: f64,
    /// Timing of the dose
    pub timing: DoseTiming,
}

/// One day of tracked supplements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplementEntry {
    /// Calendar date (natural key)
    pub date: NaiveDate,
    /// Doses taken this day
    #[serde(default)]
    pub taken: Vec<SupplementDose>,
    /// Optional per-day adherence score (0-100) from the user's protocol
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adherence_score: Option<f64>,
}

impl SupplementEntry {
    /// Create an entry with the given doses
    #[must_use]
    pub fn new(date: NaiveDate, taken: Vec<SupplementDose>) -> Self {
        Self {
            date,
            taken,
            adherence_score: None,
        }
    }
}
