// ABOUTME: Sleep tracking models for nightly entries and AI sleep analysis
// ABOUTME: SleepEntry, SleepStages, and SleepAnalysis definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Time spent in each sleep stage (hours)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct SleepStages {
    /// Deep sleep duration
    pub deep: f64,
    /// REM sleep duration
    pub rem: f64,
    /// Light sleep duration
    pub light: f64,
    /// Time awake during the session
    pub awake: f64,
}

/// AI-generated sleep analysis attached to an entry best-effort
///
/// Produced by the sleep insight analyzer; a failed analysis never blocks
/// saving the entry, so this field is always optional on [`SleepEntry`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepAnalysis {
    /// Narrative assessment of the night
    pub overall_analysis: String,
    /// Factors that most influenced the score
    pub key_factors: Vec<String>,
    /// Actionable suggestions
    pub personalized_tips: Vec<String>,
    /// Detected problems worth watching
    pub potential_issues: Vec<String>,
    /// Analyzer confidence (0.0-1.0)
    pub confidence_score: f64,
}

/// One night of tracked sleep
///
/// Exactly one entry exists per user per calendar date; writes upsert by date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepEntry {
    /// Calendar date of the night (natural key)
    pub date: NaiveDate,
    /// Total sleep duration (hours)
    pub total_sleep: f64,
    /// Composite sleep score (0-100)
    pub sleep_score: f64,
    /// Sleep efficiency: time asleep / time in bed (percent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_efficiency: Option<f64>,
    /// Time the user went to bed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedtime: Option<NaiveTime>,
    /// Time the user woke up
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wake_time: Option<NaiveTime>,
    /// Stage breakdown when the device reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stages: Option<SleepStages>,
    /// Best-effort AI analysis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<SleepAnalysis>,
}

impl SleepEntry {
    /// Create a minimal entry with only the required fields
    #[must_use]
    pub fn new(date: NaiveDate, total_sleep: f64, sleep_score: f64) -> Self {
        Self {
            date,
            total_sleep,
            sleep_score,
            sleep_efficiency: None,
            bedtime: None,
            wake_time: None,
            stages: None,
            ai_analysis: None,
        }
    }
}
