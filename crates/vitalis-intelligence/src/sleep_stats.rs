// ABOUTME: Sleep stats calculator producing averages, streaks, consistency, and debt
// ABOUTME: Pure aggregation over dated sleep entries ordered most-recent-first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

//! Sleep statistics.
//!
//! Input lists are ordered most-recent-first, matching the store convention.
//! All operations are total: an empty list yields all-zero stats and every
//! division guards its denominator.
//!
//! Two consistency metrics coexist on purpose (see [`crate::config`]):
//! `consistency_by_timing` measures bedtime regularity against the user's
//! median bedtime, `consistency_by_score_density` measures how often the
//! sleep score clears the quality bar. Different dashboard features bind to
//! different metrics.

use crate::config::SleepStatsConfig;
use chrono::{Duration, Timelike};
use serde::{Deserialize, Serialize};
use vitalis_core::models::SleepEntry;

/// Summary statistics over a user's recent sleep entries
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SleepStats {
    /// Mean nightly sleep over the rolling window (hours)
    pub average_sleep_duration: f64,
    /// Mean sleep score over the rolling window (0-100)
    pub average_sleep_score: f64,
    /// Mean efficiency over entries that report it (percent)
    pub average_efficiency: f64,
    /// Mean deep sleep over entries that report stages (hours)
    pub average_deep_sleep: f64,
    /// Bedtime-regularity consistency (percent of windowed entries within
    /// tolerance of the median bedtime)
    pub consistency_by_timing: f64,
    /// Score-density consistency (percent of windowed entries at or above
    /// the quality bar)
    pub consistency_by_score_density: f64,
    /// Consecutive most-recent entries at or above the quality streak
    /// threshold
    pub current_streak: u32,
    /// Entries dated within the last 7 calendar days of the newest entry
    pub this_week_entries: u32,
    /// Cumulative shortfall against the nightly target over the weekly
    /// window, floored at zero (hours)
    pub sleep_debt: f64,
}

/// Sleep stats calculator
pub struct SleepStatsCalculator;

impl SleepStatsCalculator {
    /// Calculate summary stats from entries ordered most-recent-first
    ///
    /// Uses the optimization-engine streak threshold from `config`; callers
    /// that need the milestone threshold (achievements) call
    /// [`Self::streak_with_threshold`] directly.
    #[must_use]
    pub fn calculate(entries: &[SleepEntry], config: &SleepStatsConfig) -> SleepStats {
        if entries.is_empty() {
            return SleepStats::default();
        }

        let window = &entries[..entries.len().min(config.rolling_window_entries)];

        let average_sleep_duration = mean(window.iter().map(|e| e.total_sleep));
        let average_sleep_score = mean(window.iter().map(|e| e.sleep_score));
        let average_efficiency = mean(window.iter().filter_map(|e| e.sleep_efficiency));
        let average_deep_sleep = mean(window.iter().filter_map(|e| e.stages.map(|s| s.deep)));

        let current_streak =
            Self::streak_with_threshold(entries, config.quality_streak_threshold);

        let consistency_by_timing = Self::consistency_by_timing(window, config);
        let consistency_by_score_density =
            Self::consistency_by_score_density(window, config.score_density_threshold);

        let newest = entries[0].date;
        let week_start = newest - Duration::days(6);
        let this_week_entries = entries.iter().filter(|e| e.date >= week_start).count() as u32;

        let debt_window = &entries[..entries.len().min(config.weekly_window_entries)];
        let actual: f64 = debt_window.iter().map(|e| e.total_sleep).sum();
        let target = config.nightly_target_hours * debt_window.len() as f64;
        let sleep_debt = (target - actual).max(0.0);

        SleepStats {
            average_sleep_duration,
            average_sleep_score,
            average_efficiency,
            average_deep_sleep,
            consistency_by_timing,
            consistency_by_score_density,
            current_streak,
            this_week_entries,
            sleep_debt,
        }
    }

    /// Count consecutive most-recent entries with `sleep_score >= threshold`
    ///
    /// Walks from the most recent entry backward and stops at the first miss.
    /// The threshold is a per-feature policy: 70 for the optimization engine,
    /// 80 for milestone tracking.
    #[must_use]
    pub fn streak_with_threshold(entries: &[SleepEntry], threshold: f64) -> u32 {
        entries
            .iter()
            .take_while(|e| e.sleep_score >= threshold)
            .count() as u32
    }

    /// Percent of windowed entries whose bedtime falls within tolerance of
    /// the median bedtime
    ///
    /// Entries without a bedtime are excluded from both numerator and
    /// denominator. Bedtimes are measured in minutes from noon so nights
    /// that cross midnight stay adjacent to late-evening nights.
    fn consistency_by_timing(window: &[SleepEntry], config: &SleepStatsConfig) -> f64 {
        let mut minutes: Vec<i64> = window
            .iter()
            .filter_map(|e| e.bedtime)
            .map(|t| {
                let from_midnight = i64::from(t.hour()) * 60 + i64::from(t.minute());
                (from_midnight + 720) % 1440
            })
            .collect();
        if minutes.is_empty() {
            return 0.0;
        }

        minutes.sort_unstable();
        let median = minutes[minutes.len() / 2];

        let within = minutes
            .iter()
            .filter(|m| (*m - median).abs() <= config.timing_tolerance_minutes)
            .count();
        within as f64 / minutes.len() as f64 * 100.0
    }

    /// Percent of windowed entries at or above the quality bar
    fn consistency_by_score_density(window: &[SleepEntry], threshold: f64) -> f64 {
        if window.is_empty() {
            return 0.0;
        }
        let above = window.iter().filter(|e| e.sleep_score >= threshold).count();
        above as f64 / window.len() as f64 * 100.0
    }
}

/// Mean of an iterator, 0.0 when empty
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn entry(day: u32, score: f64, hours: f64) -> SleepEntry {
        SleepEntry::new(
            NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
            hours,
            score,
        )
    }

    /// Most-recent-first list: newest entries have the highest day number
    fn entries_desc(scores: &[f64]) -> Vec<SleepEntry> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| entry(28 - i as u32, score, 7.5))
            .collect()
    }

    #[test]
    fn test_empty_entries_yield_zero_stats() {
        let stats = SleepStatsCalculator::calculate(&[], &SleepStatsConfig::default());
        assert_eq!(stats, SleepStats::default());
    }

    #[test]
    fn test_streak_stops_at_first_miss() {
        let entries = entries_desc(&[90.0, 85.0, 60.0, 95.0]);
        assert_eq!(
            SleepStatsCalculator::streak_with_threshold(&entries, 70.0),
            2
        );
    }

    #[test]
    fn test_streak_thresholds_diverge() {
        let entries = entries_desc(&[85.0, 75.0, 90.0]);
        // Optimization threshold counts all three; milestone threshold stops
        // at the 75.
        assert_eq!(
            SleepStatsCalculator::streak_with_threshold(&entries, 70.0),
            3
        );
        assert_eq!(
            SleepStatsCalculator::streak_with_threshold(&entries, 80.0),
            1
        );
    }

    #[test]
    fn test_sleep_debt_floors_at_zero() {
        let config = SleepStatsConfig::default();
        // 7 nights of 9h sleep is a surplus, not negative debt
        let surplus: Vec<SleepEntry> = (0..7).map(|i| entry(20 - i, 80.0, 9.0)).collect();
        let stats = SleepStatsCalculator::calculate(&surplus, &config);
        assert!((stats.sleep_debt - 0.0).abs() < f64::EPSILON);

        // 7 nights of 6h sleep owes 14h
        let deficit: Vec<SleepEntry> = (0..7).map(|i| entry(20 - i, 80.0, 6.0)).collect();
        let stats = SleepStatsCalculator::calculate(&deficit, &config);
        assert!((stats.sleep_debt - 14.0).abs() < 1e-9);
    }

    #[test]
    fn test_averages_skip_missing_fields() {
        let mut entries = entries_desc(&[80.0, 80.0]);
        entries[0].sleep_efficiency = Some(90.0);
        // entries[1] has no efficiency; the average must not treat it as zero
        let stats = SleepStatsCalculator::calculate(&entries, &SleepStatsConfig::default());
        assert!((stats.average_efficiency - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_this_week_counts_calendar_window() {
        let mut entries = entries_desc(&[80.0, 80.0, 80.0]);
        // Push one entry far into the past
        entries.push(entry(1, 80.0, 7.0));
        let stats = SleepStatsCalculator::calculate(&entries, &SleepStatsConfig::default());
        assert_eq!(stats.this_week_entries, 3);
    }

    #[test]
    fn test_timing_consistency_handles_midnight_crossers() {
        let config = SleepStatsConfig::default();
        let mut entries = entries_desc(&[80.0, 80.0, 80.0]);
        entries[0].bedtime = NaiveTime::from_hms_opt(23, 30, 0);
        entries[1].bedtime = NaiveTime::from_hms_opt(0, 10, 0); // past midnight
        entries[2].bedtime = NaiveTime::from_hms_opt(23, 50, 0);
        let stats = SleepStatsCalculator::calculate(&entries, &config);
        // All three cluster within 45 minutes of the median when measured
        // across midnight.
        assert!((stats.consistency_by_timing - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_score_density_consistency() {
        let entries = entries_desc(&[90.0, 50.0, 80.0, 60.0]);
        let stats = SleepStatsCalculator::calculate(&entries, &SleepStatsConfig::default());
        assert!((stats.consistency_by_score_density - 50.0).abs() < f64::EPSILON);
    }
}
