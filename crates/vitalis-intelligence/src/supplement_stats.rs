// ABOUTME: Supplement stats calculator producing adherence and optimization score
// ABOUTME: Pure aggregation over dated supplement entries ordered most-recent-first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

use crate::config::SupplementStatsConfig;
use serde::{Deserialize, Serialize};
use vitalis_core::models::SupplementEntry;

/// Summary statistics over a user's recent supplement logs
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SupplementStats {
    /// Entries in the accounting window
    pub tracked_days: u32,
    /// Mean doses per tracked day
    pub average_doses_per_day: f64,
    /// Percent of tracked days with at least one dose
    pub adherence_percent: f64,
    /// Blended 0-100 score — the supplement input of the longevity composite
    pub optimization_score: f64,
}

/// Supplement stats calculator
pub struct SupplementStatsCalculator;

impl SupplementStatsCalculator {
    /// Calculate summary stats from entries ordered most-recent-first
    ///
    /// The optimization score blends logged-day adherence with the mean
    /// per-entry protocol score when entries carry one; without protocol
    /// scores the full weight falls on adherence. Both components are
    /// 0-100 and capped, so the blend is monotone.
    #[must_use]
    pub fn calculate(entries: &[SupplementEntry], config: &SupplementStatsConfig) -> SupplementStats {
        if entries.is_empty() {
            return SupplementStats::default();
        }

        let window = &entries[..entries.len().min(config.window_entries)];
        let tracked_days = window.len() as u32;

        let total_doses: usize = window.iter().map(|e| e.taken.len()).sum();
        let average_doses_per_day = total_doses as f64 / window.len() as f64;

        let adherent_days = window.iter().filter(|e| !e.taken.is_empty()).count();
        let adherence_percent = adherent_days as f64 / window.len() as f64 * 100.0;

        let protocol_scores: Vec<f64> = window
            .iter()
            .filter_map(|e| e.adherence_score)
            .map(|s| s.clamp(0.0, 100.0))
            .collect();

        let blended = if protocol_scores.is_empty() {
            adherence_percent
        } else {
            let protocol_mean =
                protocol_scores.iter().sum::<f64>() / protocol_scores.len() as f64;
            config.adherence_weight * adherence_percent + config.protocol_weight * protocol_mean
        };
        let optimization_score = blended.clamp(0.0, 100.0);

        SupplementStats {
            tracked_days,
            average_doses_per_day,
            adherence_percent,
            optimization_score,
        }
    }
}
