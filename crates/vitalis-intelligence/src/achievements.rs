// ABOUTME: Achievement catalogue and unlock/progress refresh engine
// ABOUTME: Idempotent initialization plus unlock-once progress updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

//! Achievement tracking.
//!
//! The catalogue is fixed at build time with stable ids. Per-user records are
//! created once at zero progress, then refreshed in place as entries
//! accumulate. Unlocks are sticky: progress dropping below a requirement
//! never re-locks an achievement, and `unlocked_at` is stamped only on the
//! first unlock.
//!
//! Milestone streaks use the 80-point sleep threshold, distinct from the
//! 70-point threshold the optimization engine uses.

use chrono::{DateTime, Utc};
use tracing::debug;
use vitalis_core::models::{Achievement, HealthDomain};

/// Aggregate inputs the refresh pass reads
///
/// Computed by the caller from domain stats and entry lists; the engine
/// itself never touches the store.
#[derive(Debug, Clone, Copy, Default)]
pub struct AchievementInputs {
    /// Current sleep streak at the milestone threshold (80)
    pub sleep_milestone_streak: u32,
    /// Lifetime sleep entries
    pub total_sleep_entries: u32,
    /// Lifetime completed workouts
    pub total_workouts: u32,
    /// Lifetime nutrition entries
    pub total_nutrition_entries: u32,
    /// Days the hydration target was met
    pub hydration_target_days: u32,
    /// Days with at least one supplement dose
    pub supplement_adherent_days: u32,
}

/// Achievement engine
pub struct AchievementEngine;

impl AchievementEngine {
    /// The built-in catalogue, zeroed for a new user
    #[must_use]
    pub fn catalogue() -> Vec<Achievement> {
        fn locked(
            id: &str,
            title: &str,
            description: &str,
            domain: HealthDomain,
            requirement: f64,
        ) -> Achievement {
            Achievement {
                id: id.to_owned(),
                title: title.to_owned(),
                description: description.to_owned(),
                domain,
                requirement,
                current_progress: 0.0,
                is_unlocked: false,
                unlocked_at: None,
            }
        }

        vec![
            locked(
                "sleep_streak_7",
                "Well Rested",
                "Score 80+ sleep for 7 nights in a row",
                HealthDomain::Sleep,
                7.0,
            ),
            locked(
                "sleep_streak_30",
                "Deep Habit",
                "Score 80+ sleep for 30 nights in a row",
                HealthDomain::Sleep,
                30.0,
            ),
            locked(
                "sleep_entries_100",
                "Night Owl Scientist",
                "Track 100 nights of sleep",
                HealthDomain::Sleep,
                100.0,
            ),
            locked(
                "workouts_10",
                "Getting Moving",
                "Complete 10 workouts",
                HealthDomain::Workouts,
                10.0,
            ),
            locked(
                "workouts_50",
                "Committed",
                "Complete 50 workouts",
                HealthDomain::Workouts,
                50.0,
            ),
            locked(
                "nutrition_entries_30",
                "Food Journaler",
                "Log 30 days of nutrition",
                HealthDomain::Nutrition,
                30.0,
            ),
            locked(
                "hydration_30",
                "Well Watered",
                "Hit your hydration target 30 times",
                HealthDomain::Nutrition,
                30.0,
            ),
            locked(
                "supplements_14",
                "Protocol Keeper",
                "Take supplements 14 days",
                HealthDomain::Supplements,
                14.0,
            ),
        ]
    }

    /// Refresh progress in place, unlocking newly-earned achievements
    ///
    /// Returns the ids unlocked by this pass.
    pub fn refresh(
        achievements: &mut [Achievement],
        inputs: &AchievementInputs,
        now: DateTime<Utc>,
    ) -> Vec<String> {
        let mut newly_unlocked = Vec::new();
        for achievement in achievements.iter_mut() {
            let progress = match achievement.id.as_str() {
                "sleep_streak_7" | "sleep_streak_30" => f64::from(inputs.sleep_milestone_streak),
                "sleep_entries_100" => f64::from(inputs.total_sleep_entries),
                "workouts_10" | "workouts_50" => f64::from(inputs.total_workouts),
                "nutrition_entries_30" => f64::from(inputs.total_nutrition_entries),
                "hydration_30" => f64::from(inputs.hydration_target_days),
                "supplements_14" => f64::from(inputs.supplement_adherent_days),
                _ => continue,
            };
            achievement.current_progress = progress;
            if !achievement.is_unlocked && progress >= achievement.requirement {
                debug!(id = %achievement.id, progress, "achievement unlocked");
                achievement.is_unlocked = true;
                achievement.unlocked_at = Some(now);
                newly_unlocked.push(achievement.id.clone());
            }
        }
        newly_unlocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_ids_are_unique() {
        let catalogue = AchievementEngine::catalogue();
        let mut ids: Vec<&str> = catalogue.iter().map(|a| a.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalogue.len());
    }

    #[test]
    fn test_refresh_unlocks_at_requirement() {
        let mut achievements = AchievementEngine::catalogue();
        let inputs = AchievementInputs {
            sleep_milestone_streak: 7,
            ..AchievementInputs::default()
        };
        let unlocked = AchievementEngine::refresh(&mut achievements, &inputs, Utc::now());
        assert_eq!(unlocked, vec!["sleep_streak_7".to_owned()]);

        let record = achievements
            .iter()
            .find(|a| a.id == "sleep_streak_7")
            .unwrap();
        assert!(record.is_unlocked);
        assert!(record.unlocked_at.is_some());
    }

    #[test]
    fn test_unlock_is_sticky_and_timestamp_stable() {
        let mut achievements = AchievementEngine::catalogue();
        let first_pass = Utc::now();
        AchievementEngine::refresh(
            &mut achievements,
            &AchievementInputs {
                sleep_milestone_streak: 7,
                ..AchievementInputs::default()
            },
            first_pass,
        );
        let stamped = achievements
            .iter()
            .find(|a| a.id == "sleep_streak_7")
            .unwrap()
            .unlocked_at;

        // Streak broke; progress drops but the unlock stays
        let unlocked = AchievementEngine::refresh(
            &mut achievements,
            &AchievementInputs::default(),
            Utc::now(),
        );
        assert!(unlocked.is_empty());
        let record = achievements
            .iter()
            .find(|a| a.id == "sleep_streak_7")
            .unwrap();
        assert!(record.is_unlocked);
        assert_eq!(record.unlocked_at, stamped);
        assert!((record.current_progress - 0.0).abs() < f64::EPSILON);
    }
}
