// ABOUTME: In-memory store backend for development and tests
// ABOUTME: DashMap-backed document tree with per-user broadcast channels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

use super::{ChangeChannels, ChangeEvent, ChangeKind, StoreProvider};
use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use std::collections::BTreeMap;
use tokio::sync::broadcast;
use uuid::Uuid;
use vitalis_core::errors::AppResult;
use vitalis_core::models::{
    Achievement, Goal, HealthDomain, NutritionEntry, SleepEntry, SupplementEntry, UserProfile,
    WorkoutEntry,
};

/// In-memory store for local development and tests
///
/// Dated entries are kept in per-user `BTreeMap`s keyed by date, so listing
/// most-recent-first is a reverse iteration. All operations are infallible;
/// the `AppResult` signatures exist only to satisfy the provider contract.
#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<Uuid, UserProfile>,
    sleep: DashMap<Uuid, BTreeMap<NaiveDate, SleepEntry>>,
    nutrition: DashMap<Uuid, BTreeMap<NaiveDate, NutritionEntry>>,
    workouts: DashMap<Uuid, BTreeMap<NaiveDate, WorkoutEntry>>,
    supplements: DashMap<Uuid, BTreeMap<NaiveDate, SupplementEntry>>,
    goals: DashMap<Uuid, BTreeMap<String, Goal>>,
    achievements: DashMap<Uuid, Vec<Achievement>>,
    channels: ChangeChannels,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn publish(
        &self,
        user_id: Uuid,
        domain: Option<HealthDomain>,
        date: Option<NaiveDate>,
        kind: ChangeKind,
    ) {
        self.channels.publish(ChangeEvent {
            user_id,
            domain,
            date,
            kind,
        });
    }

    fn list_desc<E: Clone>(map: &DashMap<Uuid, BTreeMap<NaiveDate, E>>, user_id: Uuid) -> Vec<E> {
        map.get(&user_id)
            .map(|entries| entries.values().rev().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl StoreProvider for MemoryStore {
    async fn create_user(&self, profile: &UserProfile) -> AppResult<()> {
        self.users.insert(profile.id, profile.clone());
        Ok(())
    }

    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        Ok(self.users.get(&user_id).map(|u| u.clone()))
    }

    async fn update_billing_customer(&self, user_id: Uuid, customer_id: &str) -> AppResult<()> {
        if let Some(mut user) = self.users.get_mut(&user_id) {
            user.billing_customer_id = Some(customer_id.to_owned());
        }
        Ok(())
    }

    async fn sleep_entries(&self, user_id: Uuid) -> AppResult<Vec<SleepEntry>> {
        Ok(Self::list_desc(&self.sleep, user_id))
    }

    async fn upsert_sleep_entry(&self, user_id: Uuid, entry: &SleepEntry) -> AppResult<()> {
        self.sleep
            .entry(user_id)
            .or_default()
            .insert(entry.date, entry.clone());
        self.publish(
            user_id,
            Some(HealthDomain::Sleep),
            Some(entry.date),
            ChangeKind::Upserted,
        );
        Ok(())
    }

    async fn delete_sleep_entry(&self, user_id: Uuid, date: NaiveDate) -> AppResult<()> {
        if let Some(mut entries) = self.sleep.get_mut(&user_id) {
            entries.remove(&date);
        }
        self.publish(
            user_id,
            Some(HealthDomain::Sleep),
            Some(date),
            ChangeKind::Deleted,
        );
        Ok(())
    }

    async fn nutrition_entries(&self, user_id: Uuid) -> AppResult<Vec<NutritionEntry>> {
        Ok(Self::list_desc(&self.nutrition, user_id))
    }

    async fn upsert_nutrition_entry(
        &self,
        user_id: Uuid,
        entry: &NutritionEntry,
    ) -> AppResult<()> {
        self.nutrition
            .entry(user_id)
            .or_default()
            .insert(entry.date, entry.clone());
        self.publish(
            user_id,
            Some(HealthDomain::Nutrition),
            Some(entry.date),
            ChangeKind::Upserted,
        );
        Ok(())
    }

    async fn delete_nutrition_entry(&self, user_id: Uuid, date: NaiveDate) -> AppResult<()> {
        if let Some(mut entries) = self.nutrition.get_mut(&user_id) {
            entries.remove(&date);
        }
        self.publish(
            user_id,
            Some(HealthDomain::Nutrition),
            Some(date),
            ChangeKind::Deleted,
        );
        Ok(())
    }

    async fn workout_entries(&self, user_id: Uuid) -> AppResult<Vec<WorkoutEntry>> {
        Ok(Self::list_desc(&self.workouts, user_id))
    }

    async fn upsert_workout_entry(&self, user_id: Uuid, entry: &WorkoutEntry) -> AppResult<()> {
        self.workouts
            .entry(user_id)
            .or_default()
            .insert(entry.date, entry.clone());
        self.publish(
            user_id,
            Some(HealthDomain::Workouts),
            Some(entry.date),
            ChangeKind::Upserted,
        );
        Ok(())
    }

    async fn delete_workout_entry(&self, user_id: Uuid, date: NaiveDate) -> AppResult<()> {
        if let Some(mut entries) = self.workouts.get_mut(&user_id) {
            entries.remove(&date);
        }
        self.publish(
            user_id,
            Some(HealthDomain::Workouts),
            Some(date),
            ChangeKind::Deleted,
        );
        Ok(())
    }

    async fn supplement_entries(&self, user_id: Uuid) -> AppResult<Vec<SupplementEntry>> {
        Ok(Self::list_desc(&self.supplements, user_id))
    }

    async fn upsert_supplement_entry(
        &self,
        user_id: Uuid,
        entry: &SupplementEntry,
    ) -> AppResult<()> {
        self.supplements
            .entry(user_id)
            .or_default()
            .insert(entry.date, entry.clone());
        self.publish(
            user_id,
            Some(HealthDomain::Supplements),
            Some(entry.date),
            ChangeKind::Upserted,
        );
        Ok(())
    }

    async fn delete_supplement_entry(&self, user_id: Uuid, date: NaiveDate) -> AppResult<()> {
        if let Some(mut entries) = self.supplements.get_mut(&user_id) {
            entries.remove(&date);
        }
        self.publish(
            user_id,
            Some(HealthDomain::Supplements),
            Some(date),
            ChangeKind::Deleted,
        );
        Ok(())
    }

    async fn goals(&self, user_id: Uuid) -> AppResult<Vec<Goal>> {
        let mut goals: Vec<Goal> = self
            .goals
            .get(&user_id)
            .map(|g| g.values().cloned().collect())
            .unwrap_or_default();
        goals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(goals)
    }

    async fn upsert_goal(&self, user_id: Uuid, goal: &Goal) -> AppResult<()> {
        self.goals
            .entry(user_id)
            .or_default()
            .insert(goal.id.clone(), goal.clone());
        self.publish(user_id, None, None, ChangeKind::Upserted);
        Ok(())
    }

    async fn delete_goal(&self, user_id: Uuid, goal_id: &str) -> AppResult<()> {
        if let Some(mut goals) = self.goals.get_mut(&user_id) {
            goals.remove(goal_id);
        }
        self.publish(user_id, None, None, ChangeKind::Deleted);
        Ok(())
    }

    async fn achievements(&self, user_id: Uuid) -> AppResult<Vec<Achievement>> {
        Ok(self
            .achievements
            .get(&user_id)
            .map(|a| a.clone())
            .unwrap_or_default())
    }

    async fn put_achievements(
        &self,
        user_id: Uuid,
        achievements: &[Achievement],
    ) -> AppResult<()> {
        self.achievements.insert(user_id, achievements.to_vec());
        self.publish(user_id, None, None, ChangeKind::Upserted);
        Ok(())
    }

    fn subscribe(&self, user_id: Uuid) -> broadcast::Receiver<ChangeEvent> {
        self.channels.subscribe(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    #[tokio::test]
    async fn test_upsert_replaces_same_date() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();

        store
            .upsert_sleep_entry(user, &SleepEntry::new(date(1), 7.0, 80.0))
            .await
            .unwrap();
        store
            .upsert_sleep_entry(user, &SleepEntry::new(date(1), 8.0, 90.0))
            .await
            .unwrap();

        let entries = store.sleep_entries(user).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert!((entries[0].total_sleep - 8.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_entries_list_most_recent_first() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        for day in [3, 1, 2] {
            store
                .upsert_sleep_entry(user, &SleepEntry::new(date(day), 7.0, 80.0))
                .await
                .unwrap();
        }
        let entries = store.sleep_entries(user).await.unwrap();
        let days: Vec<u32> = entries
            .iter()
            .map(|e| chrono::Datelike::day(&e.date))
            .collect();
        assert_eq!(days, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_subscription_receives_mutation_events() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let mut rx = store.subscribe(user);

        store
            .upsert_sleep_entry(user, &SleepEntry::new(date(5), 7.5, 85.0))
            .await
            .unwrap();
        let event = rx.recv().await.unwrap();
        assert_eq!(event.kind, ChangeKind::Upserted);
        assert_eq!(event.domain, Some(HealthDomain::Sleep));
        assert_eq!(event.date, Some(date(5)));

        store.delete_sleep_entry(user, date(5)).await.unwrap();
        let event = rx.recv().await.unwrap();
        assert_eq!(event.kind, ChangeKind::Deleted);
    }
}
