// ABOUTME: Store factory and backend wrapper for runtime backend selection
// ABOUTME: Delegating enum over the in-memory and realtime-database backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

//! Store factory for creating store backends from configuration.

use super::{ChangeEvent, FirebaseStore, MemoryStore, StoreProvider};
use crate::config::StoreBackendConfig;
use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::broadcast;
use tracing::info;
use uuid::Uuid;
use vitalis_core::errors::AppResult;
use vitalis_core::models::{
    Achievement, Goal, NutritionEntry, SleepEntry, SupplementEntry, UserProfile, WorkoutEntry,
};

/// Store instance wrapper that delegates to the selected backend
pub enum Store {
    /// In-memory backend
    Memory(MemoryStore),
    /// Realtime-database REST backend
    Firebase(FirebaseStore),
}

impl Store {
    /// Create a store from configuration
    ///
    /// # Errors
    /// Returns an error when the REST backend's HTTP client cannot be built.
    pub fn from_config(config: &StoreBackendConfig) -> AppResult<Self> {
        let store = match config {
            StoreBackendConfig::Memory => Self::Memory(MemoryStore::new()),
            StoreBackendConfig::Firebase {
                base_url,
                auth_token,
            } => Self::Firebase(FirebaseStore::new(base_url, auth_token.clone())?),
        };
        info!("Store backend: {}", store.backend_info());
        Ok(store)
    }

    /// Descriptive string for the current backend
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            Self::Memory(_) => "Memory (Local Development)",
            Self::Firebase(_) => "Realtime Database (REST)",
        }
    }

    fn inner(&self) -> &dyn StoreProvider {
        match self {
            Self::Memory(store) => store,
            Self::Firebase(store) => store,
        }
    }
}

#[async_trait]
impl StoreProvider for Store {
    async fn create_user(&self, profile: &UserProfile) -> AppResult<()> {
        self.inner().create_user(profile).await
    }

    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        self.inner().get_user(user_id).await
    }

    async fn update_billing_customer(&self, user_id: Uuid, customer_id: &str) -> AppResult<()> {
        self.inner()
            .update_billing_customer(user_id, customer_id)
            .await
    }

    async fn sleep_entries(&self, user_id: Uuid) -> AppResult<Vec<SleepEntry>> {
        self.inner().sleep_entries(user_id).await
    }

    async fn upsert_sleep_entry(&self, user_id: Uuid, entry: &SleepEntry) -> AppResult<()> {
        self.inner().upsert_sleep_entry(user_id, entry).await
    }

    async fn delete_sleep_entry(&self, user_id: Uuid, date: NaiveDate) -> AppResult<()> {
        self.inner().delete_sleep_entry(user_id, date).await
    }

    async fn nutrition_entries(&self, user_id: Uuid) -> AppResult<Vec<NutritionEntry>> {
        self.inner().nutrition_entries(user_id).await
    }

    async fn upsert_nutrition_entry(
        &self,
        user_id: Uuid,
        entry: &NutritionEntry,
    ) -> AppResult<()> {
        self.inner().upsert_nutrition_entry(user_id, entry).await
    }

    async fn delete_nutrition_entry(&self, user_id: Uuid, date: NaiveDate) -> AppResult<()> {
        self.inner().delete_nutrition_entry(user_id, date).await
    }

    async fn workout_entries(&self, user_id: Uuid) -> AppResult<Vec<WorkoutEntry>> {
        self.inner().workout_entries(user_id).await
    }

    async fn upsert_workout_entry(&self, user_id: Uuid, entry: &WorkoutEntry) -> AppResult<()> {
        self.inner().upsert_workout_entry(user_id, entry).await
    }

    async fn delete_workout_entry(&self, user_id: Uuid, date: NaiveDate) -> AppResult<()> {
        self.inner().delete_workout_entry(user_id, date).await
    }

    async fn supplement_entries(&self, user_id: Uuid) -> AppResult<Vec<SupplementEntry>> {
        self.inner().supplement_entries(user_id).await
    }

    async fn upsert_supplement_entry(
        &self,
        user_id: Uuid,
        entry: &SupplementEntry,
    ) -> AppResult<()> {
        self.inner().upsert_supplement_entry(user_id, entry).await
    }

    async fn delete_supplement_entry(&self, user_id: Uuid, date: NaiveDate) -> AppResult<()> {
        self.inner().delete_supplement_entry(user_id, date).await
    }

    async fn goals(&self, user_id: Uuid) -> AppResult<Vec<Goal>> {
        self.inner().goals(user_id).await
    }

    async fn upsert_goal(&self, user_id: Uuid, goal: &Goal) -> AppResult<()> {
        self.inner().upsert_goal(user_id, goal).await
    }

    async fn delete_goal(&self, user_id: Uuid, goal_id: &str) -> AppResult<()> {
        self.inner().delete_goal(user_id, goal_id).await
    }

    async fn achievements(&self, user_id: Uuid) -> AppResult<Vec<Achievement>> {
        self.inner().achievements(user_id).await
    }

    async fn put_achievements(
        &self,
        user_id: Uuid,
        achievements: &[Achievement],
    ) -> AppResult<()> {
        self.inner().put_achievements(user_id, achievements).await
    }

    fn subscribe(&self, user_id: Uuid) -> broadcast::Receiver<ChangeEvent> {
        self.inner().subscribe(user_id)
    }
}
