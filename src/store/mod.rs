// ABOUTME: Store abstraction layer for the per-user health data tree
// ABOUTME: Provider trait with in-memory and realtime-database REST backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

//! Store abstraction for the per-user JSON document tree.
//!
//! The hosted realtime database is the only shared mutable resource in the
//! system. All access goes through [`StoreProvider`]; the aggregation layer
//! never sees a concrete backend, which keeps it unit-testable against the
//! in-memory implementation.
//!
//! Writes are last-write-wins. Every successful mutation publishes a
//! [`ChangeEvent`] to the user's subscription channel, mirroring the live
//! snapshot callbacks the web client builds its views from.

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;
use vitalis_core::errors::AppResult;
use vitalis_core::models::{
    Achievement, Goal, HealthDomain, NutritionEntry, SleepEntry, SupplementEntry, UserProfile,
    WorkoutEntry,
};

pub mod factory;
pub mod firebase;
pub mod memory;
pub mod optimistic;

pub use factory::Store;
pub use firebase::FirebaseStore;
pub use memory::MemoryStore;
pub use optimistic::OptimisticEntryWriter;

/// Kind of mutation behind a change event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// An entry or record was created or replaced
    Upserted,
    /// An entry or record was removed
    Deleted,
}

/// Notification published after every successful mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// Owner of the mutated record
    pub user_id: Uuid,
    /// Domain the mutation touched; `None` for profile/goal/achievement
    /// records
    pub domain: Option<HealthDomain>,
    /// Entry date for dated-entry mutations
    pub date: Option<NaiveDate>,
    /// Mutation kind
    pub kind: ChangeKind,
}

/// Core store abstraction trait
///
/// All backends implement this trait to provide a consistent interface for
/// the route layer. Entry lists return most-recent-first, the convention the
/// stat calculators expect.
#[async_trait]
pub trait StoreProvider: Send + Sync {
    // ================================
    // User Profiles
    // ================================

    /// Create a user profile
    async fn create_user(&self, profile: &UserProfile) -> AppResult<()>;

    /// Get a user profile by id
    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<UserProfile>>;

    /// Persist the billing customer id created for a user
    async fn update_billing_customer(&self, user_id: Uuid, customer_id: &str) -> AppResult<()>;

    // ================================
    // Sleep Entries
    // ================================

    /// List sleep entries, most recent first
    async fn sleep_entries(&self, user_id: Uuid) -> AppResult<Vec<SleepEntry>>;

    /// Upsert the sleep entry for its date
    async fn upsert_sleep_entry(&self, user_id: Uuid, entry: &SleepEntry) -> AppResult<()>;

    /// Delete the sleep entry for a date
    async fn delete_sleep_entry(&self, user_id: Uuid, date: NaiveDate) -> AppResult<()>;

    // ================================
    // Nutrition Entries
    // ================================

    /// List nutrition entries, most recent first
    async fn nutrition_entries(&self, user_id: Uuid) -> AppResult<Vec<NutritionEntry>>;

    /// Upsert the nutrition entry for its date
    async fn upsert_nutrition_entry(&self, user_id: Uuid, entry: &NutritionEntry) -> AppResult<()>;

    /// Delete the nutrition entry for a date
    async fn delete_nutrition_entry(&self, user_id: Uuid, date: NaiveDate) -> AppResult<()>;

    // ================================
    // Workout Entries
    // ================================

    /// List workout entries, most recent first
    async fn workout_entries(&self, user_id: Uuid) -> AppResult<Vec<WorkoutEntry>>;

    /// Upsert the workout entry for its date
    async fn upsert_workout_entry(&self, user_id: Uuid, entry: &WorkoutEntry) -> AppResult<()>;

    /// Delete the workout entry for a date
    async fn delete_workout_entry(&self, user_id: Uuid, date: NaiveDate) -> AppResult<()>;

    // ================================
    // Supplement Entries
    // ================================

    /// List supplement entries, most recent first
    async fn supplement_entries(&self, user_id: Uuid) -> AppResult<Vec<SupplementEntry>>;

    /// Upsert the supplement entry for its date
    async fn upsert_supplement_entry(
        &self,
        user_id: Uuid,
        entry: &SupplementEntry,
    ) -> AppResult<()>;

    /// Delete the supplement entry for a date
    async fn delete_supplement_entry(&self, user_id: Uuid, date: NaiveDate) -> AppResult<()>;

    // ================================
    // Goals
    // ================================

    /// List goals, newest first
    async fn goals(&self, user_id: Uuid) -> AppResult<Vec<Goal>>;

    /// Upsert a goal by id
    async fn upsert_goal(&self, user_id: Uuid, goal: &Goal) -> AppResult<()>;

    /// Delete a goal by id
    async fn delete_goal(&self, user_id: Uuid, goal_id: &str) -> AppResult<()>;

    // ================================
    // Achievements
    // ================================

    /// List achievement records
    async fn achievements(&self, user_id: Uuid) -> AppResult<Vec<Achievement>>;

    /// Replace the full achievement record set
    async fn put_achievements(
        &self,
        user_id: Uuid,
        achievements: &[Achievement],
    ) -> AppResult<()>;

    // ================================
    // Live Subscription
    // ================================

    /// Subscribe to change events for one user's data tree
    ///
    /// Lagging receivers drop the oldest events; there is no replay.
    fn subscribe(&self, user_id: Uuid) -> broadcast::Receiver<ChangeEvent>;
}

/// Per-user broadcast channels shared by the store backends
#[derive(Default)]
pub(crate) struct ChangeChannels {
    channels: DashMap<Uuid, broadcast::Sender<ChangeEvent>>,
}

impl ChangeChannels {
    /// Broadcast channel capacity per user
    const CAPACITY: usize = 64;

    /// Publish an event to the owner's channel, if anyone listens
    pub(crate) fn publish(&self, event: ChangeEvent) {
        if let Some(sender) = self.channels.get(&event.user_id) {
            // A send error only means no live receivers remain.
            let _ = sender.send(event);
        }
    }

    /// Create or reuse the user's channel and subscribe to it
    pub(crate) fn subscribe(&self, user_id: Uuid) -> broadcast::Receiver<ChangeEvent> {
        self.channels
            .entry(user_id)
            .or_insert_with(|| broadcast::channel(Self::CAPACITY).0)
            .subscribe()
    }
}
