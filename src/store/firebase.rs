// ABOUTME: Realtime-database REST backend storing the per-user JSON tree
// ABOUTME: Firebase-style GET/PUT/DELETE on {base}/{path}.json with optional auth
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

//! Firebase Realtime Database REST backend.
//!
//! The hosted database exposes every node as `{base}/{path}.json`; absent
//! nodes read as JSON `null`. Dated entries live under
//! `users/{id}/entries/{domain}/{date}`, goals under `users/{id}/goals/{id}`,
//! achievements under `users/{id}/achievements`.
//!
//! Change events published here reflect writes made through this process;
//! cross-client streaming belongs to the hosted client SDK and is out of
//! scope for the backend.

use super::{ChangeChannels, ChangeEvent, ChangeKind, StoreProvider};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;
use vitalis_core::errors::{AppError, AppResult};
use vitalis_core::models::{
    Achievement, Goal, HealthDomain, NutritionEntry, SleepEntry, SupplementEntry, UserProfile,
    WorkoutEntry,
};

/// Request timeout for database calls
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Date format used as the entry key in the store tree
const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Realtime-database REST store
pub struct FirebaseStore {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
    channels: ChangeChannels,
}

impl FirebaseStore {
    /// Create a store for the given database base URL
    ///
    /// # Errors
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new(base_url: &str, auth_token: Option<String>) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            auth_token,
            channels: ChangeChannels::default(),
        })
    }

    fn node_url(&self, path: &str) -> String {
        let mut url = format!("{}/{path}.json", self.base_url);
        if let Some(token) = &self.auth_token {
            url.push_str("?auth=");
            url.push_str(token);
        }
        url
    }

    async fn get_node<T: DeserializeOwned>(&self, path: &str) -> AppResult<Option<T>> {
        debug!(path, "store read");
        let response = self
            .client
            .get(self.node_url(path))
            .send()
            .await?
            .error_for_status()?;
        // Absent nodes read as JSON null
        let value: serde_json::Value = response.json().await?;
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(value)?))
    }

    async fn put_node<T: Serialize + Sync>(&self, path: &str, value: &T) -> AppResult<()> {
        debug!(path, "store write");
        self.client
            .put(self.node_url(path))
            .json(value)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn delete_node(&self, path: &str) -> AppResult<()> {
        debug!(path, "store delete");
        self.client
            .delete(self.node_url(path))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    fn entry_path(user_id: Uuid, domain: HealthDomain, date: NaiveDate) -> String {
        format!(
            "users/{user_id}/entries/{}/{}",
            domain.as_path_segment(),
            date.format(DATE_KEY_FORMAT)
        )
    }

    fn domain_path(user_id: Uuid, domain: HealthDomain) -> String {
        format!("users/{user_id}/entries/{}", domain.as_path_segment())
    }

    /// Read a domain's entry map and return its values most-recent-first
    async fn list_entries<E: DeserializeOwned>(
        &self,
        user_id: Uuid,
        domain: HealthDomain,
    ) -> AppResult<Vec<E>> {
        let map: Option<BTreeMap<NaiveDate, E>> =
            self.get_node(&Self::domain_path(user_id, domain)).await?;
        Ok(map
            .map(|entries| entries.into_values().rev().collect())
            .unwrap_or_default())
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
}

#[async_trait]
impl StoreProvider for FirebaseStore {
    async fn create_user(&self, profile: &UserProfile) -> AppResult<()> {
        self.put_node(&format!("users/{}/profile", profile.id), profile)
            .await
    }

    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        self.get_node(&format!("users/{user_id}/profile")).await
    }

    async fn update_billing_customer(&self, user_id: Uuid, customer_id: &str) -> AppResult<()> {
        self.put_node(
            &format!("users/{user_id}/profile/billing_customer_id"),
            &customer_id,
        )
        .await
    }

    async fn sleep_entries(&self, user_id: Uuid) -> AppResult<Vec<SleepEntry>> {
        self.list_entries(user_id, HealthDomain::Sleep).await
    }

    async fn upsert_sleep_entry(&self, user_id: Uuid, entry: &SleepEntry) -> AppResult<()> {
        self.put_node(
            &Self::entry_path(user_id, HealthDomain::Sleep, entry.date),
            entry,
        )
        .await?;
        self.publish(
            user_id,
            Some(HealthDomain::Sleep),
            Some(entry.date),
            ChangeKind::Upserted,
        );
        Ok(())
    }

    async fn delete_sleep_entry(&self, user_id: Uuid, date: NaiveDate) -> AppResult<()> {
        self.delete_node(&Self::entry_path(user_id, HealthDomain::Sleep, date))
            .await?;
        self.publish(
            user_id,
            Some(HealthDomain::Sleep),
            Some(date),
            ChangeKind::Deleted,
        );
        Ok(())
    }

    async fn nutrition_entries(&self, user_id: Uuid) -> AppResult<Vec<NutritionEntry>> {
        self.list_entries(user_id, HealthDomain::Nutrition).await
    }

    async fn upsert_nutrition_entry(
        &self,
        user_id: Uuid,
        entry: &NutritionEntry,
    ) -> AppResult<()> {
        self.put_node(
            &Self::entry_path(user_id, HealthDomain::Nutrition, entry.date),
            entry,
        )
        .await?;
        self.publish(
            user_id,
            Some(HealthDomain::Nutrition),
            Some(entry.date),
            ChangeKind::Upserted,
        );
        Ok(())
    }

    async fn delete_nutrition_entry(&self, user_id: Uuid, date: NaiveDate) -> AppResult<()> {
        self.delete_node(&Self::entry_path(user_id, HealthDomain::Nutrition, date))
            .await?;
        self.publish(
            user_id,
            Some(HealthDomain::Nutrition),
            Some(date),
            ChangeKind::Deleted,
        );
        Ok(())
    }

    async fn workout_entries(&self, user_id: Uuid) -> AppResult<Vec<WorkoutEntry>> {
        self.list_entries(user_id, HealthDomain::Workouts).await
    }

    async fn upsert_workout_entry(&self, user_id: Uuid, entry: &WorkoutEntry) -> AppResult<()> {
        self.put_node(
            &Self::entry_path(user_id, HealthDomain::Workouts, entry.date),
            entry,
        )
        .await?;
        self.publish(
            user_id,
            Some(HealthDomain::Workouts),
            Some(entry.date),
            ChangeKind::Upserted,
        );
        Ok(())
    }

    async fn delete_workout_entry(&self, user_id: Uuid, date: NaiveDate) -> AppResult<()> {
        self.delete_node(&Self::entry_path(user_id, HealthDomain::Workouts, date))
            .await?;
        self.publish(
            user_id,
            Some(HealthDomain::Workouts),
            Some(date),
            ChangeKind::Deleted,
        );
        Ok(())
    }

    async fn supplement_entries(&self, user_id: Uuid) -> AppResult<Vec<SupplementEntry>> {
        self.list_entries(user_id, HealthDomain::Supplements).await
    }

    async fn upsert_supplement_entry(
        &self,
        user_id: Uuid,
        entry: &SupplementEntry,
    ) -> AppResult<()> {
        self.put_node(
            &Self::entry_path(user_id, HealthDomain::Supplements, entry.date),
            entry,
        )
        .await?;
        self.publish(
            user_id,
            Some(HealthDomain::Supplements),
            Some(entry.date),
            ChangeKind::Upserted,
        );
        Ok(())
    }

    async fn delete_supplement_entry(&self, user_id: Uuid, date: NaiveDate) -> AppResult<()> {
        self.delete_node(&Self::entry_path(user_id, HealthDomain::Supplements, date))
            .await?;
        self.publish(
            user_id,
            Some(HealthDomain::Supplements),
            Some(date),
            ChangeKind::Deleted,
        );
        Ok(())
    }

    async fn goals(&self, user_id: Uuid) -> AppResult<Vec<Goal>> {
        let map: Option<BTreeMap<String, Goal>> =
            self.get_node(&format!("users/{user_id}/goals")).await?;
        let mut goals: Vec<Goal> = map.map(|g| g.into_values().collect()).unwrap_or_default();
        goals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(goals)
    }

    async fn upsert_goal(&self, user_id: Uuid, goal: &Goal) -> AppResult<()> {
        self.put_node(&format!("users/{user_id}/goals/{}", goal.id), goal)
            .await?;
        self.publish(user_id, None, None, ChangeKind::Upserted);
        Ok(())
    }

    async fn delete_goal(&self, user_id: Uuid, goal_id: &str) -> AppResult<()> {
        self.delete_node(&format!("users/{user_id}/goals/{goal_id}"))
            .await?;
        self.publish(user_id, None, None, ChangeKind::Deleted);
        Ok(())
    }

    async fn achievements(&self, user_id: Uuid) -> AppResult<Vec<Achievement>> {
        let map: Option<BTreeMap<String, Achievement>> = self
            .get_node(&format!("users/{user_id}/achievements"))
            .await?;
        Ok(map.map(|a| a.into_values().collect()).unwrap_or_default())
    }

    async fn put_achievements(
        &self,
        user_id: Uuid,
        achievements: &[Achievement],
    ) -> AppResult<()> {
        let map: BTreeMap<&str, &Achievement> = achievements
            .iter()
            .map(|a| (a.id.as_str(), a))
            .collect();
        self.put_node(&format!("users/{user_id}/achievements"), &map)
            .await?;
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

    #[test]
    fn test_node_url_appends_auth() {
        let store = FirebaseStore::new("https://app.firebaseio.com/", Some("tok".into())).unwrap();
        assert_eq!(
            store.node_url("users/abc/profile"),
            "https://app.firebaseio.com/users/abc/profile.json?auth=tok"
        );
    }

    #[test]
    fn test_entry_path_uses_date_key() {
        let user = Uuid::nil();
        let date = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
        assert_eq!(
            FirebaseStore::entry_path(user, HealthDomain::Sleep, date),
            format!("users/{user}/entries/sleep/2025-06-03")
        );
    }
}
