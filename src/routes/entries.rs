// ABOUTME: Entry CRUD route handlers for the four tracked health domains
// ABOUTME: List, upsert-by-date, delete, plus AI-parsed food logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

//! Dated-entry routes.
//!
//! One entry exists per user per calendar date per domain; `PUT` upserts by
//! the path date (last write wins for today's edits) and `DELETE` removes a
//! date. Sleep upserts trigger a best-effort AI analysis: the entry is saved
//! whether or not the analysis succeeds.

use crate::resources::ServerResources;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use vitalis_core::errors::{AppError, AppResult};
use vitalis_core::models::{
    FoodItem, HealthDomain, Meal, MealType, NutritionEntry, SleepEntry, SupplementEntry,
    WorkoutEntry,
};

/// Query carrying the entry owner
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    /// Owner of the entries
    pub user_id: Uuid,
}

/// Request body for AI-parsed food logging
#[derive(Debug, Deserialize)]
pub struct ParseFoodRequest {
    /// Owner of the entry
    pub user_id: Uuid,
    /// Free-text food description
    pub description: String,
    /// Date to log the parsed item under; omit to only parse
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Meal slot for the logged item
    #[serde(default)]
    pub meal_type: Option<String>,
}

/// Entry routes handler
pub struct EntryRoutes;

impl EntryRoutes {
    /// Create all entry routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/:domain/entries",
                axum::routing::get(Self::list_entries),
            )
            .route(
                "/api/:domain/entries/:date",
                put(Self::upsert_entry).delete(Self::delete_entry),
            )
            .route("/api/nutrition/parse", post(Self::parse_food))
            .with_state(resources)
    }

    fn domain_from_path(segment: &str) -> AppResult<HealthDomain> {
        HealthDomain::from_path_segment(segment)
            .ok_or_else(|| AppError::invalid_input(format!("unknown domain: {segment}")))
    }

    /// List a domain's entries, most recent first
    async fn list_entries(
        State(resources): State<Arc<ServerResources>>,
        Path(domain): Path<String>,
        Query(query): Query<UserQuery>,
    ) -> AppResult<Json<serde_json::Value>> {
        let domain = Self::domain_from_path(&domain)?;
        let value = match domain {
            HealthDomain::Sleep => {
                serde_json::to_value(resources.store.sleep_entries(query.user_id).await?)?
            }
            HealthDomain::Nutrition => {
                serde_json::to_value(resources.store.nutrition_entries(query.user_id).await?)?
            }
            HealthDomain::Workouts => {
                serde_json::to_value(resources.store.workout_entries(query.user_id).await?)?
            }
            HealthDomain::Supplements => {
                serde_json::to_value(resources.store.supplement_entries(query.user_id).await?)?
            }
        };
        Ok(Json(serde_json::json!({ "entries": value })))
    }

    /// Upsert one dated entry
    async fn upsert_entry(
        State(resources): State<Arc<ServerResources>>,
        Path((domain, date)): Path<(String, NaiveDate)>,
        Query(query): Query<UserQuery>,
        Json(body): Json<serde_json::Value>,
    ) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
        let domain = Self::domain_from_path(&domain)?;
        let user_id = query.user_id;

        let stored = match domain {
            HealthDomain::Sleep => {
                let entry: SleepEntry = Self::entry_from_body(body, date)?;
                let entry = Self::attach_sleep_analysis(&resources, user_id, entry).await;
                resources.store.upsert_sleep_entry(user_id, &entry).await?;
                serde_json::to_value(entry)?
            }
            HealthDomain::Nutrition => {
                let mut entry: NutritionEntry = Self::entry_from_body(body, date)?;
                if !entry.meals.is_empty() {
                    entry.recompute_totals();
                }
                resources
                    .store
                    .upsert_nutrition_entry(user_id, &entry)
                    .await?;
                serde_json::to_value(entry)?
            }
            HealthDomain::Workouts => {
                let entry: WorkoutEntry = Self::entry_from_body(body, date)?;
                resources
                    .store
                    .upsert_workout_entry(user_id, &entry)
                    .await?;
                serde_json::to_value(entry)?
            }
            HealthDomain::Supplements => {
                let entry: SupplementEntry = Self::entry_from_body(body, date)?;
                resources
                    .store
                    .upsert_supplement_entry(user_id, &entry)
                    .await?;
                serde_json::to_value(entry)?
            }
        };

        info!(%user_id, %domain, %date, "entry upserted");
        Ok((StatusCode::OK, Json(stored)))
    }

    /// Delete one dated entry
    async fn delete_entry(
        State(resources): State<Arc<ServerResources>>,
        Path((domain, date)): Path<(String, NaiveDate)>,
        Query(query): Query<UserQuery>,
    ) -> AppResult<StatusCode> {
        let domain = Self::domain_from_path(&domain)?;
        let user_id = query.user_id;
        match domain {
            HealthDomain::Sleep => resources.store.delete_sleep_entry(user_id, date).await?,
            HealthDomain::Nutrition => {
                resources.store.delete_nutrition_entry(user_id, date).await?;
            }
            HealthDomain::Workouts => {
                resources.store.delete_workout_entry(user_id, date).await?;
            }
            HealthDomain::Supplements => {
                resources
                    .store
                    .delete_supplement_entry(user_id, date)
                    .await?;
            }
        }
        info!(%user_id, %domain, %date, "entry deleted");
        Ok(StatusCode::NO_CONTENT)
    }

    /// Parse free-text food and optionally log it under a date
    async fn parse_food(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<ParseFoodRequest>,
    ) -> AppResult<Json<serde_json::Value>> {
        let parser = resources.food_parser().ok_or_else(|| {
            AppError::new(
                vitalis_core::errors::ErrorCode::ExternalServiceUnavailable,
                "food parsing is not configured",
            )
        })?;

        let item = parser.parse(&request.description).await?;

        if let Some(date) = request.date {
            let meal_type = request
                .meal_type
                .as_deref()
                .map_or(MealType::Other, MealType::from_str_lossy);
            Self::append_food_item(&resources, request.user_id, date, meal_type, item.clone())
                .await?;
        }

        Ok(Json(serde_json::json!({ "item": item })))
    }

    /// Append a parsed item to the date's entry, creating it as needed
    async fn append_food_item(
        resources: &ServerResources,
        user_id: Uuid,
        date: NaiveDate,
        meal_type: MealType,
        item: FoodItem,
    ) -> AppResult<()> {
        let mut entry = resources
            .store
            .nutrition_entries(user_id)
            .await?
            .into_iter()
            .find(|e| e.date == date)
            .unwrap_or_else(|| NutritionEntry::new(date));

        match entry.meals.iter_mut().find(|m| m.meal_type == meal_type) {
            Some(meal) => meal.items.push(item),
            None => entry.meals.push(Meal {
                id: Uuid::new_v4().to_string(),
                meal_type,
                name: None,
                items: vec![item],
            }),
        }
        entry.recompute_totals();
        resources.store.upsert_nutrition_entry(user_id, &entry).await
    }

    /// Deserialize an entry body and pin its date to the path date
    fn entry_from_body<E: serde::de::DeserializeOwned + serde::Serialize>(
        mut body: serde_json::Value,
        date: NaiveDate,
    ) -> AppResult<E> {
        if let Some(object) = body.as_object_mut() {
            // The path date is canonical; bodies may omit it.
            object.insert(
                "date".to_owned(),
                serde_json::Value::String(date.format("%Y-%m-%d").to_string()),
            );
        }
        serde_json::from_value(body)
            .map_err(|e| AppError::invalid_input(format!("malformed entry: {e}")))
    }

    /// Run the AI sleep analysis best-effort
    ///
    /// A failed or unconfigured analyzer leaves the entry untouched; the
    /// write proceeds regardless.
    async fn attach_sleep_analysis(
        resources: &ServerResources,
        user_id: Uuid,
        mut entry: SleepEntry,
    ) -> SleepEntry {
        if entry.ai_analysis.is_some() {
            return entry;
        }
        let Some(analyzer) = resources.sleep_analyzer() else {
            return entry;
        };
        let recent = match resources.store.sleep_entries(user_id).await {
            Ok(entries) => entries,
            Err(err) => {
                warn!(%user_id, "skipping sleep analysis, history unavailable: {err}");
                return entry;
            }
        };
        match analyzer.analyze(&entry, &recent).await {
            Ok(analysis) => entry.ai_analysis = Some(analysis),
            Err(err) => {
                warn!(%user_id, "sleep analysis failed, saving entry without it: {err}");
            }
        }
        entry
    }
}
