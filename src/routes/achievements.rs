// ABOUTME: Achievement route handlers for catalogue initialization and progress reads
// ABOUTME: Progress refreshes on read and persists newly unlocked records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

use super::entries::UserQuery;
use crate::overview::UserOverview;
use crate::resources::ServerResources;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use vitalis_core::errors::AppResult;
use vitalis_core::models::Achievement;
use vitalis_intelligence::{AchievementEngine, AchievementInputs, SleepStatsCalculator, SleepStatsConfig};

/// Request body for catalogue initialization
#[derive(Debug, Deserialize)]
pub struct InitializeRequest {
    /// User to initialize
    pub user_id: Uuid,
}

/// Achievement routes handler
pub struct AchievementRoutes;

impl AchievementRoutes {
    /// Create all achievement routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/achievements", get(Self::list))
            .route("/api/achievements/initialize", post(Self::initialize))
            .with_state(resources)
    }

    /// One-time catalogue initialization; idempotent
    async fn initialize(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<InitializeRequest>,
    ) -> AppResult<(StatusCode, Json<Vec<Achievement>>)> {
        let existing = resources.store.achievements(request.user_id).await?;
        if !existing.is_empty() {
            return Ok((StatusCode::OK, Json(existing)));
        }
        let catalogue = AchievementEngine::catalogue();
        resources
            .store
            .put_achievements(request.user_id, &catalogue)
            .await?;
        info!(user_id = %request.user_id, "achievement catalogue initialized");
        Ok((StatusCode::CREATED, Json(catalogue)))
    }

    /// List achievements, refreshing progress from current entries
    async fn list(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<UserQuery>,
    ) -> AppResult<Json<Vec<Achievement>>> {
        let mut achievements = resources.store.achievements(query.user_id).await?;
        if achievements.is_empty() {
            return Ok(Json(achievements));
        }

        let overview = UserOverview::load(resources.store.as_ref(), query.user_id).await?;
        let inputs = Self::inputs_from(&overview);
        let unlocked = AchievementEngine::refresh(&mut achievements, &inputs, Utc::now());
        if !unlocked.is_empty() {
            info!(user_id = %query.user_id, ?unlocked, "achievements unlocked");
        }
        resources
            .store
            .put_achievements(query.user_id, &achievements)
            .await?;
        Ok(Json(achievements))
    }

    /// Derive refresh inputs from the loaded overview
    fn inputs_from(overview: &UserOverview) -> AchievementInputs {
        let config = SleepStatsConfig::default();
        let hydration_target_days = overview
            .nutrition_entries
            .iter()
            .filter(|e| e.hydration.target > 0.0 && e.hydration.water_intake >= e.hydration.target)
            .count() as u32;
        let supplement_adherent_days = overview
            .supplement_entries
            .iter()
            .filter(|e| !e.taken.is_empty())
            .count() as u32;

        AchievementInputs {
            sleep_milestone_streak: SleepStatsCalculator::streak_with_threshold(
                &overview.sleep_entries,
                config.milestone_streak_threshold,
            ),
            total_sleep_entries: overview.entry_counts[0] as u32,
            total_workouts: overview.workouts.total_workouts,
            total_nutrition_entries: overview.entry_counts[1] as u32,
            hydration_target_days,
            supplement_adherent_days,
        }
    }
}
