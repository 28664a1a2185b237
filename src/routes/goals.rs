// ABOUTME: Goal CRUD route handlers with computed-on-read progress
// ABOUTME: Progress attaches at list time under the strict goals-API policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

use super::entries::UserQuery;
use crate::overview::UserOverview;
use crate::resources::ServerResources;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use vitalis_core::errors::{AppError, AppResult};
use vitalis_core::models::{Goal, GoalPriority, HealthDomain};
use vitalis_intelligence::{GoalProgress, GoalProgressEvaluator, GoalStatusPolicy};

/// Request body for creating a goal
#[derive(Debug, Deserialize)]
pub struct CreateGoalRequest {
    /// Owner of the goal
    pub user_id: Uuid,
    /// Domain the goal tracks
    pub domain: HealthDomain,
    /// Display title
    pub title: String,
    /// Target value
    pub target_value: f64,
    /// Unit of the target
    pub unit: String,
    /// Optional deadline
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    /// Display priority
    #[serde(default = "default_priority")]
    pub priority: GoalPriority,
}

const fn default_priority() -> GoalPriority {
    GoalPriority::Medium
}

/// A goal with its computed progress attached
#[derive(Debug, Serialize)]
pub struct GoalWithProgress {
    /// The stored goal
    #[serde(flatten)]
    pub goal: Goal,
    /// Progress under the caller's policy
    pub progress: GoalProgress,
}

/// Goal routes handler
pub struct GoalRoutes;

impl GoalRoutes {
    /// Create all goal routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/goals", get(Self::list_goals).post(Self::create_goal))
            .route("/api/goals/:goal_id", axum::routing::delete(Self::delete_goal))
            .with_state(resources)
    }

    /// List goals with progress under the strict policy
    async fn list_goals(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<UserQuery>,
    ) -> AppResult<Json<serde_json::Value>> {
        let goals = resources.store.goals(query.user_id).await?;
        let overview = UserOverview::load(resources.store.as_ref(), query.user_id).await?;
        let goals = attach_progress(goals, &overview, GoalStatusPolicy::STANDARD);
        Ok(Json(serde_json::json!({ "goals": goals })))
    }

    /// Create a goal
    async fn create_goal(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CreateGoalRequest>,
    ) -> AppResult<(StatusCode, Json<Goal>)> {
        if request.title.trim().is_empty() {
            return Err(AppError::missing_field("title"));
        }
        if request.target_value <= 0.0 {
            return Err(AppError::invalid_input("target_value must be positive"));
        }

        let goal = Goal {
            id: Uuid::new_v4().to_string(),
            domain: request.domain,
            title: request.title,
            target_value: request.target_value,
            unit: request.unit,
            deadline: request.deadline,
            priority: request.priority,
            active: true,
            current_progress: 0.0,
            created_at: Utc::now(),
        };
        resources.store.upsert_goal(request.user_id, &goal).await?;
        info!(user_id = %request.user_id, goal_id = %goal.id, "goal created");
        Ok((StatusCode::CREATED, Json(goal)))
    }

    /// Delete a goal
    async fn delete_goal(
        State(resources): State<Arc<ServerResources>>,
        Path(goal_id): Path<String>,
        Query(query): Query<UserQuery>,
    ) -> AppResult<StatusCode> {
        resources.store.delete_goal(query.user_id, &goal_id).await?;
        info!(user_id = %query.user_id, %goal_id, "goal deleted");
        Ok(StatusCode::NO_CONTENT)
    }
}

/// Attach computed progress to each goal under the given policy
pub(crate) fn attach_progress(
    goals: Vec<Goal>,
    overview: &UserOverview,
    policy: GoalStatusPolicy,
) -> Vec<GoalWithProgress> {
    goals
        .into_iter()
        .map(|goal| {
            let current = current_value_for(&goal, overview);
            let progress = GoalProgressEvaluator::evaluate(&goal, current, policy);
            GoalWithProgress { goal, progress }
        })
        .collect()
}

/// Current aggregate backing a goal's progress
///
/// Streak-style goals carry a denormalized counter; anything else reads the
/// domain's live aggregate.
pub(crate) fn current_value_for(goal: &Goal, overview: &UserOverview) -> f64 {
    if goal.current_progress > 0.0 {
        return goal.current_progress;
    }
    match goal.domain {
        HealthDomain::Sleep => f64::from(overview.sleep.current_streak),
        HealthDomain::Nutrition => overview.nutrition.weekly_nutrition_score,
        HealthDomain::Workouts => f64::from(overview.workouts.total_workouts),
        HealthDomain::Supplements => overview.supplements.adherence_percent,
    }
}
