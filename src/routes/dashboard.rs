// ABOUTME: Dashboard route serving domain stats, composite metrics, and goal summary
// ABOUTME: Recomputes everything from stored entries on each request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

use super::entries::UserQuery;
use super::goals::{attach_progress, GoalWithProgress};
use crate::overview::UserOverview;
use crate::resources::ServerResources;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use vitalis_core::errors::AppResult;
use vitalis_intelligence::GoalStatusPolicy;

/// Dashboard metrics payload
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Domain stats and composite metrics
    #[serde(flatten)]
    pub overview: UserOverview,
    /// Goals with progress under the dashboard policy (achieved at 90%)
    pub goals: Vec<GoalWithProgress>,
}

/// Dashboard routes handler
pub struct DashboardRoutes;

impl DashboardRoutes {
    /// Create all dashboard routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/dashboard/metrics", get(Self::metrics))
            .with_state(resources)
    }

    /// Serve the full dashboard payload
    async fn metrics(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<UserQuery>,
    ) -> AppResult<Json<DashboardResponse>> {
        let overview = UserOverview::load(resources.store.as_ref(), query.user_id).await?;
        let goals = resources.store.goals(query.user_id).await?;
        let goals = attach_progress(goals, &overview, GoalStatusPolicy::DASHBOARD);
        Ok(Json(DashboardResponse { overview, goals }))
    }
}
