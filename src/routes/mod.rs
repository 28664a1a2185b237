// ABOUTME: Route assembly for the REST surface with shared middleware layers
// ABOUTME: Merges per-area routers and applies CORS, tracing, and request ids
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

//! REST route assembly.

use crate::middleware::setup_cors;
use crate::resources::ServerResources;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub mod achievements;
pub mod coach;
pub mod dashboard;
pub mod entries;
pub mod goals;
pub mod health;
pub mod payments;
pub mod reports;

pub use achievements::AchievementRoutes;
pub use coach::CoachRoutes;
pub use dashboard::DashboardRoutes;
pub use entries::EntryRoutes;
pub use goals::GoalRoutes;
pub use health::HealthRoutes;
pub use payments::PaymentRoutes;
pub use reports::ReportRoutes;

/// Request timeout for all routes
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Build the complete application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes())
        .merge(EntryRoutes::routes(resources.clone()))
        .merge(DashboardRoutes::routes(resources.clone()))
        .merge(GoalRoutes::routes(resources.clone()))
        .merge(AchievementRoutes::routes(resources.clone()))
        .merge(CoachRoutes::routes(resources.clone()))
        .merge(PaymentRoutes::routes(resources.clone()))
        .merge(ReportRoutes::routes(resources.clone()))
        .layer(setup_cors(&resources.config))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
