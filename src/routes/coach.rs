// ABOUTME: AI coach chat route degrading to a canned reply on provider failure
// ABOUTME: Builds coaching context from the user's current domain stats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

use crate::llm::{CoachContext, CoachReply};
use crate::overview::UserOverview;
use crate::resources::ServerResources;
use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;
use vitalis_core::errors::{AppError, AppResult};

/// Request body for a coach chat turn
#[derive(Debug, Deserialize)]
pub struct ChatRequestBody {
    /// User asking the question
    pub user_id: Uuid,
    /// The user's message
    pub message: String,
}

/// Coach routes handler
pub struct CoachRoutes;

impl CoachRoutes {
    /// Create all coach routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/coach/chat", post(Self::chat))
            .with_state(resources)
    }

    /// One coaching turn
    ///
    /// Provider failure never surfaces as an error: the endpoint answers 200
    /// with the fallback reply so the conversation view stays usable.
    async fn chat(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<ChatRequestBody>,
    ) -> AppResult<Json<CoachReply>> {
        if request.message.trim().is_empty() {
            return Err(AppError::missing_field("message"));
        }

        let Some(coach) = resources.coach() else {
            return Ok(Json(CoachReply::fallback()));
        };

        let context = match UserOverview::load(resources.store.as_ref(), request.user_id).await {
            Ok(overview) => CoachContext {
                longevity: Some(overview.longevity),
                sleep: Some(overview.sleep),
                workout: Some(overview.workouts),
                supplement: Some(overview.supplements),
                nutrition_score: Some(overview.nutrition.weekly_nutrition_score),
            },
            Err(err) => {
                warn!(user_id = %request.user_id, "coaching without stats context: {err}");
                CoachContext::default()
            }
        };

        match coach.chat(&request.message, &context).await {
            Ok(reply) => Ok(Json(reply)),
            Err(err) => {
                warn!(user_id = %request.user_id, "coach provider failed: {err}");
                Ok(Json(CoachReply::fallback()))
            }
        }
    }
}
