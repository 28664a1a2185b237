// ABOUTME: Report routes assembling structured multi-section payloads
// ABOUTME: The client renders these payloads into paged PDF documents
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

//! Report payload assembly.
//!
//! The browser renders reports to PDF; the backend's job is the structured
//! payload: a titled document with per-domain sections and the composite
//! metrics. Unknown report types answer 400.

use super::entries::UserQuery;
use crate::overview::UserOverview;
use crate::resources::ServerResources;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;
use vitalis_core::errors::{AppError, AppResult};
use vitalis_intelligence::LongevityMetrics;

/// One titled block of report lines
#[derive(Debug, Serialize)]
pub struct ReportSection {
    /// Section heading
    pub heading: String,
    /// Rendered lines
    pub lines: Vec<String>,
}

/// Structured report payload
#[derive(Debug, Serialize)]
pub struct ReportPayload {
    /// Report type slug, also the suggested file name stem
    pub report_type: String,
    /// Report owner
    pub generated_for: Uuid,
    /// Document title
    pub title: String,
    /// Ordered sections
    pub sections: Vec<ReportSection>,
    /// Composite metrics for the header block
    pub metrics: LongevityMetrics,
}

/// Report routes handler
pub struct ReportRoutes;

impl ReportRoutes {
    /// Create all report routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/reports/:report_type", get(Self::generate))
            .with_state(resources)
    }

    /// Assemble one report payload
    async fn generate(
        State(resources): State<Arc<ServerResources>>,
        Path(report_type): Path<String>,
        Query(query): Query<UserQuery>,
    ) -> AppResult<Json<ReportPayload>> {
        let overview = UserOverview::load(resources.store.as_ref(), query.user_id).await?;

        let (title, sections) = match report_type.as_str() {
            "weekly-summary" => (
                "Weekly Health Summary".to_owned(),
                Self::weekly_sections(&overview),
            ),
            "longevity" => (
                "Longevity Report".to_owned(),
                Self::longevity_sections(&overview),
            ),
            other => {
                return Err(AppError::invalid_input(format!(
                    "unknown report type: {other}"
                )))
            }
        };

        Ok(Json(ReportPayload {
            report_type,
            generated_for: query.user_id,
            title,
            sections,
            metrics: overview.longevity,
        }))
    }

    fn weekly_sections(overview: &UserOverview) -> Vec<ReportSection> {
        vec![
            ReportSection {
                heading: "Sleep".to_owned(),
                lines: vec![
                    format!(
                        "Average {:.1}h per night, average score {:.0}",
                        overview.sleep.average_sleep_duration, overview.sleep.average_sleep_score
                    ),
                    format!("Current streak: {} nights", overview.sleep.current_streak),
                    format!("Sleep debt this week: {:.1}h", overview.sleep.sleep_debt),
                ],
            },
            ReportSection {
                heading: "Nutrition".to_owned(),
                lines: vec![
                    format!(
                        "Weekly score {:.0}/100 over {} logged days",
                        overview.nutrition.weekly_nutrition_score,
                        overview.nutrition.entries_counted
                    ),
                    format!(
                        "Calories {:.0}, protein {:.0}g, water {:.1}L",
                        overview.nutrition.weekly_totals.calories,
                        overview.nutrition.weekly_totals.protein,
                        overview.nutrition.weekly_hydration.water_intake
                    ),
                ],
            },
            ReportSection {
                heading: "Workouts".to_owned(),
                lines: vec![
                    format!(
                        "{} sessions, {:.0} minutes total",
                        overview.workouts.total_workouts, overview.workouts.total_minutes
                    ),
                    format!(
                        "Weekly consistency {:.0}%",
                        overview.workouts.weekly_consistency_percent
                    ),
                ],
            },
            ReportSection {
                heading: "Supplements".to_owned(),
                lines: vec![format!(
                    "Adherence {:.0}% over {} tracked days",
                    overview.supplements.adherence_percent, overview.supplements.tracked_days
                )],
            },
        ]
    }

    fn longevity_sections(overview: &UserOverview) -> Vec<ReportSection> {
        vec![ReportSection {
            heading: "Composite Metrics".to_owned(),
            lines: vec![
                format!(
                    "Longevity score: {:.1} / 10",
                    overview.longevity.longevity_score
                ),
                format!(
                    "Biological age: {:.1} years",
                    overview.longevity.biological_age
                ),
                format!("Healthspan: {:.1} years", overview.longevity.healthspan),
                format!("Vitality index: {}", overview.longevity.vitality_index),
            ],
        }]
    }
}
