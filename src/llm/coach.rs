// ABOUTME: AI health coach client building prompts from domain stats
// ABOUTME: Parses coach replies leniently and supplies a canned fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

use super::{extract_json_object, ChatMessage, ChatRequest, LlmProvider};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::debug;
use vitalis_core::errors::AppResult;
use vitalis_intelligence::{LongevityMetrics, SleepStats, SupplementStats, WorkoutStats};

/// Sampling temperature for coaching replies
const COACH_TEMPERATURE: f32 = 0.7;

/// Completion cap for coaching replies
const COACH_MAX_TOKENS: u32 = 1024;

/// Current stats handed to the coach as conversation context
#[derive(Debug, Clone, Default)]
pub struct CoachContext {
    /// Composite metrics, when computed
    pub longevity: Option<LongevityMetrics>,
    /// Sleep stats, when loaded
    pub sleep: Option<SleepStats>,
    /// Workout stats, when loaded
    pub workout: Option<WorkoutStats>,
    /// Supplement stats, when loaded
    pub supplement: Option<SupplementStats>,
    /// Weekly nutrition score, when computed
    pub nutrition_score: Option<f64>,
}

/// Structured coach reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachReply {
    /// Conversational reply text
    pub content: String,
    /// Short actionable suggestions
    #[serde(default)]
    pub suggestions: Vec<String>,
    /// Observations drawn from the user's data
    #[serde(default)]
    pub insights: Vec<String>,
}

impl CoachReply {
    /// Canned reply served when the provider call fails
    ///
    /// The chat endpoint stays available even when the LLM is down; the
    /// degraded reply carries no suggestions so the client renders it as
    /// plain text.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            content: "I couldn't reach the coaching service just now. Your data is saved - \
                      please try again in a moment."
                .to_owned(),
            suggestions: Vec::new(),
            insights: Vec::new(),
        }
    }
}

/// AI health coach
pub struct HealthCoach {
    provider: Arc<dyn LlmProvider>,
}

impl HealthCoach {
    /// Create a coach over the given provider
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Answer one user message with the current stats as context
    ///
    /// # Errors
    /// Returns the provider error on network or model failure; the route
    /// layer degrades to [`CoachReply::fallback`].
    pub async fn chat(&self, user_message: &str, context: &CoachContext) -> AppResult<CoachReply> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(Self::system_prompt(context)),
            ChatMessage::user(user_message),
        ])
        .with_temperature(COACH_TEMPERATURE)
        .with_max_tokens(COACH_MAX_TOKENS);

        let response = self.provider.complete(&request).await?;
        debug!(model = %response.model, "coach reply received");
        Ok(Self::parse_reply(&response.content))
    }

    fn system_prompt(context: &CoachContext) -> String {
        let mut prompt = String::from(
            "You are the Vitalis longevity coach. Give practical, encouraging advice \
             grounded in the user's tracked data. Reply with a JSON object: \
             {\"content\": string, \"suggestions\": [string], \"insights\": [string]}.\n\
             Current data:\n",
        );
        if let Some(metrics) = &context.longevity {
            let _ = writeln!(
                prompt,
                "- longevity score {:.1}/10, biological age {:.1}, vitality {}",
                metrics.longevity_score, metrics.biological_age, metrics.vitality_index
            );
        }
        if let Some(sleep) = &context.sleep {
            let _ = writeln!(
                prompt,
                "- sleep: avg {:.1}h, avg score {:.0}, streak {} nights, debt {:.1}h",
                sleep.average_sleep_duration,
                sleep.average_sleep_score,
                sleep.current_streak,
                sleep.sleep_debt
            );
        }
        if let Some(workout) = &context.workout {
            let _ = writeln!(
                prompt,
                "- workouts: {} sessions, weekly consistency {:.0}%",
                workout.total_workouts, workout.weekly_consistency_percent
            );
        }
        if let Some(score) = context.nutrition_score {
            let _ = writeln!(prompt, "- weekly nutrition score {score:.0}/100");
        }
        if let Some(supplement) = &context.supplement {
            let _ = writeln!(
                prompt,
                "- supplements: adherence {:.0}%",
                supplement.adherence_percent
            );
        }
        prompt
    }

    /// Parse the model output, degrading to a plain-text reply
    fn parse_reply(content: &str) -> CoachReply {
        extract_json_object(content)
            .and_then(|json| serde_json::from_str::<CoachReply>(json).ok())
            .unwrap_or_else(|| CoachReply {
                content: content.trim().to_owned(),
                suggestions: Vec::new(),
                insights: Vec::new(),
            })
    }
}
