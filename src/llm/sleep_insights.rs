// ABOUTME: AI sleep analyzer producing structured insights for a night's entry
// ABOUTME: Best-effort enrichment; a failed analysis never blocks the entry write
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

use super::{extract_json_object, ChatMessage, ChatRequest, LlmProvider};
use serde::Deserialize;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::debug;
use vitalis_core::errors::{AppError, AppResult};
use vitalis_core::models::{SleepAnalysis, SleepEntry};

/// Sampling temperature for analysis replies
const ANALYZER_TEMPERATURE: f32 = 0.3;

/// Completion cap for analysis replies
const ANALYZER_MAX_TOKENS: u32 = 768;

const SYSTEM_PROMPT: &str = "You are a sleep analyst. Given one night of sleep data and recent \
history, reply with ONLY a JSON object: {\"overall_analysis\": string, \"key_factors\": \
[string], \"personalized_tips\": [string], \"potential_issues\": [string], \
\"confidence_score\": number between 0 and 1}.";

/// Lenient mirror of the analyzer response
#[derive(Debug, Deserialize)]
struct ParsedAnalysis {
    #[serde(default)]
    overall_analysis: String,
    #[serde(default)]
    key_factors: Vec<String>,
    #[serde(default)]
    personalized_tips: Vec<String>,
    #[serde(default)]
    potential_issues: Vec<String>,
    #[serde(default)]
    confidence_score: f64,
}

/// AI sleep insight analyzer
pub struct SleepInsightAnalyzer {
    provider: Arc<dyn LlmProvider>,
}

impl SleepInsightAnalyzer {
    /// Create an analyzer over the given provider
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Analyze one night against recent history
    ///
    /// # Errors
    /// Returns an external-service error when the provider call fails or the
    /// reply carries no usable JSON. Callers attach the analysis best-effort
    /// and save the entry regardless.
    pub async fn analyze(
        &self,
        entry: &SleepEntry,
        recent: &[SleepEntry],
    ) -> AppResult<SleepAnalysis> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(Self::describe(entry, recent)),
        ])
        .with_temperature(ANALYZER_TEMPERATURE)
        .with_max_tokens(ANALYZER_MAX_TOKENS);

        let response = self.provider.complete(&request).await?;
        debug!(model = %response.model, "sleep analysis reply received");
        Self::analysis_from_reply(&response.content)
    }

    fn describe(entry: &SleepEntry, recent: &[SleepEntry]) -> String {
        let mut text = format!(
            "Tonight ({}): {:.1}h sleep, score {:.0}",
            entry.date, entry.total_sleep, entry.sleep_score
        );
        if let Some(efficiency) = entry.sleep_efficiency {
            let _ = write!(text, ", efficiency {efficiency:.0}%");
        }
        if let Some(stages) = entry.stages {
            let _ = write!(
                text,
                ", stages deep {:.1}h / rem {:.1}h / light {:.1}h / awake {:.1}h",
                stages.deep, stages.rem, stages.light, stages.awake
            );
        }
        if !recent.is_empty() {
            let avg_hours =
                recent.iter().map(|e| e.total_sleep).sum::<f64>() / recent.len() as f64;
            let avg_score =
                recent.iter().map(|e| e.sleep_score).sum::<f64>() / recent.len() as f64;
            let _ = write!(
                text,
                "\nRecent {} nights: avg {avg_hours:.1}h, avg score {avg_score:.0}",
                recent.len()
            );
        }
        text
    }

    fn analysis_from_reply(content: &str) -> AppResult<SleepAnalysis> {
        let json = extract_json_object(content).ok_or_else(|| {
            AppError::external_service("sleep-analyzer", "reply contained no JSON object")
        })?;
        let parsed: ParsedAnalysis = serde_json::from_str(json).map_err(|e| {
            AppError::external_service("sleep-analyzer", format!("malformed reply: {e}"))
        })?;

        Ok(SleepAnalysis {
            overall_analysis: parsed.overall_analysis,
            key_factors: parsed.key_factors,
            personalized_tips: parsed.personalized_tips,
            potential_issues: parsed.potential_issues,
            confidence_score: parsed.confidence_score.clamp(0.0, 1.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_reply_parses_and_clamps_confidence() {
        let reply = "{\"overall_analysis\": \"Solid night\", \"key_factors\": [\"consistent bedtime\"], \
                     \"personalized_tips\": [], \"potential_issues\": [], \"confidence_score\": 1.7}";
        let analysis = SleepInsightAnalyzer::analysis_from_reply(reply).unwrap();
        assert_eq!(analysis.overall_analysis, "Solid night");
        assert!((analysis.confidence_score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_prose_reply_is_an_error() {
        assert!(SleepInsightAnalyzer::analysis_from_reply("You slept fine.").is_err());
    }

    #[test]
    fn test_description_includes_history() {
        let entry = SleepEntry::new(NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(), 7.2, 82.0);
        let recent = vec![
            SleepEntry::new(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(), 6.0, 70.0),
            SleepEntry::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(), 8.0, 90.0),
        ];
        let text = SleepInsightAnalyzer::describe(&entry, &recent);
        assert!(text.contains("7.2h"));
        assert!(text.contains("Recent 2 nights"));
    }
}
