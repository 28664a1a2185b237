// ABOUTME: LLM integration layer: chat types, provider trait, capability clients
// ABOUTME: Coach, food parser, and sleep analyzer share one provider abstraction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

//! # LLM Integration
//!
//! The platform brokers three narrow capabilities through one chat-completion
//! provider: AI coaching ([`HealthCoach`]), natural-language food parsing
//! ([`FoodParser`]), and sleep analysis ([`SleepInsightAnalyzer`]). Each
//! capability exposes a single async method and owns its prompt and response
//! parsing.
//!
//! Callers must tolerate provider failure: a failed call degrades (coach
//! fallback reply, entry saved without analysis) and never blocks the
//! primary user-facing write.

use serde::{Deserialize, Serialize};

pub mod coach;
pub mod food_parser;
pub mod openai_compatible;
pub mod provider;
pub mod sleep_insights;

pub use coach::{CoachContext, CoachReply, HealthCoach};
pub use food_parser::FoodParser;
pub use openai_compatible::OpenAiCompatibleProvider;
pub use provider::LlmProvider;
pub use sleep_insights::SleepInsightAnalyzer;

/// Role of a chat message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction
    System,
    /// End-user message
    User,
    /// Model response
    Assistant,
}

/// One message in a chat exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role
    pub role: MessageRole,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// A chat completion request
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Conversation messages, system first
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature override
    pub temperature: Option<f32>,
    /// Completion token cap
    pub max_tokens: Option<u32>,
    /// Model override; providers fall back to their default model
    pub model: Option<String>,
}

impl ChatRequest {
    /// Create a request with default sampling settings
    #[must_use]
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
            max_tokens: None,
            model: None,
        }
    }

    /// Set the sampling temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Cap the completion length
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Token usage statistics reported by the provider
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct TokenUsage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,
    /// Tokens in the completion
    pub completion_tokens: u32,
    /// Total billed tokens
    pub total_tokens: u32,
}

/// A chat completion response
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// Completion text
    pub content: String,
    /// Model that produced the completion
    pub model: String,
    /// Usage statistics when reported
    pub usage: Option<TokenUsage>,
}

/// Extract the first JSON object embedded in model output
///
/// Models wrap structured replies in prose or code fences; the parsers in
/// this module tolerate that by slicing from the first `{` to the last `}`.
#[must_use]
pub(crate) fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_object_strips_fences() {
        let raw = "Here you go:\n```json\n{\"name\": \"oatmeal\"}\n```\n";
        assert_eq!(extract_json_object(raw), Some("{\"name\": \"oatmeal\"}"));
    }

    #[test]
    fn test_extract_json_object_rejects_plain_text() {
        assert_eq!(extract_json_object("no json here"), None);
    }
}
