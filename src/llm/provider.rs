// ABOUTME: Chat completion provider trait implemented by concrete LLM backends
// ABOUTME: Capability clients depend on this trait, never a concrete provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

use super::{ChatRequest, ChatResponse};
use async_trait::async_trait;
use vitalis_core::errors::AppResult;

/// Chat completion provider
///
/// One async completion method; no streaming or tool calling. Any
/// `OpenAI`-compatible endpoint satisfies this through
/// [`super::OpenAiCompatibleProvider`], and tests inject stubs to exercise
/// the degraded paths.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Run one chat completion
    ///
    /// # Errors
    /// Returns an external-service error on network failure, timeout, or a
    /// malformed provider response.
    async fn complete(&self, request: &ChatRequest) -> AppResult<ChatResponse>;

    /// Human-readable provider name for logging
    fn display_name(&self) -> &str;

    /// Model used when the request does not override it
    fn default_model(&self) -> &str;
}
