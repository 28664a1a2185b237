// ABOUTME: Centralized resource container for dependency injection
// ABOUTME: Shares the store, LLM provider, billing client, and config across routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

//! # Server Resources Module
//!
//! Centralized resource container for dependency injection. Routes receive
//! one `Arc<ServerResources>` as axum state; tests build the container with
//! an in-memory store and stub providers.

use crate::billing::StripeClient;
use crate::config::ServerConfig;
use crate::llm::{FoodParser, HealthCoach, LlmProvider, SleepInsightAnalyzer};
use crate::store::StoreProvider;
use std::sync::Arc;

/// Centralized resource container for dependency injection
pub struct ServerResources {
    /// Store backend
    pub store: Arc<dyn StoreProvider>,
    /// Chat completion provider; `None` disables the AI features and every
    /// caller degrades gracefully
    pub llm: Option<Arc<dyn LlmProvider>>,
    /// Billing client; `None` disables payment-link creation
    pub stripe: Option<Arc<StripeClient>>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create the resource container
    #[must_use]
    pub fn new(
        store: Arc<dyn StoreProvider>,
        llm: Option<Arc<dyn LlmProvider>>,
        stripe: Option<Arc<StripeClient>>,
        config: Arc<ServerConfig>,
    ) -> Self {
        Self {
            store,
            llm,
            stripe,
            config,
        }
    }

    /// Coach capability, when an LLM provider is configured
    #[must_use]
    pub fn coach(&self) -> Option<HealthCoach> {
        self.llm.clone().map(HealthCoach::new)
    }

    /// Food parser capability, when an LLM provider is configured
    #[must_use]
    pub fn food_parser(&self) -> Option<FoodParser> {
        self.llm.clone().map(FoodParser::new)
    }

    /// Sleep analyzer capability, when an LLM provider is configured
    #[must_use]
    pub fn sleep_analyzer(&self) -> Option<SleepInsightAnalyzer> {
        self.llm.clone().map(SleepInsightAnalyzer::new)
    }
}
