// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory resources, stub LLM providers, and request helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health
#![allow(dead_code)]

//! Shared test utilities for `vitalis_server`
//!
//! Builds routers over the in-memory store with stub LLM providers so tests
//! exercise the REST surface without network access.

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::Router;
use http::{Request, StatusCode};
use std::sync::{Arc, Once};
use tower::ServiceExt;
use uuid::Uuid;
use vitalis_core::errors::{AppError, AppResult};
use vitalis_core::models::UserProfile;
use vitalis_server::config::ServerConfig;
use vitalis_server::llm::{ChatRequest, ChatResponse, LlmProvider};
use vitalis_server::resources::ServerResources;
use vitalis_server::routes;
use vitalis_server::store::{MemoryStore, StoreProvider};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .try_init();
    });
}

/// Stub LLM provider returning a fixed reply
pub struct CannedLlm {
    /// Reply returned by every completion
    pub reply: String,
}

#[async_trait]
impl LlmProvider for CannedLlm {
    async fn complete(&self, _request: &ChatRequest) -> AppResult<ChatResponse> {
        Ok(ChatResponse {
            content: self.reply.clone(),
            model: "stub".to_owned(),
            usage: None,
        })
    }

    fn display_name(&self) -> &str {
        "stub"
    }

    fn default_model(&self) -> &str {
        "stub"
    }
}

/// Stub LLM provider that always fails, for degraded-path tests
pub struct FailingLlm;

#[async_trait]
impl LlmProvider for FailingLlm {
    async fn complete(&self, _request: &ChatRequest) -> AppResult<ChatResponse> {
        Err(AppError::external_service("llm", "connection refused"))
    }

    fn display_name(&self) -> &str {
        "failing"
    }

    fn default_model(&self) -> &str {
        "failing"
    }
}

/// Default test configuration (memory store, billing disabled)
pub fn test_config() -> Arc<ServerConfig> {
    Arc::new(ServerConfig {
        http_port: 0,
        environment: vitalis_server::config::Environment::Testing,
        log_level: vitalis_server::config::LogLevel::Warn,
        store: vitalis_server::config::StoreBackendConfig::Memory,
        billing: vitalis_server::config::BillingConfig {
            stripe_secret_key: None,
        },
        cors: vitalis_server::config::CorsConfig::default(),
    })
}

/// Build resources over a fresh in-memory store
pub fn test_resources(llm: Option<Arc<dyn LlmProvider>>) -> (Arc<ServerResources>, Arc<MemoryStore>) {
    init_test_logging();
    let store = Arc::new(MemoryStore::new());
    let resources = Arc::new(ServerResources::new(
        store.clone(),
        llm,
        None,
        test_config(),
    ));
    (resources, store)
}

/// Build the full application router over fresh resources
pub fn test_app(llm: Option<Arc<dyn LlmProvider>>) -> (Router, Arc<MemoryStore>) {
    let (resources, store) = test_resources(llm);
    (routes::router(resources), store)
}

/// Create a user in the store and return its id
pub async fn create_test_user(store: &MemoryStore) -> Uuid {
    let profile = UserProfile::new("athlete@example.com");
    let user_id = profile.id;
    store.create_user(&profile).await.unwrap();
    user_id
}

/// Captured response with eagerly read body
pub struct TestResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Raw body bytes
    pub body: Vec<u8>,
    /// Response headers
    pub headers: http::HeaderMap,
}

impl TestResponse {
    /// Parse the body as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body was not JSON")
    }
}

/// Run a CORS preflight request against a path
pub async fn preflight(app: Router, uri: &str, method: &str) -> TestResponse {
    let request = Request::builder()
        .method("OPTIONS")
        .uri(uri)
        .header("origin", "https://app.example.com")
        .header("access-control-request-method", method)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.expect("request failed");
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body")
        .to_vec();
    TestResponse {
        status,
        body,
        headers,
    }
}

/// Run one request through the router and read the full response
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            builder.body(Body::from(json.to_string())).unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.expect("request failed");
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body")
        .to_vec();
    TestResponse {
        status,
        body,
        headers,
    }
}
