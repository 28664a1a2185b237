// ABOUTME: Integration tests for health and readiness endpoints
// ABOUTME: Liveness JSON payloads for monitoring infrastructure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

mod common;

use common::{send, test_app};
use http::StatusCode;

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _store) = test_app(None);
    let response = send(app, "GET", "/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["status"], "healthy");
}

#[tokio::test]
async fn test_ready_endpoint() {
    let (app, _store) = test_app(None);
    let response = send(app, "GET", "/ready", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["status"], "ready");
}
