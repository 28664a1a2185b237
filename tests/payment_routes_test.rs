// ABOUTME: Integration tests for the payment-link endpoint's validation contract
// ABOUTME: Per-field 400s, 404 for unknown users, 405 on wrong method, CORS preflight
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

mod common;

use common::{create_test_user, preflight, send, test_app};
use http::StatusCode;
use serde_json::json;

fn full_body(user_id: &str) -> serde_json::Value {
    json!({
        "userId": user_id,
        "priceId": "price_123",
        "successUrl": "https://app.example.com/success",
        "cancelUrl": "https://app.example.com/cancel",
    })
}

#[tokio::test]
async fn test_each_missing_field_names_itself() {
    for field in ["userId", "priceId", "successUrl", "cancelUrl"] {
        let (app, store) = test_app(None);
        let user_id = create_test_user(&store).await;

        let mut body = full_body(&user_id.to_string());
        body.as_object_mut().unwrap().remove(field);

        let response = send(app, "POST", "/api/payments/link", Some(body)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "field {field}");
        let message = response.json()["error"]["message"]
            .as_str()
            .unwrap()
            .to_owned();
        assert!(message.contains(field), "message {message:?} names {field}");
    }
}

#[tokio::test]
async fn test_empty_string_field_is_rejected() {
    let (app, store) = test_app(None);
    let user_id = create_test_user(&store).await;

    let mut body = full_body(&user_id.to_string());
    body["priceId"] = json!("   ");

    let response = send(app, "POST", "/api/payments/link", Some(body)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let (app, _store) = test_app(None);
    let body = full_body(&uuid::Uuid::new_v4().to_string());
    let response = send(app, "POST", "/api/payments/link", Some(body)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wrong_method_is_rejected() {
    let (app, _store) = test_app(None);
    let response = send(app, "GET", "/api/payments/link", None).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_preflight_answers_ok_with_cors_headers() {
    let (app, _store) = test_app(None);
    let response = preflight(app, "/api/payments/link", "POST").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.is_empty());
    assert!(response
        .headers
        .contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn test_cors_header_present_on_post_response() {
    let (app, store) = test_app(None);
    let user_id = create_test_user(&store).await;

    let request = http::Request::builder()
        .method("POST")
        .uri("/api/payments/link")
        .header("content-type", "application/json")
        .header("origin", "https://app.example.com")
        .body(axum::body::Body::from(
            full_body(&user_id.to_string()).to_string(),
        ))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    // Billing is disabled in the test config, so the request itself fails,
    // but CORS headers must still be present on the error response.
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn test_billing_disabled_is_a_server_error() {
    let (app, store) = test_app(None);
    let user_id = create_test_user(&store).await;
    let response = send(
        app,
        "POST",
        "/api/payments/link",
        Some(full_body(&user_id.to_string())),
    )
    .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.json().get("error").is_some());
}
