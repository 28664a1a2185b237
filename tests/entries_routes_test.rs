// ABOUTME: Integration tests for entry CRUD routes across the four domains
// ABOUTME: Upsert-by-date semantics, AI degradation, and parsed food logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

mod common;

use common::{create_test_user, send, test_app, CannedLlm, FailingLlm};
use http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use vitalis_server::store::StoreProvider;

#[tokio::test]
async fn test_sleep_entry_roundtrip() {
    let (app, store) = test_app(None);
    let user_id = create_test_user(&store).await;

    let response = send(
        app.clone(),
        "PUT",
        &format!("/api/sleep/entries/2025-06-01?user_id={user_id}"),
        Some(json!({"total_sleep": 7.5, "sleep_score": 85.0})),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = send(
        app,
        "GET",
        &format!("/api/sleep/entries?user_id={user_id}"),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    let entries = response.json()["entries"].as_array().unwrap().clone();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["date"], "2025-06-01");
}

#[tokio::test]
async fn test_upsert_same_date_replaces() {
    let (app, store) = test_app(None);
    let user_id = create_test_user(&store).await;
    let uri = format!("/api/sleep/entries/2025-06-01?user_id={user_id}");

    send(
        app.clone(),
        "PUT",
        &uri,
        Some(json!({"total_sleep": 6.0, "sleep_score": 70.0})),
    )
    .await;
    send(
        app.clone(),
        "PUT",
        &uri,
        Some(json!({"total_sleep": 8.0, "sleep_score": 90.0})),
    )
    .await;

    let entries = store.sleep_entries(user_id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert!((entries[0].total_sleep - 8.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_sleep_entry_saved_when_analyzer_fails() {
    // The AI analyzer is down; the write must still succeed, without analysis
    let (app, store) = test_app(Some(Arc::new(FailingLlm)));
    let user_id = create_test_user(&store).await;

    let response = send(
        app,
        "PUT",
        &format!("/api/sleep/entries/2025-06-02?user_id={user_id}"),
        Some(json!({"total_sleep": 7.0, "sleep_score": 80.0})),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    let entries = store.sleep_entries(user_id).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].ai_analysis.is_none());
}

#[tokio::test]
async fn test_sleep_entry_gets_analysis_when_analyzer_works() {
    let reply = json!({
        "overall_analysis": "Restful night",
        "key_factors": ["duration"],
        "personalized_tips": [],
        "potential_issues": [],
        "confidence_score": 0.8
    })
    .to_string();
    let (app, store) = test_app(Some(Arc::new(CannedLlm { reply })));
    let user_id = create_test_user(&store).await;

    send(
        app,
        "PUT",
        &format!("/api/sleep/entries/2025-06-02?user_id={user_id}"),
        Some(json!({"total_sleep": 7.0, "sleep_score": 80.0})),
    )
    .await;

    let entries = store.sleep_entries(user_id).await.unwrap();
    let analysis = entries[0].ai_analysis.as_ref().unwrap();
    assert_eq!(analysis.overall_analysis, "Restful night");
}

#[tokio::test]
async fn test_delete_entry() {
    let (app, store) = test_app(None);
    let user_id = create_test_user(&store).await;
    let uri = format!("/api/workouts/entries/2025-06-01?user_id={user_id}");

    send(
        app.clone(),
        "PUT",
        &uri,
        Some(json!({"workout_type": "run", "duration_minutes": 30.0, "completed": true})),
    )
    .await;
    let response = send(app, "DELETE", &uri, None).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(store.workout_entries(user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_domain_is_rejected() {
    let (app, store) = test_app(None);
    let user_id = create_test_user(&store).await;
    let response = send(
        app,
        "GET",
        &format!("/api/meditation/entries?user_id={user_id}"),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_parse_food_logs_into_daily_entry() {
    let reply = json!({
        "name": "greek yogurt",
        "quantity": 1,
        "unit": "cup",
        "calories": 150,
        "protein": 20,
        "carbs": 9,
        "fats": 4,
        "fiber": 0,
        "sugar": 9,
        "sodium": 65,
        "micronutrients": {"calcium_mg": 250}
    })
    .to_string();
    let (app, store) = test_app(Some(Arc::new(CannedLlm { reply })));
    let user_id = create_test_user(&store).await;

    let response = send(
        app,
        "POST",
        "/api/nutrition/parse",
        Some(json!({
            "user_id": user_id,
            "description": "a cup of greek yogurt",
            "date": "2025-06-01",
            "meal_type": "breakfast"
        })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["item"]["name"], "greek yogurt");

    let entries = store.nutrition_entries(user_id).await.unwrap();
    assert_eq!(entries.len(), 1);
    // Daily totals recomputed from the appended item
    assert!((entries[0].daily_totals.calories - 150.0).abs() < f64::EPSILON);
    assert!((entries[0].micronutrients["calcium_mg"] - 250.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_parse_food_failure_does_not_create_entries() {
    let (app, store) = test_app(Some(Arc::new(FailingLlm)));
    let user_id = create_test_user(&store).await;

    let response = send(
        app,
        "POST",
        "/api/nutrition/parse",
        Some(json!({
            "user_id": user_id,
            "description": "mystery stew",
            "date": "2025-06-01"
        })),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert!(store.nutrition_entries(user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_parse_food_unconfigured_is_unavailable() {
    let (app, store) = test_app(None);
    let user_id = create_test_user(&store).await;
    let response = send(
        app,
        "POST",
        "/api/nutrition/parse",
        Some(json!({"user_id": user_id, "description": "toast"})),
    )
    .await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}
