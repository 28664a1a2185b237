// ABOUTME: Integration tests for report payload assembly
// ABOUTME: Known report types produce sectioned payloads; unknown types answer 400
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

mod common;

use chrono::NaiveDate;
use common::{create_test_user, send, test_app};
use http::StatusCode;
use vitalis_core::models::SleepEntry;
use vitalis_server::store::StoreProvider;

#[tokio::test]
async fn test_weekly_summary_report_sections() {
    let (app, store) = test_app(None);
    let user_id = create_test_user(&store).await;
    for day in 1..=5 {
        store
            .upsert_sleep_entry(
                user_id,
                &SleepEntry::new(NaiveDate::from_ymd_opt(2025, 6, day).unwrap(), 7.0, 80.0),
            )
            .await
            .unwrap();
    }

    let response = send(
        app,
        "GET",
        &format!("/api/reports/weekly-summary?user_id={user_id}"),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["report_type"], "weekly-summary");
    assert_eq!(body["title"], "Weekly Health Summary");
    let headings: Vec<&str> = body["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["heading"].as_str().unwrap())
        .collect();
    assert_eq!(
        headings,
        vec!["Sleep", "Nutrition", "Workouts", "Supplements"]
    );
    assert!(body["metrics"]["longevity_score"].is_number());
}

#[tokio::test]
async fn test_longevity_report() {
    let (app, store) = test_app(None);
    let user_id = create_test_user(&store).await;
    let response = send(
        app,
        "GET",
        &format!("/api/reports/longevity?user_id={user_id}"),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["title"], "Longevity Report");
}

#[tokio::test]
async fn test_unknown_report_type_is_rejected() {
    let (app, store) = test_app(None);
    let user_id = create_test_user(&store).await;
    let response = send(
        app,
        "GET",
        &format!("/api/reports/quarterly-novel?user_id={user_id}"),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
