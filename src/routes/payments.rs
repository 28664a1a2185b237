// ABOUTME: Payment-link route validating the request and brokering Stripe calls
// ABOUTME: Per-field 400s, 404 for unknown users, generic 500 on provider failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

//! Payment link creation.
//!
//! `POST /api/payments/link` with `{userId, priceId, successUrl, cancelUrl}`.
//! All four must be non-empty strings (per-field 400 messages), the user must
//! exist (404), and non-POST methods answer 405. The user's stored billing
//! customer id is used, creating and persisting one on first request.
//! Provider failures log internally and surface as a generic 500.

use crate::resources::ServerResources;
use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;
use vitalis_core::errors::{AppError, AppResult};

/// Successful payment-link response
#[derive(Debug, Serialize)]
pub struct PaymentLinkResponse {
    /// Always true on the success path
    pub success: bool,
    /// Hosted checkout URL
    #[serde(rename = "paymentLink")]
    pub payment_link: String,
    /// Link id
    #[serde(rename = "paymentLinkId")]
    pub payment_link_id: String,
}

/// Payment routes handler
pub struct PaymentRoutes;

impl PaymentRoutes {
    /// Create all payment routes
    ///
    /// Only `POST` is routed; axum answers other methods on the path with
    /// 405, and the CORS layer answers `OPTIONS` preflight with 200.
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/payments/link", post(Self::create_link))
            .with_state(resources)
    }

    /// Pull one required non-empty string field from the body
    fn required_field<'a>(body: &'a serde_json::Value, field: &str) -> AppResult<&'a str> {
        body.get(field)
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::missing_field(field))
    }

    /// Create a payment link for a user and price
    async fn create_link(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<serde_json::Value>,
    ) -> AppResult<Json<PaymentLinkResponse>> {
        // Validate in a stable order so each missing field names itself
        let user_id = Self::required_field(&body, "userId")?;
        let price_id = Self::required_field(&body, "priceId")?;
        let success_url = Self::required_field(&body, "successUrl")?;
        let cancel_url = Self::required_field(&body, "cancelUrl")?;

        let user_id: Uuid = user_id
            .parse()
            .map_err(|_| AppError::invalid_input("userId is not a valid id"))?;

        let profile = resources
            .store
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        let stripe = resources
            .stripe
            .as_ref()
            .ok_or_else(|| AppError::internal("payment provider is not configured"))?;

        let customer_id = match profile.billing_customer_id {
            Some(existing) => existing,
            None => {
                let created = stripe
                    .create_customer(user_id, &profile.email)
                    .await
                    .map_err(|err| {
                        error!(%user_id, "billing customer creation failed: {err}");
                        AppError::internal("Failed to create payment link")
                    })?;
                resources
                    .store
                    .update_billing_customer(user_id, &created)
                    .await?;
                created
            }
        };

        let link = stripe
            .create_payment_link(&customer_id, price_id, success_url, cancel_url)
            .await
            .map_err(|err| {
                error!(%user_id, "payment link creation failed: {err}");
                AppError::internal("Failed to create payment link")
            })?;

        Ok(Json(PaymentLinkResponse {
            success: true,
            payment_link: link.url,
            payment_link_id: link.id,
        }))
    }
}
