// ABOUTME: Stripe billing client for customer creation and payment links
// ABOUTME: Form-encoded REST calls against the Stripe API with error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

//! Stripe integration.
//!
//! Two operations back the payment-link endpoint: lazily creating a billing
//! customer for a user, and creating a hosted checkout link for a price.
//! Failures surface as external-service errors and are reported to the
//! caller as a generic failure, never with provider detail.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;
use vitalis_core::errors::{AppError, AppResult};

/// Stripe API base URL
const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

/// Request timeout for billing calls
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// A created payment link
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentLink {
    /// Link id
    pub id: String,
    /// Hosted checkout URL
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct CustomerResponse {
    id: String,
}

/// Stripe API client
pub struct StripeClient {
    client: Client,
    secret_key: String,
    api_base: String,
}

impl StripeClient {
    /// Create a client with the given secret key
    ///
    /// # Errors
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new(secret_key: &str) -> AppResult<Self> {
        Self::with_api_base(secret_key, STRIPE_API_BASE)
    }

    /// Create a client against a custom API base (used by tests)
    ///
    /// # Errors
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn with_api_base(secret_key: &str, api_base: &str) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            secret_key: secret_key.to_owned(),
            api_base: api_base.trim_end_matches('/').to_owned(),
        })
    }

    /// Create a billing customer for a user
    ///
    /// # Errors
    /// Returns an external-service error when the provider call fails.
    pub async fn create_customer(&self, user_id: Uuid, email: &str) -> AppResult<String> {
        debug!(%user_id, "creating billing customer");
        let response = self
            .client
            .post(format!("{}/customers", self.api_base))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&[
                ("email", email),
                ("metadata[user_id]", &user_id.to_string()),
            ])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| AppError::external_service("stripe", e.to_string()))?;

        let customer: CustomerResponse = response.json().await?;
        info!(%user_id, customer_id = %customer.id, "billing customer created");
        Ok(customer.id)
    }

    /// Create a hosted checkout link for a price
    ///
    /// # Errors
    /// Returns an external-service error when the provider call fails.
    pub async fn create_payment_link(
        &self,
        customer_id: &str,
        price_id: &str,
        success_url: &str,
        cancel_url: &str,
    ) -> AppResult<PaymentLink> {
        debug!(customer_id, price_id, "creating payment link");
        let response = self
            .client
            .post(format!("{}/checkout/sessions", self.api_base))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&[
                ("customer", customer_id),
                ("mode", "subscription"),
                ("line_items[0][price]", price_id),
                ("line_items[0][quantity]", "1"),
                ("success_url", success_url),
                ("cancel_url", cancel_url),
            ])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| AppError::external_service("stripe", e.to_string()))?;

        let link: PaymentLink = response.json().await?;
        info!(customer_id, link_id = %link.id, "payment link created");
        Ok(link)
    }
}
