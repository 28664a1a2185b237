// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses environment variables into a strongly typed ServerConfig
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

//! Environment-based configuration management for production deployment

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Standard operational logging
    #[default]
    Info,
    /// Verbose debugging
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Environment type for logging format and error detail policy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }
}

/// Store backend selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum StoreBackendConfig {
    /// In-memory store for development and tests
    Memory,
    /// Firebase-style realtime database REST backend
    Firebase {
        /// Base URL of the database (e.g. `https://app.firebaseio.com`)
        base_url: String,
        /// Optional database auth token appended as `?auth=`
        auth_token: Option<String>,
    },
}

impl StoreBackendConfig {
    /// Parse from the `STORE_URL` value
    ///
    /// `memory` (or empty) selects the in-memory store; an `http(s)` URL
    /// selects the realtime-database REST backend.
    #[must_use]
    pub fn from_url(url: &str, auth_token: Option<String>) -> Self {
        if url.is_empty() || url == "memory" {
            Self::Memory
        } else {
            Self::Firebase {
                base_url: url.trim_end_matches('/').to_owned(),
                auth_token,
            }
        }
    }
}

/// Stripe billing configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BillingConfig {
    /// Secret API key (`STRIPE_SECRET_KEY`); billing routes fail without it
    pub stripe_secret_key: Option<String>,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated allowed origins, `*` or empty for any
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_owned(),
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP bind port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Log level
    pub log_level: LogLevel,
    /// Store backend
    pub store: StoreBackendConfig,
    /// Billing settings
    pub billing: BillingConfig,
    /// CORS settings
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error when a present variable fails to parse (e.g. a
    /// non-numeric `HTTP_PORT`). Missing variables fall back to defaults.
    pub fn from_env() -> Result<Self> {
        let http_port = match env::var("HTTP_PORT") {
            Ok(port) => port
                .parse::<u16>()
                .with_context(|| format!("invalid HTTP_PORT value: {port}"))?,
            Err(_) => 8081,
        };

        let environment = Environment::from_str_or_default(
            &env::var("ENVIRONMENT").unwrap_or_default(),
        );
        let log_level = LogLevel::from_str_or_default(&env::var("RUST_LOG").unwrap_or_default());

        let store_url = env::var("STORE_URL").unwrap_or_else(|_| "memory".to_owned());
        let store = StoreBackendConfig::from_url(&store_url, env::var("STORE_AUTH_TOKEN").ok());

        let stripe_secret_key = env::var("STRIPE_SECRET_KEY").ok().filter(|k| !k.is_empty());
        if stripe_secret_key.is_none() {
            warn!("STRIPE_SECRET_KEY not set - payment link creation disabled");
        }

        let allowed_origins = env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_owned());

        Ok(Self {
            http_port,
            environment,
            log_level,
            store,
            billing: BillingConfig { stripe_secret_key },
            cors: CorsConfig { allowed_origins },
        })
    }

    /// One-line summary for startup logging; never includes secrets
    #[must_use]
    pub fn summary(&self) -> String {
        let store = match &self.store {
            StoreBackendConfig::Memory => "memory".to_owned(),
            StoreBackendConfig::Firebase { base_url, .. } => format!("firebase ({base_url})"),
        };
        format!(
            "port={} environment={:?} store={} billing={}",
            self.http_port,
            self.environment,
            store,
            if self.billing.stripe_secret_key.is_some() {
                "enabled"
            } else {
                "disabled"
            }
        )
    }
}
