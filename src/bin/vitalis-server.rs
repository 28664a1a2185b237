// ABOUTME: Server binary: configuration, logging, store selection, and serving
// ABOUTME: Production entry point for the Vitalis health API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

//! # Vitalis API Server Binary
//!
//! Starts the Vitalis health API: loads environment configuration,
//! initializes logging, selects the store backend, and serves the REST
//! surface.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use vitalis_server::{
    billing::StripeClient,
    config::ServerConfig,
    llm::OpenAiCompatibleProvider,
    logging,
    resources::ServerResources,
    routes,
    store::Store,
};

#[derive(Parser)]
#[command(name = "vitalis-server")]
#[command(about = "Vitalis Health API - longevity tracking and coaching backend")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting Vitalis Health API");
    info!("{}", config.summary());

    let store = Store::from_config(&config.store)?;

    let llm = match OpenAiCompatibleProvider::from_env() {
        Ok(provider) => Some(Arc::new(provider) as Arc<dyn vitalis_server::llm::LlmProvider>),
        Err(err) => {
            warn!("LLM provider unavailable, AI features disabled: {err}");
            None
        }
    };

    let stripe = match &config.billing.stripe_secret_key {
        Some(key) => Some(Arc::new(StripeClient::new(key)?)),
        None => None,
    };

    let config = Arc::new(config);
    let resources = Arc::new(ServerResources::new(
        Arc::new(store),
        llm,
        stripe,
        config.clone(),
    ));

    let app = routes::router(resources);
    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolve on ctrl-c or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
