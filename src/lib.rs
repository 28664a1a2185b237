// ABOUTME: Main library entry point for the Vitalis health platform server
// ABOUTME: Wires the store, intelligence, LLM, billing, and REST layers together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

//! # Vitalis Server
//!
//! Backend for the Vitalis consumer health/longevity tracker. Users log
//! sleep, nutrition, workouts, and supplements; the server aggregates those
//! entries into domain stats and a composite longevity score, serves
//! dashboard and report payloads over REST, brokers LLM-backed coaching /
//! food parsing / sleep analysis, and creates Stripe payment links.
//!
//! ## Architecture
//!
//! - **Store** ([`store`]): repository trait over the per-user JSON document
//!   tree with in-memory and realtime-database REST backends, live change
//!   subscriptions, and an optimistic write wrapper
//! - **Intelligence** (`vitalis-intelligence`): pure domain stat calculators
//!   and the longevity composite scorer
//! - **LLM** ([`llm`]): one chat-completion provider behind three narrow
//!   capability clients, all failure-tolerant
//! - **Billing** ([`billing`]): Stripe customer and payment-link creation
//! - **Routes** ([`routes`]): the axum REST surface

pub mod billing;
pub mod config;
pub mod llm;
pub mod logging;
pub mod middleware;
pub mod overview;
pub mod resources;
pub mod routes;
pub mod store;

/// Unified error types, re-exported from the core crate
pub use vitalis_core::errors;
