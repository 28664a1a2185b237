// ABOUTME: Foundation crate with entry models, error types, and shared constants
// ABOUTME: Consumed by the intelligence engine and the server crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

//! # Vitalis Core
//!
//! Foundation types for the Vitalis longevity platform:
//!
//! - **Models**: dated health entries (sleep, nutrition, workouts,
//!   supplements), goals, achievements, and user profiles
//! - **Errors**: the unified [`errors::AppError`] taxonomy with HTTP mapping
//! - **Constants**: scoring defaults, aggregation windows, and nutrient
//!   reference intakes

pub mod constants;
pub mod errors;
pub mod models;
