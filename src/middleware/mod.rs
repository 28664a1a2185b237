// ABOUTME: HTTP middleware configuration for the REST surface
// ABOUTME: CORS setup shared by all route groups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

pub mod cors;

pub use cors::setup_cors;
