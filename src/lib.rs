// ABOUTME: Main library entry point for the fitlog fitness-tracking API
// ABOUTME: REST API for workouts, goals, analytics, and admin-authored content
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

#![deny(unsafe_code)]

//! # Fitlog
//!
//! A REST API for logging workouts, tracking fitness goals, generating
//! activity analytics, and serving admin-authored content (health tips and
//! workout suggestions).
//!
//! ## Architecture
//!
//! - **Models**: domain types shared across layers
//! - **Database**: SQLite via sqlx, one manager per resource
//! - **Intelligence**: report aggregation and goal progress arithmetic
//! - **Routes**: axum handlers, one module per resource
//! - **Middleware**: bearer-token auth, admin guard, CORS
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fitlog::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("fitlog configured for port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Authentication: JWT tokens and password hashing
pub mod auth;

/// Configuration management
pub mod config;

/// Application constants
pub mod constants;

/// Database connection, migrations, and per-domain managers
pub mod database;

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// Report aggregation and goal progress computation
pub mod intelligence;

/// Production logging and structured output
pub mod logging;

/// HTTP middleware: authentication, admin guard, CORS
pub mod middleware;

/// Common data models
pub mod models;

/// HTTP route handlers
pub mod routes;

/// Server resources and router assembly
pub mod server;
