// ABOUTME: Route module organization for the fitlog HTTP API
// ABOUTME: One module per resource; thin handlers that delegate to managers and the analysis layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! Route modules.
//!
//! Each domain module contains route definitions and thin handler functions
//! that delegate to the database managers and the analysis layer.

/// Admin API routes for user management and system analytics
pub mod admin;
/// Analytics generation and snapshot routes
pub mod analytics;
/// Authentication and profile routes
pub mod auth;
/// Goal CRUD and progress routes
pub mod goals;
/// Health check and readiness routes
pub mod health;
/// Health tip content routes
pub mod health_tips;
/// Workout suggestion content routes
pub mod suggestions;
/// Workout CRUD and stats routes
pub mod workouts;

/// Admin route handlers
pub use admin::AdminRoutes;
/// Analytics route handlers
pub use analytics::AnalyticsRoutes;
/// Authentication route handlers
pub use auth::AuthRoutes;
/// Authentication service
pub use auth::AuthService;
/// Login request payload
pub use auth::LoginRequest;
/// Login response with token
pub use auth::LoginResponse;
/// User registration request
pub use auth::RegisterRequest;
/// Registration response with user details
pub use auth::RegisterResponse;
/// User information DTO
pub use auth::UserInfo;
/// Goal route handlers
pub use goals::GoalRoutes;
/// Health check route handlers
pub use health::HealthRoutes;
/// Health tip route handlers
pub use health_tips::HealthTipRoutes;
/// Workout suggestion route handlers
pub use suggestions::SuggestionRoutes;
/// Workout route handlers
pub use workouts::WorkoutRoutes;
