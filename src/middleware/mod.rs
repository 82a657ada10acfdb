// ABOUTME: HTTP middleware: authentication, admin guard, CORS
// ABOUTME: Request-scoped concerns shared by every route module
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! Middleware for request authentication and cross-cutting HTTP concerns.

/// Admin role guard
pub mod admin_guard;
/// Bearer-token authentication middleware
pub mod auth;
/// CORS layer construction
pub mod cors;

pub use admin_guard::require_admin;
pub use auth::AuthMiddleware;
pub use cors::cors_layer;
