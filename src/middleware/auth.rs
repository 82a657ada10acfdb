// ABOUTME: Authentication middleware for request authentication and user context extraction
// ABOUTME: Validates Bearer JWTs and loads the referenced user for every protected route
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use std::sync::Arc;

use crate::auth::{AuthManager, AuthResult};
use crate::database::Database;
use crate::errors::{AppError, AppResult};

/// Middleware for bearer-token authentication
#[derive(Clone)]
pub struct AuthMiddleware {
    auth_manager: AuthManager,
    database: Arc<Database>,
}

impl AuthMiddleware {
    /// Create new auth middleware
    #[must_use]
    pub const fn new(auth_manager: AuthManager, database: Arc<Database>) -> Self {
        Self {
            auth_manager,
            database,
        }
    }

    /// Authenticate a request from its headers
    ///
    /// Expects `Authorization: Bearer <jwt>`. The referenced user is loaded
    /// so a deleted account invalidates outstanding tokens immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The authorization header is missing or not a Bearer token
    /// - JWT validation fails (bad signature, malformed, expired)
    /// - The token's user no longer exists
    #[tracing::instrument(
        skip(self, headers),
        fields(user_id = tracing::field::Empty, success = tracing::field::Empty)
    )]
    pub async fn authenticate_request(
        &self,
        headers: &axum::http::HeaderMap,
    ) -> AppResult<AuthResult> {
        let auth_header = headers
            .get("authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                tracing::debug!("Authentication failed: missing authorization header");
                AppError::auth_required()
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            tracing::debug!("Authentication failed: authorization header is not a Bearer token");
            AppError::auth_invalid(
                "Invalid authorization header format - must be 'Bearer <token>'",
            )
        })?;

        let claims = self.auth_manager.validate_token(token).inspect_err(|_| {
            tracing::Span::current().record("success", false);
        })?;

        let user_id = uuid::Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::auth_invalid("Invalid user ID in token"))?;

        let user = self
            .database
            .users()
            .get(user_id)
            .await?
            .ok_or_else(|| AppError::auth_invalid("Token references a deleted user"))?;

        tracing::Span::current()
            .record("user_id", user_id.to_string())
            .record("success", true);

        Ok(AuthResult {
            user_id,
            role: user.role,
        })
    }

    /// Get reference to the auth manager for testing purposes
    #[must_use]
    pub const fn auth_manager(&self) -> &AuthManager {
        &self.auth_manager
    }
}
