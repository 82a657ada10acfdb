// ABOUTME: Admin route handlers for user management and system analytics
// ABOUTME: List, update, and cascade-delete users; cross-user metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! Admin routes.
//!
//! Every endpoint requires the admin role. User deletion cascades through
//! workouts, goals, and snapshots in one transaction, and the last admin
//! account cannot be removed.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::middleware::require_admin;
use crate::models::{User, UserRole};
use crate::routes::analytics::system_analytics;
use crate::server::ServerResources;

/// User row in admin listings
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminUserResponse {
    /// User ID
    pub user_id: String,
    /// Username
    pub username: String,
    /// Email address
    pub email: String,
    /// Role name
    pub role: String,
    /// Account creation time
    pub created_at: String,
    /// Last successful login, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
}

impl From<&User> for AdminUserResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.as_str().to_owned(),
            created_at: user.created_at.to_rfc3339(),
            last_login: user.last_login.map(|dt| dt.to_rfc3339()),
        }
    }
}

/// Request body for updating a user as admin
#[derive(Debug, Deserialize, Default)]
pub struct AdminUpdateUserBody {
    /// New username (if provided)
    pub username: Option<String>,
    /// New email (if provided)
    pub email: Option<String>,
    /// New role (if provided)
    pub role: Option<String>,
}

/// Parse a path segment as a user ID
fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::invalid_input("Invalid user ID"))
}

/// Admin routes handler
pub struct AdminRoutes;

impl AdminRoutes {
    /// Create all admin routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/admin/users", get(Self::handle_list_users))
            .route("/api/admin/users/:id", put(Self::handle_update_user))
            .route("/api/admin/users/:id", delete(Self::handle_delete_user))
            .route("/api/admin/analytics", get(Self::handle_analytics))
            .with_state(resources)
    }

    /// Handle GET /api/admin/users - list every account
    async fn handle_list_users(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        require_admin(&auth)?;

        let users = resources.database.users().list().await?;
        let response: Vec<AdminUserResponse> = users.iter().map(Into::into).collect();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle PUT /api/admin/users/:id - update profile fields and role
    async fn handle_update_user(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(body): Json<AdminUpdateUserBody>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        require_admin(&auth)?;

        let user_id = parse_id(&id)?;
        let role = body.role.as_deref().map(str::parse::<UserRole>).transpose()?;

        let users = resources.database.users();
        let username = body
            .username
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let email = body
            .email
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        if username.is_some() || email.is_some() {
            let collision = users
                .get_by_username_or_email(
                    username.unwrap_or(""),
                    email.as_deref().unwrap_or(""),
                )
                .await?;
            if let Some(existing) = collision {
                if existing.id != user_id {
                    return Err(AppError::already_exists(
                        "User with this email or username already exists",
                    ));
                }
            }
        }

        let mut user = users
            .update_profile(user_id, username, email.as_deref())
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        if let Some(role) = role {
            users.set_role(user_id, role).await?;
            user.role = role;
        }

        Ok((StatusCode::OK, Json(AdminUserResponse::from(&user))).into_response())
    }

    /// Handle DELETE /api/admin/users/:id - cascade delete
    async fn handle_delete_user(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        require_admin(&auth)?;

        let user_id = parse_id(&id)?;
        let users = resources.database.users();

        let target = users
            .get(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        // The system must always retain at least one admin account.
        if target.role.is_admin() && users.count_admins().await? <= 1 {
            return Err(AppError::invalid_input("Cannot delete the last admin user"));
        }

        let deleted = users.delete_cascade(user_id).await?;
        if !deleted {
            return Err(AppError::not_found("User"));
        }

        tracing::info!(deleted_user = %user_id, by = %auth.user_id, "user deleted with cascade");

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "User and associated data deleted successfully"
            })),
        )
            .into_response())
    }

    /// Handle GET /api/admin/analytics - cross-user metrics
    async fn handle_analytics(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        require_admin(&auth)?;

        let response = system_analytics(&resources).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
