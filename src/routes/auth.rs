// ABOUTME: User authentication route handlers for registration, login, and profile
// ABOUTME: Thin handlers delegating to AuthService for credential and profile logic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! Authentication routes.
//!
//! Registration and login are public; the profile endpoints require a
//! Bearer token. Handlers stay thin and delegate to [`AuthService`].

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth::{hash_password, verify_password};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::User;
use crate::server::ServerResources;

/// User registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Desired username
    pub username: String,
    /// Account email
    pub email: String,
    /// Plaintext password, hashed before storage
    pub password: String,
}

/// User registration response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Created user ID
    pub user_id: String,
    /// Human-readable confirmation
    pub message: String,
}

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Account email
    pub email: String,
    /// Plaintext password
    pub password: String,
}

/// User info for login and profile responses
#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfo {
    /// User ID
    pub user_id: String,
    /// Username
    pub username: String,
    /// Email address
    pub email: String,
    /// Role name
    pub role: String,
    /// Last successful login, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.as_str().to_owned(),
            last_login: user.last_login.map(|dt| dt.to_rfc3339()),
        }
    }
}

/// User login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed JWT for subsequent requests
    pub jwt_token: String,
    /// Token expiry as RFC 3339
    pub expires_at: String,
    /// The authenticated user
    pub user: UserInfo,
}

/// Profile update request
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    /// New username (if provided)
    pub username: Option<String>,
    /// New email (if provided)
    pub email: Option<String>,
}

/// Authentication service for business logic
#[derive(Clone)]
pub struct AuthService {
    resources: Arc<ServerResources>,
}

impl AuthService {
    /// Create the service over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Register a new user account
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed input and
    /// `ResourceAlreadyExists` for duplicate username or email.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<RegisterResponse> {
        let username = request.username.trim().to_owned();
        let email = request.email.trim().to_lowercase();

        if username.is_empty() {
            return Err(AppError::new(
                ErrorCode::MissingRequiredField,
                "Username is required",
            ));
        }
        if !email.contains('@') {
            return Err(AppError::invalid_input("Invalid email address"));
        }
        if request.password.len() < 8 {
            return Err(AppError::invalid_input(
                "Password must be at least 8 characters",
            ));
        }

        let users = self.resources.database.users();
        if users
            .get_by_username_or_email(&username, &email)
            .await?
            .is_some()
        {
            return Err(AppError::already_exists(
                "User with this email or username already exists",
            ));
        }

        // bcrypt is CPU-bound; keep it off the async worker threads.
        let password = request.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AppError::internal(format!("Hashing task failed: {e}")))??;

        let user = User::new(username, email, password_hash);
        users.create(&user).await?;

        tracing::info!(user_id = %user.id, "user registered");

        Ok(RegisterResponse {
            user_id: user.id.to_string(),
            message: "User registered successfully".to_owned(),
        })
    }

    /// Authenticate a user and mint a JWT
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` for unknown emails and wrong passwords; the
    /// message never distinguishes the two.
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let users = self.resources.database.users();
        let mut user = users
            .get_by_email(&request.email.trim().to_lowercase())
            .await?
            .ok_or_else(|| AppError::auth_invalid("Invalid email or password"))?;

        let password = request.password;
        let password_hash = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
            .await
            .map_err(|e| AppError::internal(format!("Verification task failed: {e}")))??;

        if !valid {
            return Err(AppError::auth_invalid("Invalid email or password"));
        }

        let now = Utc::now();
        users.update_last_login(user.id, now).await?;
        user.last_login = Some(now);

        let jwt_token = self.resources.auth_manager.generate_token(&user)?;
        let expires_at = self.resources.auth_manager.token_expiry(now).to_rfc3339();

        tracing::info!(user_id = %user.id, "user logged in");

        Ok(LoginResponse {
            jwt_token,
            expires_at,
            user: UserInfo::from(&user),
        })
    }

    /// Load the caller's profile
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the account vanished.
    pub async fn profile(&self, user_id: uuid::Uuid) -> AppResult<UserInfo> {
        let user = self
            .resources
            .database
            .users()
            .get(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;
        Ok(UserInfo::from(&user))
    }

    /// Update the caller's username and/or email
    ///
    /// Password and role cannot change through this path.
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` when the new identity collides with
    /// another account.
    pub async fn update_profile(
        &self,
        user_id: uuid::Uuid,
        request: UpdateProfileRequest,
    ) -> AppResult<UserInfo> {
        let users = self.resources.database.users();

        let username = request
            .username
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let email = request
            .email
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        if let Some(email) = &email {
            if !email.contains('@') {
                return Err(AppError::invalid_input("Invalid email address"));
            }
        }

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

        let user = users
            .update_profile(user_id, username, email.as_deref())
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        Ok(UserInfo::from(&user))
    }
}

/// Authentication routes handler
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(Self::handle_register))
            .route("/api/auth/login", post(Self::handle_login))
            .route("/api/auth/profile", get(Self::handle_get_profile))
            .route("/api/auth/profile", put(Self::handle_update_profile))
            .with_state(resources)
    }

    /// Handle POST /api/auth/register
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let response = AuthService::new(resources).register(body).await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle POST /api/auth/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let response = AuthService::new(resources).login(body).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/auth/profile
    async fn handle_get_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        let response = AuthService::new(resources).profile(auth.user_id).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle PUT /api/auth/profile
    async fn handle_update_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<UpdateProfileRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        let response = AuthService::new(resources)
            .update_profile(auth.user_id, body)
            .await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
