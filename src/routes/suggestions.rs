// ABOUTME: Route handlers for workout suggestion content
// ABOUTME: Public reads; admin-gated create, update, and delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! Workout suggestion routes. Same surface shape as health tips.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::constants::limits;
use crate::database::suggestions::{CreateSuggestionRequest, UpdateSuggestionRequest};
use crate::errors::{AppError, ErrorCode};
use crate::middleware::require_admin;
use crate::models::{Audience, Difficulty, SuggestionCategory};
use crate::server::ServerResources;

/// Request body for creating a workout suggestion
#[derive(Debug, Deserialize)]
pub struct CreateSuggestionBody {
    /// Display title
    pub title: String,
    /// Suggestion body
    pub description: String,
    /// Category name
    pub category: String,
    /// Difficulty name; defaults to beginner
    pub difficulty: Option<String>,
    /// Suggested duration in minutes
    pub duration_minutes: i64,
    /// Tags for filtering
    #[serde(default)]
    pub tags: Vec<String>,
    /// Audience name; defaults to all
    pub target_audience: Option<String>,
    /// Display priority; defaults to 0
    pub priority: Option<i64>,
    /// Whether the suggestion is surfaced immediately; defaults to true
    pub is_active: Option<bool>,
}

impl CreateSuggestionBody {
    /// Validate and convert into a domain request
    fn into_request(self) -> Result<CreateSuggestionRequest, AppError> {
        if self.title.trim().is_empty() || self.description.trim().is_empty() {
            return Err(AppError::new(
                ErrorCode::MissingRequiredField,
                "Title, description, and category are required",
            ));
        }

        let category: SuggestionCategory = self.category.parse()?;
        let difficulty = match self.difficulty.as_deref() {
            Some(value) => value.parse()?,
            None => Difficulty::default(),
        };
        let target_audience = match self.target_audience.as_deref() {
            Some(value) => value.parse()?,
            None => Audience::default(),
        };

        if self.duration_minutes < 1 {
            return Err(AppError::invalid_input(
                "Duration must be at least 1 minute",
            ));
        }

        let priority = self.priority.unwrap_or(0);
        if !(0..=limits::MAX_CONTENT_PRIORITY).contains(&priority) {
            return Err(AppError::out_of_range("Priority must be between 0 and 10"));
        }

        Ok(CreateSuggestionRequest {
            title: self.title,
            description: self.description,
            category,
            difficulty,
            duration_minutes: self.duration_minutes,
            tags: self
                .tags
                .into_iter()
                .map(|tag| tag.trim().to_owned())
                .filter(|tag| !tag.is_empty())
                .collect(),
            target_audience,
            priority,
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

/// Request body for partially updating a workout suggestion
#[derive(Debug, Deserialize, Default)]
pub struct UpdateSuggestionBody {
    /// New title (if provided)
    pub title: Option<String>,
    /// New body (if provided)
    pub description: Option<String>,
    /// New category (if provided)
    pub category: Option<String>,
    /// New difficulty (if provided)
    pub difficulty: Option<String>,
    /// New duration (if provided)
    pub duration_minutes: Option<i64>,
    /// New tags (if provided)
    pub tags: Option<Vec<String>>,
    /// New audience (if provided)
    pub target_audience: Option<String>,
    /// New priority (if provided)
    pub priority: Option<i64>,
    /// New active flag (if provided)
    pub is_active: Option<bool>,
}

impl UpdateSuggestionBody {
    /// Validate and convert into a domain request
    fn into_request(self) -> Result<UpdateSuggestionRequest, AppError> {
        let category = self
            .category
            .as_deref()
            .map(str::parse::<SuggestionCategory>)
            .transpose()?;
        let difficulty = self
            .difficulty
            .as_deref()
            .map(str::parse::<Difficulty>)
            .transpose()?;
        let target_audience = self
            .target_audience
            .as_deref()
            .map(str::parse::<Audience>)
            .transpose()?;

        if self.duration_minutes.is_some_and(|d| d < 1) {
            return Err(AppError::invalid_input(
                "Duration must be at least 1 minute",
            ));
        }
        if let Some(priority) = self.priority {
            if !(0..=limits::MAX_CONTENT_PRIORITY).contains(&priority) {
                return Err(AppError::out_of_range("Priority must be between 0 and 10"));
            }
        }

        Ok(UpdateSuggestionRequest {
            title: self.title,
            description: self.description,
            category,
            difficulty,
            duration_minutes: self.duration_minutes,
            tags: self.tags,
            target_audience,
            priority: self.priority,
            is_active: self.is_active,
        })
    }
}

/// Parse a path segment as a suggestion ID
fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::invalid_input("Invalid workout suggestion ID"))
}

/// Workout suggestion routes handler
pub struct SuggestionRoutes;

impl SuggestionRoutes {
    /// Create all workout suggestion routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/workout-suggestions/active",
                get(Self::handle_list_active),
            )
            .route("/api/workout-suggestions/all", get(Self::handle_list_all))
            .route("/api/workout-suggestions/:id", get(Self::handle_get))
            .route("/api/workout-suggestions", post(Self::handle_create))
            .route("/api/workout-suggestions/:id", put(Self::handle_update))
            .route("/api/workout-suggestions/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    /// Handle GET /api/workout-suggestions/active - public listing
    async fn handle_list_active(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let suggestions = resources.database.suggestions().list_active().await?;
        Ok((StatusCode::OK, Json(suggestions)).into_response())
    }

    /// Handle GET /api/workout-suggestions/all - full listing, admin only
    async fn handle_list_all(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        require_admin(&auth)?;
        let suggestions = resources.database.suggestions().list_all().await?;
        Ok((StatusCode::OK, Json(suggestions)).into_response())
    }

    /// Handle GET /api/workout-suggestions/:id - public read
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let suggestion_id = parse_id(&id)?;
        let suggestion = resources
            .database
            .suggestions()
            .get(suggestion_id)
            .await?
            .ok_or_else(|| AppError::not_found("Workout suggestion"))?;
        Ok((StatusCode::OK, Json(suggestion)).into_response())
    }

    /// Handle POST /api/workout-suggestions - admin create
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<CreateSuggestionBody>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        require_admin(&auth)?;

        let request = body.into_request()?;
        let suggestion = resources
            .database
            .suggestions()
            .create(auth.user_id, &request)
            .await?;
        Ok((StatusCode::CREATED, Json(suggestion)).into_response())
    }

    /// Handle PUT /api/workout-suggestions/:id - admin update
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(body): Json<UpdateSuggestionBody>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        require_admin(&auth)?;

        let suggestion_id = parse_id(&id)?;
        let request = body.into_request()?;
        let suggestion = resources
            .database
            .suggestions()
            .update(suggestion_id, &request)
            .await?
            .ok_or_else(|| AppError::not_found("Workout suggestion"))?;
        Ok((StatusCode::OK, Json(suggestion)).into_response())
    }

    /// Handle DELETE /api/workout-suggestions/:id - admin delete
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        require_admin(&auth)?;

        let suggestion_id = parse_id(&id)?;
        let deleted = resources.database.suggestions().delete(suggestion_id).await?;

        if !deleted {
            return Err(AppError::not_found("Workout suggestion"));
        }

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Workout suggestion deleted successfully" })),
        )
            .into_response())
    }
}
