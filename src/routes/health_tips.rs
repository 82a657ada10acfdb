// ABOUTME: Route handlers for health tip content
// ABOUTME: Public reads; admin-gated create, update, and delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! Health tip routes.
//!
//! Reads are public (the frontend shows tips before login); every write and
//! the full unfiltered listing require the admin role.

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
use crate::database::health_tips::{CreateHealthTipRequest, UpdateHealthTipRequest};
use crate::errors::{AppError, ErrorCode};
use crate::middleware::require_admin;
use crate::models::{Audience, TipCategory};
use crate::server::ServerResources;

/// Request body for creating a health tip
#[derive(Debug, Deserialize)]
pub struct CreateHealthTipBody {
    /// Display title
    pub title: String,
    /// Tip body
    pub content: String,
    /// Category name
    pub category: String,
    /// Tags for filtering
    #[serde(default)]
    pub tags: Vec<String>,
    /// Audience name; defaults to all
    pub target_audience: Option<String>,
    /// Display priority; defaults to 0
    pub priority: Option<i64>,
    /// Whether the tip is surfaced immediately; defaults to true
    pub is_active: Option<bool>,
}

impl CreateHealthTipBody {
    /// Validate and convert into a domain request
    fn into_request(self) -> Result<CreateHealthTipRequest, AppError> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(AppError::new(
                ErrorCode::MissingRequiredField,
                "Title, content, and category are required",
            ));
        }

        let category: TipCategory = self.category.parse()?;
        let target_audience = match self.target_audience.as_deref() {
            Some(value) => value.parse()?,
            None => Audience::default(),
        };

        let priority = self.priority.unwrap_or(0);
        if !(0..=limits::MAX_CONTENT_PRIORITY).contains(&priority) {
            return Err(AppError::out_of_range("Priority must be between 0 and 10"));
        }

        Ok(CreateHealthTipRequest {
            title: self.title,
            content: self.content,
            category,
            tags: normalize_tags(self.tags),
            target_audience,
            priority,
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

/// Request body for partially updating a health tip
#[derive(Debug, Deserialize, Default)]
pub struct UpdateHealthTipBody {
    /// New title (if provided)
    pub title: Option<String>,
    /// New body (if provided)
    pub content: Option<String>,
    /// New category (if provided)
    pub category: Option<String>,
    /// New tags (if provided)
    pub tags: Option<Vec<String>>,
    /// New audience (if provided)
    pub target_audience: Option<String>,
    /// New priority (if provided)
    pub priority: Option<i64>,
    /// New active flag (if provided)
    pub is_active: Option<bool>,
}

impl UpdateHealthTipBody {
    /// Validate and convert into a domain request
    fn into_request(self) -> Result<UpdateHealthTipRequest, AppError> {
        let category = self
            .category
            .as_deref()
            .map(str::parse::<TipCategory>)
            .transpose()?;
        let target_audience = self
            .target_audience
            .as_deref()
            .map(str::parse::<Audience>)
            .transpose()?;

        if let Some(priority) = self.priority {
            if !(0..=limits::MAX_CONTENT_PRIORITY).contains(&priority) {
                return Err(AppError::out_of_range("Priority must be between 0 and 10"));
            }
        }

        Ok(UpdateHealthTipRequest {
            title: self.title,
            content: self.content,
            category,
            tags: self.tags.map(normalize_tags),
            target_audience,
            priority: self.priority,
            is_active: self.is_active,
        })
    }
}

/// Trim tags and drop empty entries
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_owned())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Parse a path segment as a health tip ID
fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::invalid_input("Invalid health tip ID"))
}

/// Health tip routes handler
pub struct HealthTipRoutes;

impl HealthTipRoutes {
    /// Create all health tip routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/health-tips/active", get(Self::handle_list_active))
            .route("/api/health-tips/all", get(Self::handle_list_all))
            .route("/api/health-tips/:id", get(Self::handle_get))
            .route("/api/health-tips", post(Self::handle_create))
            .route("/api/health-tips/:id", put(Self::handle_update))
            .route("/api/health-tips/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    /// Handle GET /api/health-tips/active - public listing
    async fn handle_list_active(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let tips = resources.database.health_tips().list_active().await?;
        Ok((StatusCode::OK, Json(tips)).into_response())
    }

    /// Handle GET /api/health-tips/all - full listing, admin only
    async fn handle_list_all(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        require_admin(&auth)?;
        let tips = resources.database.health_tips().list_all().await?;
        Ok((StatusCode::OK, Json(tips)).into_response())
    }

    /// Handle GET /api/health-tips/:id - public read
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let tip_id = parse_id(&id)?;
        let tip = resources
            .database
            .health_tips()
            .get(tip_id)
            .await?
            .ok_or_else(|| AppError::not_found("Health tip"))?;
        Ok((StatusCode::OK, Json(tip)).into_response())
    }

    /// Handle POST /api/health-tips - admin create
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<CreateHealthTipBody>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        require_admin(&auth)?;

        let request = body.into_request()?;
        let tip = resources
            .database
            .health_tips()
            .create(auth.user_id, &request)
            .await?;
        Ok((StatusCode::CREATED, Json(tip)).into_response())
    }

    /// Handle PUT /api/health-tips/:id - admin update
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(body): Json<UpdateHealthTipBody>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        require_admin(&auth)?;

        let tip_id = parse_id(&id)?;
        let request = body.into_request()?;
        let tip = resources
            .database
            .health_tips()
            .update(tip_id, &request)
            .await?
            .ok_or_else(|| AppError::not_found("Health tip"))?;
        Ok((StatusCode::OK, Json(tip)).into_response())
    }

    /// Handle DELETE /api/health-tips/:id - admin delete
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        require_admin(&auth)?;

        let tip_id = parse_id(&id)?;
        let deleted = resources.database.health_tips().delete(tip_id).await?;

        if !deleted {
            return Err(AppError::not_found("Health tip"));
        }

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Health tip deleted successfully" })),
        )
            .into_response())
    }
}
