// ABOUTME: Route handlers for the workouts REST API
// ABOUTME: Owner-scoped CRUD plus aggregate statistics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! Workout routes.
//!
//! All endpoints require a Bearer token; every query is scoped to the
//! authenticated owner, so a foreign workout ID reads as not-found.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::workouts::{CreateWorkoutRequest, UpdateWorkoutRequest};
use crate::errors::AppError;
use crate::models::{Exercise, Intensity, WorkoutType};
use crate::server::ServerResources;

/// Request body for creating a workout
#[derive(Debug, Deserialize)]
pub struct CreateWorkoutBody {
    /// Workout category name
    pub workout_type: String,
    /// Session length in minutes
    pub duration_minutes: f64,
    /// Calories burned
    pub calories_burned: f64,
    /// When the workout took place; defaults to now
    pub date: Option<DateTime<Utc>>,
    /// Constituent exercises
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Intensity name; defaults to medium
    pub intensity: Option<String>,
}

impl CreateWorkoutBody {
    /// Validate and convert into a domain request
    fn into_request(self) -> Result<CreateWorkoutRequest, AppError> {
        let workout_type: WorkoutType = self.workout_type.parse()?;
        let intensity = match self.intensity.as_deref() {
            Some(value) => value.parse()?,
            None => Intensity::default(),
        };

        if self.duration_minutes <= 0.0 {
            return Err(AppError::invalid_input("Duration must be positive"));
        }
        if self.calories_burned < 0.0 {
            return Err(AppError::invalid_input("Calories cannot be negative"));
        }
        if self.exercises.iter().any(|e| e.name.trim().is_empty()) {
            return Err(AppError::invalid_input("Exercise name is required"));
        }

        Ok(CreateWorkoutRequest {
            workout_type,
            duration_minutes: self.duration_minutes,
            calories_burned: self.calories_burned,
            date: self.date.unwrap_or_else(Utc::now),
            exercises: self.exercises,
            notes: self.notes,
            intensity,
        })
    }
}

/// Request body for partially updating a workout
#[derive(Debug, Deserialize, Default)]
pub struct UpdateWorkoutBody {
    /// New workout category (if provided)
    pub workout_type: Option<String>,
    /// New duration (if provided)
    pub duration_minutes: Option<f64>,
    /// New calories (if provided)
    pub calories_burned: Option<f64>,
    /// New date (if provided)
    pub date: Option<DateTime<Utc>>,
    /// New exercise list (if provided)
    pub exercises: Option<Vec<Exercise>>,
    /// New notes (if provided)
    pub notes: Option<String>,
    /// New intensity (if provided)
    pub intensity: Option<String>,
}

impl UpdateWorkoutBody {
    /// Validate and convert into a domain request
    fn into_request(self) -> Result<UpdateWorkoutRequest, AppError> {
        let workout_type = self
            .workout_type
            .as_deref()
            .map(str::parse::<WorkoutType>)
            .transpose()?;
        let intensity = self
            .intensity
            .as_deref()
            .map(str::parse::<Intensity>)
            .transpose()?;

        if self.duration_minutes.is_some_and(|d| d <= 0.0) {
            return Err(AppError::invalid_input("Duration must be positive"));
        }
        if self.calories_burned.is_some_and(|c| c < 0.0) {
            return Err(AppError::invalid_input("Calories cannot be negative"));
        }

        Ok(UpdateWorkoutRequest {
            workout_type,
            duration_minutes: self.duration_minutes,
            calories_burned: self.calories_burned,
            date: self.date,
            exercises: self.exercises,
            notes: self.notes,
            intensity,
        })
    }
}

/// Parse a path segment as a workout ID
fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::invalid_input("Invalid workout ID"))
}

/// Workout routes handler
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/workouts", get(Self::handle_list))
            .route("/api/workouts", post(Self::handle_create))
            .route("/api/workouts/stats", get(Self::handle_stats))
            .route("/api/workouts/:id", get(Self::handle_get))
            .route("/api/workouts/:id", put(Self::handle_update))
            .route("/api/workouts/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    /// Handle GET /api/workouts - list the caller's workouts, newest first
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        let workouts = resources.database.workouts().list(auth.user_id).await?;
        Ok((StatusCode::OK, Json(workouts)).into_response())
    }

    /// Handle POST /api/workouts - log a new workout
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<CreateWorkoutBody>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        let request = body.into_request()?;
        let workout = resources
            .database
            .workouts()
            .create(auth.user_id, &request)
            .await?;
        Ok((StatusCode::CREATED, Json(workout)).into_response())
    }

    /// Handle GET /api/workouts/stats - aggregate statistics
    async fn handle_stats(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        let stats = resources.database.workouts().stats(auth.user_id).await?;
        Ok((StatusCode::OK, Json(stats)).into_response())
    }

    /// Handle GET /api/workouts/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        let workout_id = parse_id(&id)?;
        let workout = resources
            .database
            .workouts()
            .get(workout_id, auth.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Workout"))?;
        Ok((StatusCode::OK, Json(workout)).into_response())
    }

    /// Handle PUT /api/workouts/:id - partial update
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(body): Json<UpdateWorkoutBody>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        let workout_id = parse_id(&id)?;
        let request = body.into_request()?;
        let workout = resources
            .database
            .workouts()
            .update(workout_id, auth.user_id, &request)
            .await?
            .ok_or_else(|| AppError::not_found("Workout"))?;
        Ok((StatusCode::OK, Json(workout)).into_response())
    }

    /// Handle DELETE /api/workouts/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        let workout_id = parse_id(&id)?;
        let deleted = resources
            .database
            .workouts()
            .delete(workout_id, auth.user_id)
            .await?;

        if !deleted {
            return Err(AppError::not_found("Workout"));
        }

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Workout deleted successfully" })),
        )
            .into_response())
    }
}
