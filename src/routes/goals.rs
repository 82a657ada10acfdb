// ABOUTME: Route handlers for the goals REST API
// ABOUTME: Owner-scoped CRUD, progress recomputation, and per-status statistics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! Goal routes.
//!
//! Listing opportunistically promotes goals whose stored progress already
//! reached the target (read-repair); the progress endpoint recomputes from
//! live workout data per goal type.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::goals::{CreateGoalRequest, StatusStats, UpdateGoalRequest};
use crate::errors::AppError;
use crate::intelligence::{recompute, ActivitySummary};
use crate::models::{Goal, GoalStatus, GoalType, GoalUnit, Milestone, Timeframe};
use crate::server::ServerResources;

/// Request body for creating a goal
#[derive(Debug, Deserialize)]
pub struct CreateGoalBody {
    /// Goal type name
    pub goal_type: String,
    /// Numeric target value
    pub target: f64,
    /// Unit name
    pub unit: String,
    /// Timeframe name
    pub timeframe: String,
    /// Window start; defaults to now
    pub start_date: Option<DateTime<Utc>>,
    /// Window end
    pub end_date: DateTime<Utc>,
    /// Free-form description
    pub description: Option<String>,
    /// Custom type label
    pub custom_type: Option<String>,
    /// Custom unit label
    pub custom_unit: Option<String>,
    /// Intermediate checkpoints
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

impl CreateGoalBody {
    /// Validate and convert into a domain request
    fn into_request(self) -> Result<CreateGoalRequest, AppError> {
        let goal_type: GoalType = self.goal_type.parse()?;
        let unit: GoalUnit = self.unit.parse()?;
        let timeframe: Timeframe = self.timeframe.parse()?;

        if self.target <= 0.0 {
            return Err(AppError::invalid_input("Target must be positive"));
        }

        let start_date = self.start_date.unwrap_or_else(Utc::now);
        if self.end_date <= start_date {
            return Err(AppError::invalid_input(
                "End date must be after the start date",
            ));
        }

        Ok(CreateGoalRequest {
            goal_type,
            target: self.target,
            unit,
            timeframe,
            start_date,
            end_date: self.end_date,
            description: self.description,
            custom_type: self.custom_type,
            custom_unit: self.custom_unit,
            milestones: self.milestones,
        })
    }
}

/// Request body for partially updating a goal
#[derive(Debug, Deserialize, Default)]
pub struct UpdateGoalBody {
    /// New goal type (if provided)
    pub goal_type: Option<String>,
    /// New target (if provided)
    pub target: Option<f64>,
    /// New unit (if provided)
    pub unit: Option<String>,
    /// New timeframe (if provided)
    pub timeframe: Option<String>,
    /// New start date (if provided)
    pub start_date: Option<DateTime<Utc>>,
    /// New end date (if provided)
    pub end_date: Option<DateTime<Utc>>,
    /// New description (if provided)
    pub description: Option<String>,
    /// New milestones (if provided)
    pub milestones: Option<Vec<Milestone>>,
}

impl UpdateGoalBody {
    /// Validate and convert into a domain request
    fn into_request(self) -> Result<UpdateGoalRequest, AppError> {
        let goal_type = self
            .goal_type
            .as_deref()
            .map(str::parse::<GoalType>)
            .transpose()?;
        let unit = self.unit.as_deref().map(str::parse::<GoalUnit>).transpose()?;
        let timeframe = self
            .timeframe
            .as_deref()
            .map(str::parse::<Timeframe>)
            .transpose()?;

        if self.target.is_some_and(|t| t <= 0.0) {
            return Err(AppError::invalid_input("Target must be positive"));
        }

        Ok(UpdateGoalRequest {
            goal_type,
            target: self.target,
            unit,
            timeframe,
            start_date: self.start_date,
            end_date: self.end_date,
            description: self.description,
            milestones: self.milestones,
        })
    }
}

/// Request body for the progress endpoint
#[derive(Debug, Deserialize, Default)]
pub struct UpdateProgressBody {
    /// Caller-supplied progress for pass-through goal types
    pub progress: Option<f64>,
}

/// Per-status goal statistics response
#[derive(Debug, Serialize, Deserialize)]
pub struct GoalStatsResponse {
    /// Stats per status name; active, completed, and failed always present
    #[serde(flatten)]
    pub by_status: BTreeMap<String, StatusStats>,
}

/// Parse a path segment as a goal ID
fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::invalid_input("Invalid goal ID"))
}

/// Goal routes handler
pub struct GoalRoutes;

impl GoalRoutes {
    /// Create all goal routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/goals", get(Self::handle_list))
            .route("/api/goals", post(Self::handle_create))
            .route("/api/goals/stats", get(Self::handle_stats))
            .route("/api/goals/:id", get(Self::handle_get))
            .route("/api/goals/:id", put(Self::handle_update))
            .route("/api/goals/:id", delete(Self::handle_delete))
            .route("/api/goals/:id/progress", patch(Self::handle_progress))
            .with_state(resources)
    }

    /// Promote a goal to completed when its stored progress already reached
    /// the target. Mirrors the read-repair the original performed on list.
    async fn repair_status(
        resources: &Arc<ServerResources>,
        goal: &mut Goal,
    ) -> Result<(), AppError> {
        if goal.status != GoalStatus::Completed && goal.progress >= goal.target {
            goal.progress = 100.0;
            goal.status = GoalStatus::Completed;
            resources
                .database
                .goals()
                .set_progress(goal.id, goal.user_id, goal.progress, goal.status)
                .await?;
        }
        Ok(())
    }

    /// Handle GET /api/goals - list the caller's goals by end date
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        let mut goals = resources.database.goals().list(auth.user_id).await?;

        for goal in &mut goals {
            Self::repair_status(&resources, goal).await?;
        }

        Ok((StatusCode::OK, Json(goals)).into_response())
    }

    /// Handle POST /api/goals - create a goal
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<CreateGoalBody>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        let request = body.into_request()?;
        let goal = resources
            .database
            .goals()
            .create(auth.user_id, &request)
            .await?;
        Ok((StatusCode::CREATED, Json(goal)).into_response())
    }

    /// Handle GET /api/goals/stats - per-status counts and mean progress
    async fn handle_stats(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        let stats = resources.database.goals().stats_by_status(auth.user_id).await?;

        // All three statuses are always present, zeroed when absent.
        let mut by_status: BTreeMap<String, StatusStats> = BTreeMap::new();
        for status in [GoalStatus::Active, GoalStatus::Completed, GoalStatus::Failed] {
            by_status.insert(status.as_str().to_owned(), StatusStats::default());
        }
        for (status, stat) in stats {
            by_status.insert(status.as_str().to_owned(), stat);
        }

        Ok((StatusCode::OK, Json(GoalStatsResponse { by_status })).into_response())
    }

    /// Handle GET /api/goals/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        let goal_id = parse_id(&id)?;
        let goal = resources
            .database
            .goals()
            .get(goal_id, auth.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Goal"))?;
        Ok((StatusCode::OK, Json(goal)).into_response())
    }

    /// Handle PUT /api/goals/:id - partial update
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(body): Json<UpdateGoalBody>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        let goal_id = parse_id(&id)?;
        let request = body.into_request()?;
        let goal = resources
            .database
            .goals()
            .update(goal_id, auth.user_id, &request)
            .await?
            .ok_or_else(|| AppError::not_found("Goal"))?;
        Ok((StatusCode::OK, Json(goal)).into_response())
    }

    /// Handle DELETE /api/goals/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        let goal_id = parse_id(&id)?;
        let deleted = resources
            .database
            .goals()
            .delete(goal_id, auth.user_id)
            .await?;

        if !deleted {
            return Err(AppError::not_found("Goal"));
        }

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Goal deleted successfully" })),
        )
            .into_response())
    }

    /// Handle PATCH /api/goals/:id/progress - recompute from live activity
    async fn handle_progress(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(body): Json<UpdateProgressBody>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        let goal_id = parse_id(&id)?;

        let mut goal = resources
            .database
            .goals()
            .get(goal_id, auth.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Goal"))?;

        let now = Utc::now();
        let workouts = resources.database.workouts();
        let activity = ActivitySummary {
            workout_count: u32::try_from(
                workouts
                    .count_in_range(auth.user_id, goal.start_date, now)
                    .await?,
            )
            .unwrap_or(0),
            calories_burned: workouts
                .sum_calories_in_range(auth.user_id, goal.start_date, now)
                .await?,
        };

        let (progress, status) = recompute(&goal, activity, body.progress, now);
        resources
            .database
            .goals()
            .set_progress(goal_id, auth.user_id, progress, status)
            .await?;

        goal.progress = progress;
        goal.status = status;
        goal.updated_at = now;

        tracing::debug!(
            goal_id = %goal.id,
            progress,
            status = %status,
            "goal progress recomputed"
        );

        Ok((StatusCode::OK, Json(goal)).into_response())
    }
}
