// ABOUTME: Route handlers for analytics generation, snapshots, and admin metrics
// ABOUTME: Computes reports on demand, persists snapshots, and serves summary trends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! Analytics routes.
//!
//! Generation fetches the window's workouts and goals, folds them into a
//! report, persists the snapshot, and returns the report. The summary reads
//! recent snapshots and derives trends; the admin endpoint aggregates across
//! all users.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::limits;
use crate::errors::AppError;
use crate::intelligence::{build_report, resolve_window, trend};
use crate::middleware::require_admin;
use crate::models::{AnalyticsReport, AnalyticsSnapshot, TimeRange};
use crate::server::ServerResources;

/// Request body for report generation
#[derive(Debug, Deserialize, Default)]
pub struct GenerateAnalyticsBody {
    /// Symbolic window; unrecognized or absent values mean month
    pub time_range: Option<String>,
}

/// Query parameters for snapshot lookup
#[derive(Debug, Deserialize, Default)]
pub struct AnalyticsQuery {
    /// Symbolic window; unrecognized or absent values mean month
    pub time_range: Option<String>,
}

/// Trends across recent snapshots
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyticsTrends {
    /// Relative change in workout counts, percent
    pub workout_trend: f64,
    /// Relative change in calories burned, percent
    pub calories_trend: f64,
    /// Relative change in goal completion rate, percent
    pub goal_progress_trend: f64,
}

/// Summary response: recent snapshots plus trends
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyticsSummaryResponse {
    /// Snapshots from the summary window, newest first
    pub recent_snapshots: Vec<AnalyticsSnapshot>,
    /// Trends derived from the snapshots in chronological order
    pub trends: AnalyticsTrends,
}

/// One entry of the admin recent-activity feed
#[derive(Debug, Serialize, Deserialize)]
pub struct RecentActivityEntry {
    /// "workout" or "goal"
    pub activity_type: String,
    /// Human-readable description
    pub description: String,
    /// When the activity happened
    pub timestamp: String,
}

/// Admin system analytics response
#[derive(Debug, Serialize, Deserialize)]
pub struct SystemAnalyticsResponse {
    /// Registered users
    pub total_users: i64,
    /// Users who logged in within the activity window
    pub active_users: i64,
    /// Workouts across all users
    pub total_workouts: i64,
    /// Goals across all users
    pub total_goals: i64,
    /// Most recent workouts and goals, merged, newest first
    pub recent_activity: Vec<RecentActivityEntry>,
}

/// Generate and persist a report for one user and range
pub(crate) async fn generate_report(
    resources: &Arc<ServerResources>,
    user_id: uuid::Uuid,
    range: TimeRange,
) -> Result<AnalyticsReport, AppError> {
    let now = Utc::now();
    let (start, end) = resolve_window(range, now);

    let workouts = resources
        .database
        .workouts()
        .list_in_range(user_id, start, end)
        .await?;
    let goals = resources
        .database
        .goals()
        .list_overlapping(user_id, start, end)
        .await?;

    let report = build_report(start, end, &workouts, &goals);

    resources
        .database
        .analytics()
        .insert(user_id, range, start, end, &report)
        .await?;

    tracing::info!(
        %user_id,
        range = %range,
        workouts = report.total_workouts,
        "analytics report generated"
    );

    Ok(report)
}

/// Build the cross-user system analytics payload
pub(crate) async fn system_analytics(
    resources: &Arc<ServerResources>,
) -> Result<SystemAnalyticsResponse, AppError> {
    let cutoff = Utc::now() - Duration::days(limits::ACTIVE_USER_WINDOW_DAYS);

    let users = resources.database.users();
    let workouts = resources.database.workouts();
    let goals = resources.database.goals();

    let total_users = users.count().await?;
    let active_users = users.count_active_since(cutoff).await?;
    let total_workouts = workouts.count_all().await?;
    let total_goals = goals.count_all().await?;

    let recent_workouts = workouts
        .recent_with_users(limits::RECENT_ACTIVITY_LIMIT)
        .await?;
    let recent_goals = goals.recent_with_users(limits::RECENT_ACTIVITY_LIMIT).await?;

    let mut entries: Vec<(DateTime<Utc>, RecentActivityEntry)> = Vec::new();
    for workout in recent_workouts {
        entries.push((
            workout.created_at,
            RecentActivityEntry {
                activity_type: "workout".to_owned(),
                description: format!(
                    "{} completed a {} workout",
                    workout.username, workout.workout_type
                ),
                timestamp: workout.created_at.to_rfc3339(),
            },
        ));
    }
    for goal in recent_goals {
        entries.push((
            goal.created_at,
            RecentActivityEntry {
                activity_type: "goal".to_owned(),
                description: format!("{} set a new {} goal", goal.username, goal.goal_type),
                timestamp: goal.created_at.to_rfc3339(),
            },
        ));
    }
    entries.sort_by(|a, b| b.0.cmp(&a.0));
    entries.truncate(limits::RECENT_ACTIVITY_LIMIT as usize);

    Ok(SystemAnalyticsResponse {
        total_users,
        active_users,
        total_workouts,
        total_goals,
        recent_activity: entries.into_iter().map(|(_, entry)| entry).collect(),
    })
}

/// Analytics routes handler
pub struct AnalyticsRoutes;

impl AnalyticsRoutes {
    /// Create all analytics routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/analytics/generate", post(Self::handle_generate))
            .route("/api/analytics", get(Self::handle_get))
            .route("/api/analytics/summary", get(Self::handle_summary))
            .route("/api/analytics/admin", get(Self::handle_admin))
            .with_state(resources)
    }

    /// Handle POST /api/analytics/generate - compute, persist, return
    async fn handle_generate(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Option<Json<GenerateAnalyticsBody>>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        let range = body
            .and_then(|Json(b)| b.time_range)
            .map_or_else(TimeRange::default, |s| TimeRange::parse(&s));

        let report = generate_report(&resources, auth.user_id, range).await?;
        Ok((StatusCode::OK, Json(report)).into_response())
    }

    /// Handle GET /api/analytics - latest persisted snapshot for a range
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<AnalyticsQuery>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        let range = query
            .time_range
            .map_or_else(TimeRange::default, |s| TimeRange::parse(&s));

        let snapshot = resources
            .database
            .analytics()
            .latest(auth.user_id, range)
            .await?
            .ok_or_else(|| AppError::not_found("Analytics for this period"))?;

        Ok((StatusCode::OK, Json(snapshot)).into_response())
    }

    /// Handle GET /api/analytics/summary - recent snapshots and trends
    async fn handle_summary(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        let cutoff = Utc::now() - Duration::days(limits::SUMMARY_WINDOW_DAYS);

        let snapshots = resources
            .database
            .analytics()
            .list_since(auth.user_id, cutoff)
            .await?;

        // Trends run oldest to newest; the listing is newest first.
        let chronological: Vec<&AnalyticsSnapshot> = snapshots.iter().rev().collect();
        let workout_series: Vec<f64> = chronological
            .iter()
            .map(|s| f64::from(s.report.total_workouts))
            .collect();
        let calories_series: Vec<f64> = chronological
            .iter()
            .map(|s| s.report.total_calories_burned)
            .collect();
        let goal_series: Vec<f64> = chronological
            .iter()
            .map(|s| s.report.goal_completion_rate)
            .collect();

        let response = AnalyticsSummaryResponse {
            trends: AnalyticsTrends {
                workout_trend: trend(&workout_series),
                calories_trend: trend(&calories_series),
                goal_progress_trend: trend(&goal_series),
            },
            recent_snapshots: snapshots,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/analytics/admin - cross-user metrics
    async fn handle_admin(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_request(&headers).await?;
        require_admin(&auth)?;

        let response = system_analytics(&resources).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
