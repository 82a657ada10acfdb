// ABOUTME: Database operations for fitness goals
// ABOUTME: Owner-scoped CRUD, progress/status writes, and per-status statistics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use super::{parse_datetime, parse_uuid};
use crate::errors::{AppError, AppResult};
use crate::models::{Goal, GoalStatus, GoalType, GoalUnit, Milestone, Timeframe};

/// Request to create a new goal
#[derive(Debug, Clone)]
pub struct CreateGoalRequest {
    /// Kind of target
    pub goal_type: GoalType,
    /// Numeric target value
    pub target: f64,
    /// Unit of the target
    pub unit: GoalUnit,
    /// Evaluation cadence
    pub timeframe: Timeframe,
    /// Window start
    pub start_date: DateTime<Utc>,
    /// Window end
    pub end_date: DateTime<Utc>,
    /// Free-form description
    pub description: Option<String>,
    /// Custom type label
    pub custom_type: Option<String>,
    /// Custom unit label
    pub custom_unit: Option<String>,
    /// Intermediate checkpoints
    pub milestones: Vec<Milestone>,
}

/// Request to partially update an existing goal
#[derive(Debug, Clone, Default)]
pub struct UpdateGoalRequest {
    /// New goal type (if provided)
    pub goal_type: Option<GoalType>,
    /// New target (if provided)
    pub target: Option<f64>,
    /// New unit (if provided)
    pub unit: Option<GoalUnit>,
    /// New timeframe (if provided)
    pub timeframe: Option<Timeframe>,
    /// New start date (if provided)
    pub start_date: Option<DateTime<Utc>>,
    /// New end date (if provided)
    pub end_date: Option<DateTime<Utc>>,
    /// New description (if provided)
    pub description: Option<String>,
    /// New milestones (if provided)
    pub milestones: Option<Vec<Milestone>>,
}

/// Count and average progress for one goal status
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StatusStats {
    /// Goals in this status
    pub count: i64,
    /// Mean progress across them, 0 when none
    pub average_progress: f64,
}

/// A recent goal with its owner's username, for admin activity feeds
#[derive(Debug, Clone)]
pub struct RecentGoal {
    /// Owner's username
    pub username: String,
    /// Kind of target
    pub goal_type: GoalType,
    /// When the row was created
    pub created_at: DateTime<Utc>,
}

/// Goal database operations manager
pub struct GoalsManager {
    pool: SqlitePool,
}

impl GoalsManager {
    /// Create a new goals manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new goal for a user
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(&self, user_id: Uuid, request: &CreateGoalRequest) -> AppResult<Goal> {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let milestones_json = serde_json::to_string(&request.milestones)?;

        sqlx::query(
            r"
            INSERT INTO goals (
                id, user_id, goal_type, target, unit, timeframe, start_date,
                end_date, progress, status, description, custom_type,
                custom_unit, milestones, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 0, 'active', $9, $10, $11, $12, $13, $13)
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(request.goal_type.as_str())
        .bind(request.target)
        .bind(request.unit.as_str())
        .bind(request.timeframe.as_str())
        .bind(request.start_date.to_rfc3339())
        .bind(request.end_date.to_rfc3339())
        .bind(&request.description)
        .bind(&request.custom_type)
        .bind(&request.custom_unit)
        .bind(&milestones_json)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create goal: {e}")))?;

        Ok(Goal {
            id,
            user_id,
            goal_type: request.goal_type,
            target: request.target,
            unit: request.unit,
            timeframe: request.timeframe,
            start_date: request.start_date,
            end_date: request.end_date,
            progress: 0.0,
            status: GoalStatus::Active,
            description: request.description.clone(),
            custom_type: request.custom_type.clone(),
            custom_unit: request.custom_unit.clone(),
            milestones: request.milestones.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Get a goal by ID, scoped to its owner
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get(&self, goal_id: Uuid, user_id: Uuid) -> AppResult<Option<Goal>> {
        let row = sqlx::query("SELECT * FROM goals WHERE id = $1 AND user_id = $2")
            .bind(goal_id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get goal: {e}")))?;

        row.map(|r| row_to_goal(&r)).transpose()
    }

    /// List a user's goals ordered by end date
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self, user_id: Uuid) -> AppResult<Vec<Goal>> {
        let rows = sqlx::query("SELECT * FROM goals WHERE user_id = $1 ORDER BY end_date ASC")
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list goals: {e}")))?;

        rows.iter().map(row_to_goal).collect()
    }

    /// List goals whose start or end date falls within the window
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_overlapping(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Goal>> {
        let rows = sqlx::query(
            r"
            SELECT * FROM goals
            WHERE user_id = $1
              AND ((end_date >= $2 AND end_date <= $3)
                OR (start_date >= $2 AND start_date <= $3))
            ",
        )
        .bind(user_id.to_string())
        .bind(start.to_rfc3339())
        .bind(end.to_rfc3339())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list goals in range: {e}")))?;

        rows.iter().map(row_to_goal).collect()
    }

    /// Partially update a goal, returning the new state
    ///
    /// Returns `None` when the goal does not exist or belongs to another
    /// user.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn update(
        &self,
        goal_id: Uuid,
        user_id: Uuid,
        request: &UpdateGoalRequest,
    ) -> AppResult<Option<Goal>> {
        let milestones_json = request
            .milestones
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let result = sqlx::query(
            r"
            UPDATE goals
            SET goal_type = COALESCE($3, goal_type),
                target = COALESCE($4, target),
                unit = COALESCE($5, unit),
                timeframe = COALESCE($6, timeframe),
                start_date = COALESCE($7, start_date),
                end_date = COALESCE($8, end_date),
                description = COALESCE($9, description),
                milestones = COALESCE($10, milestones),
                updated_at = $11
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(goal_id.to_string())
        .bind(user_id.to_string())
        .bind(request.goal_type.map(|t| t.as_str()))
        .bind(request.target)
        .bind(request.unit.map(|u| u.as_str()))
        .bind(request.timeframe.map(|t| t.as_str()))
        .bind(request.start_date.map(|d| d.to_rfc3339()))
        .bind(request.end_date.map(|d| d.to_rfc3339()))
        .bind(&request.description)
        .bind(milestones_json)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update goal: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(goal_id, user_id).await
    }

    /// Write a recomputed progress value and status
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn set_progress(
        &self,
        goal_id: Uuid,
        user_id: Uuid,
        progress: f64,
        status: GoalStatus,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE goals
            SET progress = $3, status = $4, updated_at = $5
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(goal_id.to_string())
        .bind(user_id.to_string())
        .bind(progress)
        .bind(status.as_str())
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to set goal progress: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a goal, scoped to its owner
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete(&self, goal_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM goals WHERE id = $1 AND user_id = $2")
            .bind(goal_id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete goal: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Per-status goal statistics for one user
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn stats_by_status(
        &self,
        user_id: Uuid,
    ) -> AppResult<Vec<(GoalStatus, StatusStats)>> {
        let rows = sqlx::query(
            r"
            SELECT status, COUNT(*) as count, COALESCE(AVG(progress), 0.0) as average_progress
            FROM goals
            WHERE user_id = $1
            GROUP BY status
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to compute goal stats: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| {
                let status_str: String = row.get("status");
                (
                    GoalStatus::parse(&status_str),
                    StatusStats {
                        count: row.get("count"),
                        average_progress: row.get("average_progress"),
                    },
                )
            })
            .collect())
    }

    /// Total goals across all users
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn count_all(&self) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM goals")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count goals: {e}")))?;
        Ok(row.get("count"))
    }

    /// Most recently created goals with their owners' usernames
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn recent_with_users(&self, limit: i64) -> AppResult<Vec<RecentGoal>> {
        let rows = sqlx::query(
            r"
            SELECT g.goal_type, g.created_at, u.username
            FROM goals g
            INNER JOIN users u ON u.id = g.user_id
            ORDER BY g.created_at DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list recent goals: {e}")))?;

        rows.iter()
            .map(|row| {
                let type_str: String = row.get("goal_type");
                let created_at_str: String = row.get("created_at");
                Ok(RecentGoal {
                    username: row.get("username"),
                    goal_type: GoalType::parse(&type_str),
                    created_at: parse_datetime(&created_at_str)?,
                })
            })
            .collect()
    }
}

/// Convert a database row to a `Goal`
fn row_to_goal(row: &SqliteRow) -> AppResult<Goal> {
    let id_str: String = row.get("id");
    let user_id_str: String = row.get("user_id");
    let type_str: String = row.get("goal_type");
    let unit_str: String = row.get("unit");
    let timeframe_str: String = row.get("timeframe");
    let status_str: String = row.get("status");
    let start_date_str: String = row.get("start_date");
    let end_date_str: String = row.get("end_date");
    let milestones_json: String = row.get("milestones");
    let created_at_str: String = row.get("created_at");
    let updated_at_str: String = row.get("updated_at");

    let milestones: Vec<Milestone> = serde_json::from_str(&milestones_json)?;

    Ok(Goal {
        id: parse_uuid(&id_str)?,
        user_id: parse_uuid(&user_id_str)?,
        goal_type: GoalType::parse(&type_str),
        target: row.get("target"),
        unit: GoalUnit::parse(&unit_str),
        timeframe: Timeframe::parse(&timeframe_str),
        start_date: parse_datetime(&start_date_str)?,
        end_date: parse_datetime(&end_date_str)?,
        progress: row.get("progress"),
        status: GoalStatus::parse(&status_str),
        description: row.get("description"),
        custom_type: row.get("custom_type"),
        custom_unit: row.get("custom_unit"),
        milestones,
        created_at: parse_datetime(&created_at_str)?,
        updated_at: parse_datetime(&updated_at_str)?,
    })
}
