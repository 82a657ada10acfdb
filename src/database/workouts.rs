// ABOUTME: Database operations for logged workouts
// ABOUTME: Owner-scoped CRUD, date-range queries, and aggregate statistics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use super::{parse_datetime, parse_uuid};
use crate::errors::{AppError, AppResult};
use crate::models::{Exercise, Intensity, Workout, WorkoutType};

/// Request to create a new workout
#[derive(Debug, Clone)]
pub struct CreateWorkoutRequest {
    /// Workout category
    pub workout_type: WorkoutType,
    /// Session length in minutes
    pub duration_minutes: f64,
    /// Calories burned
    pub calories_burned: f64,
    /// When the workout took place
    pub date: DateTime<Utc>,
    /// Constituent exercises
    pub exercises: Vec<Exercise>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Subjective intensity
    pub intensity: Intensity,
}

/// Request to partially update an existing workout
#[derive(Debug, Clone, Default)]
pub struct UpdateWorkoutRequest {
    /// New workout category (if provided)
    pub workout_type: Option<WorkoutType>,
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
    pub intensity: Option<Intensity>,
}

/// Aggregate workout statistics for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutStats {
    /// Total workouts logged
    pub total_workouts: i64,
    /// Summed duration in minutes
    pub total_duration: f64,
    /// Summed calories
    pub total_calories: f64,
    /// Average duration per workout, 0 when none
    pub avg_duration: f64,
    /// Average calories per workout, 0 when none
    pub avg_calories: f64,
}

/// A recent workout with its owner's username, for admin activity feeds
#[derive(Debug, Clone)]
pub struct RecentWorkout {
    /// Owner's username
    pub username: String,
    /// Workout category
    pub workout_type: WorkoutType,
    /// When the row was created
    pub created_at: DateTime<Utc>,
}

/// Workout database operations manager
pub struct WorkoutsManager {
    pool: SqlitePool,
}

impl WorkoutsManager {
    /// Create a new workouts manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new workout for a user
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(&self, user_id: Uuid, request: &CreateWorkoutRequest) -> AppResult<Workout> {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let exercises_json = serde_json::to_string(&request.exercises)?;

        sqlx::query(
            r"
            INSERT INTO workouts (
                id, user_id, workout_type, duration_minutes, calories_burned,
                date, exercises, notes, intensity, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(request.workout_type.as_str())
        .bind(request.duration_minutes)
        .bind(request.calories_burned)
        .bind(request.date.to_rfc3339())
        .bind(&exercises_json)
        .bind(&request.notes)
        .bind(request.intensity.as_str())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create workout: {e}")))?;

        Ok(Workout {
            id,
            user_id,
            workout_type: request.workout_type,
            duration_minutes: request.duration_minutes,
            calories_burned: request.calories_burned,
            date: request.date,
            exercises: request.exercises.clone(),
            notes: request.notes.clone(),
            intensity: request.intensity,
            created_at: now,
            updated_at: now,
        })
    }

    /// Get a workout by ID, scoped to its owner
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get(&self, workout_id: Uuid, user_id: Uuid) -> AppResult<Option<Workout>> {
        let row = sqlx::query("SELECT * FROM workouts WHERE id = $1 AND user_id = $2")
            .bind(workout_id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get workout: {e}")))?;

        row.map(|r| row_to_workout(&r)).transpose()
    }

    /// List a user's workouts, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self, user_id: Uuid) -> AppResult<Vec<Workout>> {
        let rows = sqlx::query("SELECT * FROM workouts WHERE user_id = $1 ORDER BY date DESC")
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list workouts: {e}")))?;

        rows.iter().map(row_to_workout).collect()
    }

    /// List a user's workouts within a date window, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_in_range(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Workout>> {
        let rows = sqlx::query(
            r"
            SELECT * FROM workouts
            WHERE user_id = $1 AND date >= $2 AND date <= $3
            ORDER BY date ASC
            ",
        )
        .bind(user_id.to_string())
        .bind(start.to_rfc3339())
        .bind(end.to_rfc3339())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list workouts in range: {e}")))?;

        rows.iter().map(row_to_workout).collect()
    }

    /// Partially update a workout, returning the new state
    ///
    /// Returns `None` when the workout does not exist or belongs to another
    /// user.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn update(
        &self,
        workout_id: Uuid,
        user_id: Uuid,
        request: &UpdateWorkoutRequest,
    ) -> AppResult<Option<Workout>> {
        let exercises_json = request
            .exercises
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let result = sqlx::query(
            r"
            UPDATE workouts
            SET workout_type = COALESCE($3, workout_type),
                duration_minutes = COALESCE($4, duration_minutes),
                calories_burned = COALESCE($5, calories_burned),
                date = COALESCE($6, date),
                exercises = COALESCE($7, exercises),
                notes = COALESCE($8, notes),
                intensity = COALESCE($9, intensity),
                updated_at = $10
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(workout_id.to_string())
        .bind(user_id.to_string())
        .bind(request.workout_type.map(|t| t.as_str()))
        .bind(request.duration_minutes)
        .bind(request.calories_burned)
        .bind(request.date.map(|d| d.to_rfc3339()))
        .bind(exercises_json)
        .bind(&request.notes)
        .bind(request.intensity.map(|i| i.as_str()))
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update workout: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(workout_id, user_id).await
    }

    /// Delete a workout, scoped to its owner
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete(&self, workout_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1 AND user_id = $2")
            .bind(workout_id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete workout: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Aggregate statistics over all of a user's workouts
    ///
    /// Every field is 0 when the user has no workouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn stats(&self, user_id: Uuid) -> AppResult<WorkoutStats> {
        let row = sqlx::query(
            r"
            SELECT COUNT(*) as total_workouts,
                   COALESCE(SUM(duration_minutes), 0.0) as total_duration,
                   COALESCE(SUM(calories_burned), 0.0) as total_calories,
                   COALESCE(AVG(duration_minutes), 0.0) as avg_duration,
                   COALESCE(AVG(calories_burned), 0.0) as avg_calories
            FROM workouts
            WHERE user_id = $1
            ",
        )
        .bind(user_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to compute workout stats: {e}")))?;

        Ok(WorkoutStats {
            total_workouts: row.get("total_workouts"),
            total_duration: row.get("total_duration"),
            total_calories: row.get("total_calories"),
            avg_duration: row.get("avg_duration"),
            avg_calories: row.get("avg_calories"),
        })
    }

    /// Count a user's workouts dated within a window
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn count_in_range(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<i64> {
        let row = sqlx::query(
            "SELECT COUNT(*) as count FROM workouts WHERE user_id = $1 AND date >= $2 AND date <= $3",
        )
        .bind(user_id.to_string())
        .bind(start.to_rfc3339())
        .bind(end.to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count workouts: {e}")))?;
        Ok(row.get("count"))
    }

    /// Sum calories for a user's workouts dated within a window
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn sum_calories_in_range(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<f64> {
        let row = sqlx::query(
            "SELECT COALESCE(SUM(calories_burned), 0.0) as total FROM workouts WHERE user_id = $1 AND date >= $2 AND date <= $3",
        )
        .bind(user_id.to_string())
        .bind(start.to_rfc3339())
        .bind(end.to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to sum calories: {e}")))?;
        Ok(row.get("total"))
    }

    /// Total workouts across all users
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn count_all(&self) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM workouts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count workouts: {e}")))?;
        Ok(row.get("count"))
    }

    /// Most recently created workouts with their owners' usernames
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn recent_with_users(&self, limit: i64) -> AppResult<Vec<RecentWorkout>> {
        let rows = sqlx::query(
            r"
            SELECT w.workout_type, w.created_at, u.username
            FROM workouts w
            INNER JOIN users u ON u.id = w.user_id
            ORDER BY w.created_at DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list recent workouts: {e}")))?;

        rows.iter()
            .map(|row| {
                let type_str: String = row.get("workout_type");
                let created_at_str: String = row.get("created_at");
                Ok(RecentWorkout {
                    username: row.get("username"),
                    workout_type: WorkoutType::parse(&type_str),
                    created_at: parse_datetime(&created_at_str)?,
                })
            })
            .collect()
    }
}

/// Convert a database row to a `Workout`
fn row_to_workout(row: &SqliteRow) -> AppResult<Workout> {
    let id_str: String = row.get("id");
    let user_id_str: String = row.get("user_id");
    let type_str: String = row.get("workout_type");
    let intensity_str: String = row.get("intensity");
    let date_str: String = row.get("date");
    let exercises_json: String = row.get("exercises");
    let created_at_str: String = row.get("created_at");
    let updated_at_str: String = row.get("updated_at");

    let exercises: Vec<Exercise> = serde_json::from_str(&exercises_json)?;

    Ok(Workout {
        id: parse_uuid(&id_str)?,
        user_id: parse_uuid(&user_id_str)?,
        workout_type: WorkoutType::parse(&type_str),
        duration_minutes: row.get("duration_minutes"),
        calories_burned: row.get("calories_burned"),
        date: parse_datetime(&date_str)?,
        exercises,
        notes: row.get("notes"),
        intensity: Intensity::parse(&intensity_str),
        created_at: parse_datetime(&created_at_str)?,
        updated_at: parse_datetime(&updated_at_str)?,
    })
}
