// ABOUTME: Database operations for admin-authored workout suggestions
// ABOUTME: CRUD plus the active listing ordered by priority then recency
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use super::{parse_datetime, parse_uuid};
use crate::errors::{AppError, AppResult};
use crate::models::{Audience, Difficulty, SuggestionCategory, WorkoutSuggestion};

/// Request to create a new workout suggestion
#[derive(Debug, Clone)]
pub struct CreateSuggestionRequest {
    /// Display title
    pub title: String,
    /// Suggestion body
    pub description: String,
    /// Category for filtering
    pub category: SuggestionCategory,
    /// Difficulty level
    pub difficulty: Difficulty,
    /// Suggested duration in minutes
    pub duration_minutes: i64,
    /// Tags for filtering and search
    pub tags: Vec<String>,
    /// Audience the suggestion targets
    pub target_audience: Audience,
    /// Display priority, 0 to 10
    pub priority: i64,
    /// Whether the suggestion is surfaced immediately
    pub is_active: bool,
}

/// Request to partially update an existing workout suggestion
#[derive(Debug, Clone, Default)]
pub struct UpdateSuggestionRequest {
    /// New title (if provided)
    pub title: Option<String>,
    /// New body (if provided)
    pub description: Option<String>,
    /// New category (if provided)
    pub category: Option<SuggestionCategory>,
    /// New difficulty (if provided)
    pub difficulty: Option<Difficulty>,
    /// New duration (if provided)
    pub duration_minutes: Option<i64>,
    /// New tags (if provided)
    pub tags: Option<Vec<String>>,
    /// New audience (if provided)
    pub target_audience: Option<Audience>,
    /// New priority (if provided)
    pub priority: Option<i64>,
    /// New active flag (if provided)
    pub is_active: Option<bool>,
}

/// Workout suggestion database operations manager
pub struct SuggestionsManager {
    pool: SqlitePool,
}

impl SuggestionsManager {
    /// Create a new suggestions manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new workout suggestion
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(
        &self,
        created_by: Uuid,
        request: &CreateSuggestionRequest,
    ) -> AppResult<WorkoutSuggestion> {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let tags_json = serde_json::to_string(&request.tags)?;

        sqlx::query(
            r"
            INSERT INTO workout_suggestions (
                id, title, description, category, difficulty, duration_minutes,
                tags, target_audience, priority, is_active, created_by,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
            ",
        )
        .bind(id.to_string())
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.category.as_str())
        .bind(request.difficulty.as_str())
        .bind(request.duration_minutes)
        .bind(&tags_json)
        .bind(request.target_audience.as_str())
        .bind(request.priority)
        .bind(request.is_active)
        .bind(created_by.to_string())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create suggestion: {e}")))?;

        Ok(WorkoutSuggestion {
            id,
            title: request.title.clone(),
            description: request.description.clone(),
            category: request.category,
            difficulty: request.difficulty,
            duration_minutes: request.duration_minutes,
            tags: request.tags.clone(),
            target_audience: request.target_audience,
            priority: request.priority,
            is_active: request.is_active,
            created_by,
            created_at: now,
            updated_at: now,
        })
    }

    /// Get a workout suggestion by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get(&self, suggestion_id: Uuid) -> AppResult<Option<WorkoutSuggestion>> {
        let row = sqlx::query("SELECT * FROM workout_suggestions WHERE id = $1")
            .bind(suggestion_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get suggestion: {e}")))?;

        row.map(|r| row_to_suggestion(&r)).transpose()
    }

    /// List every workout suggestion, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_all(&self) -> AppResult<Vec<WorkoutSuggestion>> {
        let rows = sqlx::query("SELECT * FROM workout_suggestions ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list suggestions: {e}")))?;

        rows.iter().map(row_to_suggestion).collect()
    }

    /// List active suggestions, highest priority first, then newest
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_active(&self) -> AppResult<Vec<WorkoutSuggestion>> {
        let rows = sqlx::query(
            r"
            SELECT * FROM workout_suggestions
            WHERE is_active = 1
            ORDER BY priority DESC, created_at DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list active suggestions: {e}")))?;

        rows.iter().map(row_to_suggestion).collect()
    }

    /// Partially update a suggestion, returning the new state
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn update(
        &self,
        suggestion_id: Uuid,
        request: &UpdateSuggestionRequest,
    ) -> AppResult<Option<WorkoutSuggestion>> {
        let tags_json = request
            .tags
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let result = sqlx::query(
            r"
            UPDATE workout_suggestions
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                difficulty = COALESCE($5, difficulty),
                duration_minutes = COALESCE($6, duration_minutes),
                tags = COALESCE($7, tags),
                target_audience = COALESCE($8, target_audience),
                priority = COALESCE($9, priority),
                is_active = COALESCE($10, is_active),
                updated_at = $11
            WHERE id = $1
            ",
        )
        .bind(suggestion_id.to_string())
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.category.map(|c| c.as_str()))
        .bind(request.difficulty.map(|d| d.as_str()))
        .bind(request.duration_minutes)
        .bind(tags_json)
        .bind(request.target_audience.map(|a| a.as_str()))
        .bind(request.priority)
        .bind(request.is_active)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update suggestion: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(suggestion_id).await
    }

    /// Delete a workout suggestion
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete(&self, suggestion_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM workout_suggestions WHERE id = $1")
            .bind(suggestion_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete suggestion: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Convert a database row to a `WorkoutSuggestion`
fn row_to_suggestion(row: &SqliteRow) -> AppResult<WorkoutSuggestion> {
    let id_str: String = row.get("id");
    let category_str: String = row.get("category");
    let difficulty_str: String = row.get("difficulty");
    let audience_str: String = row.get("target_audience");
    let tags_json: String = row.get("tags");
    let created_by_str: String = row.get("created_by");
    let created_at_str: String = row.get("created_at");
    let updated_at_str: String = row.get("updated_at");

    let tags: Vec<String> = serde_json::from_str(&tags_json)?;

    Ok(WorkoutSuggestion {
        id: parse_uuid(&id_str)?,
        title: row.get("title"),
        description: row.get("description"),
        category: SuggestionCategory::parse(&category_str),
        difficulty: Difficulty::parse(&difficulty_str),
        duration_minutes: row.get("duration_minutes"),
        tags,
        target_audience: Audience::parse(&audience_str),
        priority: row.get("priority"),
        is_active: row.get("is_active"),
        created_by: parse_uuid(&created_by_str)?,
        created_at: parse_datetime(&created_at_str)?,
        updated_at: parse_datetime(&updated_at_str)?,
    })
}
