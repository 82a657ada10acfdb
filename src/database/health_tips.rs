// ABOUTME: Database operations for admin-authored health tips
// ABOUTME: CRUD plus the active listing ordered by priority then recency
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use super::{parse_datetime, parse_uuid};
use crate::errors::{AppError, AppResult};
use crate::models::{Audience, HealthTip, TipCategory};

/// Request to create a new health tip
#[derive(Debug, Clone)]
pub struct CreateHealthTipRequest {
    /// Display title
    pub title: String,
    /// Tip body
    pub content: String,
    /// Category for filtering
    pub category: TipCategory,
    /// Tags for filtering and search
    pub tags: Vec<String>,
    /// Audience the tip targets
    pub target_audience: Audience,
    /// Display priority, 0 to 10
    pub priority: i64,
    /// Whether the tip is surfaced immediately
    pub is_active: bool,
}

/// Request to partially update an existing health tip
#[derive(Debug, Clone, Default)]
pub struct UpdateHealthTipRequest {
    /// New title (if provided)
    pub title: Option<String>,
    /// New body (if provided)
    pub content: Option<String>,
    /// New category (if provided)
    pub category: Option<TipCategory>,
    /// New tags (if provided)
    pub tags: Option<Vec<String>>,
    /// New audience (if provided)
    pub target_audience: Option<Audience>,
    /// New priority (if provided)
    pub priority: Option<i64>,
    /// New active flag (if provided)
    pub is_active: Option<bool>,
}

/// Health tip database operations manager
pub struct HealthTipsManager {
    pool: SqlitePool,
}

impl HealthTipsManager {
    /// Create a new health tips manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new health tip
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(
        &self,
        created_by: Uuid,
        request: &CreateHealthTipRequest,
    ) -> AppResult<HealthTip> {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let tags_json = serde_json::to_string(&request.tags)?;

        sqlx::query(
            r"
            INSERT INTO health_tips (
                id, title, content, category, tags, target_audience,
                priority, is_active, created_by, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            ",
        )
        .bind(id.to_string())
        .bind(&request.title)
        .bind(&request.content)
        .bind(request.category.as_str())
        .bind(&tags_json)
        .bind(request.target_audience.as_str())
        .bind(request.priority)
        .bind(request.is_active)
        .bind(created_by.to_string())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create health tip: {e}")))?;

        Ok(HealthTip {
            id,
            title: request.title.clone(),
            content: request.content.clone(),
            category: request.category,
            tags: request.tags.clone(),
            target_audience: request.target_audience,
            priority: request.priority,
            is_active: request.is_active,
            created_by,
            created_at: now,
            updated_at: now,
        })
    }

    /// Get a health tip by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get(&self, tip_id: Uuid) -> AppResult<Option<HealthTip>> {
        let row = sqlx::query("SELECT * FROM health_tips WHERE id = $1")
            .bind(tip_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get health tip: {e}")))?;

        row.map(|r| row_to_tip(&r)).transpose()
    }

    /// List every health tip, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_all(&self) -> AppResult<Vec<HealthTip>> {
        let rows = sqlx::query("SELECT * FROM health_tips ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list health tips: {e}")))?;

        rows.iter().map(row_to_tip).collect()
    }

    /// List active health tips, highest priority first, then newest
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_active(&self) -> AppResult<Vec<HealthTip>> {
        let rows = sqlx::query(
            r"
            SELECT * FROM health_tips
            WHERE is_active = 1
            ORDER BY priority DESC, created_at DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list active health tips: {e}")))?;

        rows.iter().map(row_to_tip).collect()
    }

    /// Partially update a health tip, returning the new state
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn update(
        &self,
        tip_id: Uuid,
        request: &UpdateHealthTipRequest,
    ) -> AppResult<Option<HealthTip>> {
        let tags_json = request
            .tags
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let result = sqlx::query(
            r"
            UPDATE health_tips
            SET title = COALESCE($2, title),
                content = COALESCE($3, content),
                category = COALESCE($4, category),
                tags = COALESCE($5, tags),
                target_audience = COALESCE($6, target_audience),
                priority = COALESCE($7, priority),
                is_active = COALESCE($8, is_active),
                updated_at = $9
            WHERE id = $1
            ",
        )
        .bind(tip_id.to_string())
        .bind(&request.title)
        .bind(&request.content)
        .bind(request.category.map(|c| c.as_str()))
        .bind(tags_json)
        .bind(request.target_audience.map(|a| a.as_str()))
        .bind(request.priority)
        .bind(request.is_active)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update health tip: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(tip_id).await
    }

    /// Delete a health tip
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete(&self, tip_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM health_tips WHERE id = $1")
            .bind(tip_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete health tip: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Total health tips
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn count(&self) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM health_tips")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count health tips: {e}")))?;
        Ok(row.get("count"))
    }
}

/// Convert a database row to a `HealthTip`
fn row_to_tip(row: &SqliteRow) -> AppResult<HealthTip> {
    let id_str: String = row.get("id");
    let category_str: String = row.get("category");
    let audience_str: String = row.get("target_audience");
    let tags_json: String = row.get("tags");
    let created_by_str: String = row.get("created_by");
    let created_at_str: String = row.get("created_at");
    let updated_at_str: String = row.get("updated_at");

    let tags: Vec<String> = serde_json::from_str(&tags_json)?;

    Ok(HealthTip {
        id: parse_uuid(&id_str)?,
        title: row.get("title"),
        content: row.get("content"),
        category: TipCategory::parse(&category_str),
        tags,
        target_audience: Audience::parse(&audience_str),
        priority: row.get("priority"),
        is_active: row.get("is_active"),
        created_by: parse_uuid(&created_by_str)?,
        created_at: parse_datetime(&created_at_str)?,
        updated_at: parse_datetime(&updated_at_str)?,
    })
}
