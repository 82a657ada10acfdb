// ABOUTME: Database operations for persisted analytics snapshots
// ABOUTME: Insert on generation, latest-per-range lookup, and recency queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use super::{parse_datetime, parse_uuid};
use crate::errors::{AppError, AppResult};
use crate::models::{AnalyticsReport, AnalyticsSnapshot, TimeRange};

/// Analytics snapshot database operations manager
pub struct AnalyticsManager {
    pool: SqlitePool,
}

impl AnalyticsManager {
    /// Create a new analytics manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a freshly generated report
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn insert(
        &self,
        user_id: Uuid,
        time_range: TimeRange,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        report: &AnalyticsReport,
    ) -> AppResult<AnalyticsSnapshot> {
        let id = Uuid::new_v4();
        let generated_at = Utc::now();
        let report_json = serde_json::to_string(report)?;

        sqlx::query(
            r"
            INSERT INTO analytics_snapshots (
                id, user_id, time_range, start_date, end_date, report, generated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(time_range.as_str())
        .bind(start_date.to_rfc3339())
        .bind(end_date.to_rfc3339())
        .bind(&report_json)
        .bind(generated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert snapshot: {e}")))?;

        Ok(AnalyticsSnapshot {
            id,
            user_id,
            time_range,
            start_date,
            end_date,
            report: report.clone(),
            generated_at,
        })
    }

    /// Latest snapshot for a user and range
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn latest(
        &self,
        user_id: Uuid,
        time_range: TimeRange,
    ) -> AppResult<Option<AnalyticsSnapshot>> {
        let row = sqlx::query(
            r"
            SELECT * FROM analytics_snapshots
            WHERE user_id = $1 AND time_range = $2
            ORDER BY generated_at DESC
            LIMIT 1
            ",
        )
        .bind(user_id.to_string())
        .bind(time_range.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get snapshot: {e}")))?;

        row.map(|r| row_to_snapshot(&r)).transpose()
    }

    /// Snapshots generated since the cutoff, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_since(
        &self,
        user_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> AppResult<Vec<AnalyticsSnapshot>> {
        let rows = sqlx::query(
            r"
            SELECT * FROM analytics_snapshots
            WHERE user_id = $1 AND start_date >= $2
            ORDER BY start_date DESC
            ",
        )
        .bind(user_id.to_string())
        .bind(cutoff.to_rfc3339())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list snapshots: {e}")))?;

        rows.iter().map(row_to_snapshot).collect()
    }

    /// Snapshots owned by a user (test and admin support)
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn count_for_user(&self, user_id: Uuid) -> AppResult<i64> {
        let row =
            sqlx::query("SELECT COUNT(*) as count FROM analytics_snapshots WHERE user_id = $1")
                .bind(user_id.to_string())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to count snapshots: {e}")))?;
        Ok(row.get("count"))
    }
}

/// Convert a database row to an `AnalyticsSnapshot`
fn row_to_snapshot(row: &SqliteRow) -> AppResult<AnalyticsSnapshot> {
    let id_str: String = row.get("id");
    let user_id_str: String = row.get("user_id");
    let range_str: String = row.get("time_range");
    let start_date_str: String = row.get("start_date");
    let end_date_str: String = row.get("end_date");
    let report_json: String = row.get("report");
    let generated_at_str: String = row.get("generated_at");

    let report: AnalyticsReport = serde_json::from_str(&report_json)?;

    Ok(AnalyticsSnapshot {
        id: parse_uuid(&id_str)?,
        user_id: parse_uuid(&user_id_str)?,
        time_range: TimeRange::parse(&range_str),
        start_date: parse_datetime(&start_date_str)?,
        end_date: parse_datetime(&end_date_str)?,
        report,
        generated_at: parse_datetime(&generated_at_str)?,
    })
}
