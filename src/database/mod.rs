// ABOUTME: Database connection management and schema migrations
// ABOUTME: Wraps a SQLite pool; per-domain managers handle queries for each resource
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! # Database Management
//!
//! [`Database`] owns the connection pool and runs idempotent migrations at
//! startup. Query logic lives in one manager per domain; each manager holds
//! a cheap clone of the pool.

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Analytics snapshot persistence
pub mod analytics;
/// Goal CRUD and status queries
pub mod goals;
/// Health tip CRUD
pub mod health_tips;
/// Workout suggestion CRUD
pub mod suggestions;
/// User account CRUD and cascade delete
pub mod users;
/// Workout CRUD and aggregate stats
pub mod workouts;

pub use analytics::AnalyticsManager;
pub use goals::GoalsManager;
pub use health_tips::HealthTipsManager;
pub use suggestions::SuggestionsManager;
pub use users::UsersManager;
pub use workouts::WorkoutsManager;

/// Database manager holding the shared connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the URL fails to parse, the connection fails, or
    /// a migration statement fails.
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // A pooled in-memory SQLite gives every connection its own empty
        // database; keep it to a single connection so tests see one store.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if a migration statement fails.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL DEFAULT 'user',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                last_login TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                workout_type TEXT NOT NULL,
                duration_minutes REAL NOT NULL,
                calories_burned REAL NOT NULL,
                date TEXT NOT NULL,
                exercises TEXT NOT NULL DEFAULT '[]',
                notes TEXT,
                intensity TEXT NOT NULL DEFAULT 'medium',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workouts_user_date ON workouts(user_id, date DESC)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS goals (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                goal_type TEXT NOT NULL,
                target REAL NOT NULL,
                unit TEXT NOT NULL,
                timeframe TEXT NOT NULL,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                progress REAL NOT NULL DEFAULT 0,
                status TEXT NOT NULL DEFAULT 'active',
                description TEXT,
                custom_type TEXT,
                custom_unit TEXT,
                milestones TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_goals_user_status ON goals(user_id, status, end_date)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS analytics_snapshots (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                time_range TEXT NOT NULL,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                report TEXT NOT NULL,
                generated_at TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_snapshots_user ON analytics_snapshots(user_id, generated_at DESC)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS health_tips (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                category TEXT NOT NULL DEFAULT 'wellness',
                tags TEXT NOT NULL DEFAULT '[]',
                target_audience TEXT NOT NULL DEFAULT 'all',
                priority INTEGER NOT NULL DEFAULT 0,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_by TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_health_tips_active ON health_tips(is_active, priority DESC, created_at DESC)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_suggestions (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                category TEXT NOT NULL DEFAULT 'strength',
                difficulty TEXT NOT NULL DEFAULT 'beginner',
                duration_minutes INTEGER NOT NULL,
                tags TEXT NOT NULL DEFAULT '[]',
                target_audience TEXT NOT NULL DEFAULT 'all',
                priority INTEGER NOT NULL DEFAULT 0,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_by TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_suggestions_active ON workout_suggestions(is_active, priority DESC, created_at DESC)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get a reference to the underlying pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Users manager
    #[must_use]
    pub fn users(&self) -> UsersManager {
        UsersManager::new(self.pool.clone())
    }

    /// Workouts manager
    #[must_use]
    pub fn workouts(&self) -> WorkoutsManager {
        WorkoutsManager::new(self.pool.clone())
    }

    /// Goals manager
    #[must_use]
    pub fn goals(&self) -> GoalsManager {
        GoalsManager::new(self.pool.clone())
    }

    /// Analytics snapshot manager
    #[must_use]
    pub fn analytics(&self) -> AnalyticsManager {
        AnalyticsManager::new(self.pool.clone())
    }

    /// Health tips manager
    #[must_use]
    pub fn health_tips(&self) -> HealthTipsManager {
        HealthTipsManager::new(self.pool.clone())
    }

    /// Workout suggestions manager
    #[must_use]
    pub fn suggestions(&self) -> SuggestionsManager {
        SuggestionsManager::new(self.pool.clone())
    }
}

/// Parse an RFC 3339 timestamp stored as text
pub(crate) fn parse_datetime(s: &str) -> crate::errors::AppResult<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| crate::errors::AppError::internal(format!("Invalid datetime: {e}")))
}

/// Parse a UUID stored as text
pub(crate) fn parse_uuid(s: &str) -> crate::errors::AppResult<uuid::Uuid> {
    uuid::Uuid::parse_str(s)
        .map_err(|e| crate::errors::AppError::internal(format!("Invalid UUID: {e}")))
}
