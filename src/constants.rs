// ABOUTME: Application constants and default configuration values
// ABOUTME: Named constants for ports, limits, and time windows used across modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! Shared constants. Grouped by concern so call sites read as
//! `limits::TOP_EXERCISES` rather than a bare number.

/// Default values used when the environment does not override them.
pub mod defaults {
    /// Default HTTP port for the API server
    pub const HTTP_PORT: u16 = 8081;

    /// Default database location
    pub const DATABASE_URL: &str = "sqlite:./data/fitlog.db";

    /// Default JWT expiry in hours
    pub const JWT_EXPIRY_HOURS: i64 = 24;

    /// Default log level
    pub const LOG_LEVEL: &str = "info";
}

/// Hard limits and fixed sizes.
pub mod limits {
    /// Maximum entries returned by the most-common-exercise ranking
    pub const TOP_EXERCISES: usize = 5;

    /// Priority range for admin-authored content (inclusive)
    pub const MAX_CONTENT_PRIORITY: i64 = 10;

    /// Generated JWT secrets are this many random bytes
    pub const JWT_SECRET_LEN: usize = 64;

    /// Window (days) used for "active user" counts in admin analytics
    pub const ACTIVE_USER_WINDOW_DAYS: i64 = 30;

    /// Window (days) of snapshots considered by the analytics summary
    pub const SUMMARY_WINDOW_DAYS: i64 = 30;

    /// Recent-activity entries shown in admin analytics
    pub const RECENT_ACTIVITY_LIMIT: i64 = 5;
}

/// Service identity used in logs.
pub mod service {
    /// Service name for structured logging
    pub const NAME: &str = "fitlog-server";
}
