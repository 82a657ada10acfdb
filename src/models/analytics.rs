// ABOUTME: Analytics report shape and persisted snapshot model
// ABOUTME: TimeRange resolves symbolic week/month/year windows for report generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Symbolic reporting window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum TimeRange {
    Week,
    #[default]
    Month,
    Year,
}

impl TimeRange {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Parse from a string, defaulting to `Month` for unrecognized input
    /// (the report endpoint treats an unknown range as a month request
    /// rather than failing).
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "week" => Self::Week,
            "year" => Self::Year,
            _ => Self::Month,
        }
    }
}

impl Display for TimeRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Activity totals for one calendar day of the reporting window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyActivity {
    /// Day in `YYYY-MM-DD` form
    pub date: String,
    /// Workouts logged that day
    pub count: u32,
    /// Total minutes that day
    pub duration: f64,
    /// Total calories that day
    pub calories_burned: f64,
}

/// Share of the window's workouts that fell on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressPoint {
    /// Day in `YYYY-MM-DD` form
    pub date: String,
    /// Percentage of the window's workouts logged that day
    pub progress: f64,
}

/// One entry of the most-common-exercise ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseFrequency {
    /// Exercise name
    pub name: String,
    /// Occurrences across the window's workouts
    pub count: u32,
}

/// Computed summary of a user's activity over a time window
///
/// All rate and average fields are 0 (never an error, never NaN) when the
/// underlying set is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    /// Workouts in the window
    pub total_workouts: u32,
    /// Summed duration in minutes
    pub total_duration: f64,
    /// Summed calories
    pub total_calories_burned: f64,
    /// Workout count per type
    pub workout_type_distribution: BTreeMap<String, u32>,
    /// One entry per calendar day of the window
    pub daily_activity: Vec<DailyActivity>,
    /// Per-day share of the window's workouts
    pub progress_over_time: Vec<ProgressPoint>,
    /// Completed goals as a percentage of goals in the window
    pub goal_completion_rate: f64,
    /// Top exercises by frequency, descending, at most five entries
    pub most_common_exercises: Vec<ExerciseFrequency>,
}

impl AnalyticsReport {
    /// An all-zero report (the degenerate no-data case)
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_workouts: 0,
            total_duration: 0.0,
            total_calories_burned: 0.0,
            workout_type_distribution: BTreeMap::new(),
            daily_activity: Vec::new(),
            progress_over_time: Vec::new(),
            goal_completion_rate: 0.0,
            most_common_exercises: Vec::new(),
        }
    }
}

/// A persisted, on-demand-generated analytics report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Window the report covers
    pub time_range: TimeRange,
    /// Absolute window start (clamped to start of day)
    pub start_date: DateTime<Utc>,
    /// Absolute window end (clamped to end of day)
    pub end_date: DateTime<Utc>,
    /// The computed report (stored as a JSON column)
    pub report: AnalyticsReport,
    /// When the report was generated
    pub generated_at: DateTime<Utc>,
}
