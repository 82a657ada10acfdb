// ABOUTME: Common data models for users, workouts, goals, content, and analytics
// ABOUTME: Domain types with serde derives and strict enum parsing for API validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! Domain model types.
//!
//! Enums expose two parsing paths: a lenient `parse` used when reading rows
//! back from the database (unknown values fall back to a default instead of
//! poisoning reads), and a strict `FromStr` returning [`crate::errors::AppError`]
//! used to validate API input, where unknown values must be rejected with a
//! descriptive message.

/// Computed analytics report and persisted snapshot types
pub mod analytics;
/// Admin-authored content: health tips and workout suggestions
pub mod content;
/// Goals and goal progress types
pub mod goal;
/// User accounts and roles
pub mod user;
/// Logged workouts and exercises
pub mod workout;

pub use analytics::{
    AnalyticsReport, AnalyticsSnapshot, DailyActivity, ExerciseFrequency, ProgressPoint, TimeRange,
};
pub use content::{
    Audience, Difficulty, HealthTip, SuggestionCategory, TipCategory, WorkoutSuggestion,
};
pub use goal::{Goal, GoalStatus, GoalType, GoalUnit, Milestone, Timeframe};
pub use user::{User, UserRole};
pub use workout::{Exercise, Intensity, Workout, WorkoutType};
