// ABOUTME: Goal model with type, unit, timeframe, status enums and milestones
// ABOUTME: Progress is clamped to [0, 100]; status derives from progress vs target vs end date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Kind of fitness target a goal tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum GoalType {
    WorkoutFrequency,
    CaloriesBurned,
    WeightLoss,
    Strength,
    Endurance,
    #[default]
    Custom,
}

impl GoalType {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WorkoutFrequency => "workout_frequency",
            Self::CaloriesBurned => "calories_burned",
            Self::WeightLoss => "weight_loss",
            Self::Strength => "strength",
            Self::Endurance => "endurance",
            Self::Custom => "custom",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "workout_frequency" => Self::WorkoutFrequency,
            "calories_burned" => Self::CaloriesBurned,
            "weight_loss" => Self::WeightLoss,
            "strength" => Self::Strength,
            "endurance" => Self::Endurance,
            _ => Self::Custom,
        }
    }
}

impl Display for GoalType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GoalType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "workout_frequency" => Ok(Self::WorkoutFrequency),
            "calories_burned" => Ok(Self::CaloriesBurned),
            "weight_loss" => Ok(Self::WeightLoss),
            "strength" => Ok(Self::Strength),
            "endurance" => Ok(Self::Endurance),
            "custom" => Ok(Self::Custom),
            _ => Err(AppError::invalid_input(format!(
                "Invalid goal type: {s}. Must be one of: workout_frequency, calories_burned, weight_loss, strength, endurance, custom"
            ))),
        }
    }
}

/// Unit the goal target is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum GoalUnit {
    Workouts,
    Calories,
    Kg,
    Reps,
    Minutes,
    #[default]
    Custom,
}

impl GoalUnit {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Workouts => "workouts",
            Self::Calories => "calories",
            Self::Kg => "kg",
            Self::Reps => "reps",
            Self::Minutes => "minutes",
            Self::Custom => "custom",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "workouts" => Self::Workouts,
            "calories" => Self::Calories,
            "kg" => Self::Kg,
            "reps" => Self::Reps,
            "minutes" => Self::Minutes,
            _ => Self::Custom,
        }
    }
}

impl FromStr for GoalUnit {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "workouts" => Ok(Self::Workouts),
            "calories" => Ok(Self::Calories),
            "kg" => Ok(Self::Kg),
            "reps" => Ok(Self::Reps),
            "minutes" => Ok(Self::Minutes),
            "custom" => Ok(Self::Custom),
            _ => Err(AppError::invalid_input(format!(
                "Invalid goal unit: {s}. Must be one of: workouts, calories, kg, reps, minutes, custom"
            ))),
        }
    }
}

/// Cadence the goal is evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum Timeframe {
    Daily,
    #[default]
    Weekly,
    Monthly,
}

impl Timeframe {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "daily" => Self::Daily,
            "monthly" => Self::Monthly,
            _ => Self::Weekly,
        }
    }
}

impl FromStr for Timeframe {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(AppError::invalid_input(format!(
                "Invalid timeframe: {s}. Must be one of: daily, weekly, monthly"
            ))),
        }
    }
}

/// Lifecycle state of a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
    Failed,
}

impl GoalStatus {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            _ => Self::Active,
        }
    }
}

impl Display for GoalStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// An intermediate checkpoint on the way to a goal target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    /// Milestone target value
    pub target: f64,
    /// Whether the milestone has been reached
    #[serde(default)]
    pub achieved: bool,
    /// When the milestone was reached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

/// A user-defined fitness target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
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
    /// Progress percentage, always within [0, 100]
    pub progress: f64,
    /// Lifecycle state
    pub status: GoalStatus,
    /// Free-form description
    pub description: Option<String>,
    /// Custom type label when `goal_type` is custom
    pub custom_type: Option<String>,
    /// Custom unit label when `unit` is custom
    pub custom_unit: Option<String>,
    /// Intermediate checkpoints (stored as a JSON column)
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}
