// ABOUTME: Admin-authored content models: health tips and workout suggestions
// ABOUTME: Category, difficulty, and audience enums with strict API validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Health tip category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum TipCategory {
    #[default]
    Wellness,
    Nutrition,
    Exercise,
    Recovery,
    Mental,
}

impl TipCategory {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Wellness => "wellness",
            Self::Nutrition => "nutrition",
            Self::Exercise => "exercise",
            Self::Recovery => "recovery",
            Self::Mental => "mental",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "nutrition" => Self::Nutrition,
            "exercise" => Self::Exercise,
            "recovery" => Self::Recovery,
            "mental" => Self::Mental,
            _ => Self::Wellness,
        }
    }
}

impl FromStr for TipCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wellness" => Ok(Self::Wellness),
            "nutrition" => Ok(Self::Nutrition),
            "exercise" => Ok(Self::Exercise),
            "recovery" => Ok(Self::Recovery),
            "mental" => Ok(Self::Mental),
            _ => Err(AppError::invalid_input(format!(
                "Invalid category: {s}. Must be one of: wellness, nutrition, exercise, recovery, mental"
            ))),
        }
    }
}

/// Audience a piece of content targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum Audience {
    #[default]
    All,
    Beginner,
    Intermediate,
    Advanced,
}

impl Audience {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "beginner" => Self::Beginner,
            "intermediate" => Self::Intermediate,
            "advanced" => Self::Advanced,
            _ => Self::All,
        }
    }
}

impl FromStr for Audience {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(AppError::invalid_input(format!(
                "Invalid target audience: {s}. Must be one of: all, beginner, intermediate, advanced"
            ))),
        }
    }
}

/// Workout suggestion category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum SuggestionCategory {
    #[default]
    Strength,
    Cardio,
    Flexibility,
    Balance,
}

impl SuggestionCategory {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Cardio => "cardio",
            Self::Flexibility => "flexibility",
            Self::Balance => "balance",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "cardio" => Self::Cardio,
            "flexibility" => Self::Flexibility,
            "balance" => Self::Balance,
            _ => Self::Strength,
        }
    }
}

impl FromStr for SuggestionCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strength" => Ok(Self::Strength),
            "cardio" => Ok(Self::Cardio),
            "flexibility" => Ok(Self::Flexibility),
            "balance" => Ok(Self::Balance),
            _ => Err(AppError::invalid_input(format!(
                "Invalid category: {s}. Must be one of: strength, cardio, flexibility, balance"
            ))),
        }
    }
}

/// Difficulty of a suggested workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "intermediate" => Self::Intermediate,
            "advanced" => Self::Advanced,
            _ => Self::Beginner,
        }
    }
}

impl FromStr for Difficulty {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(AppError::invalid_input(format!(
                "Invalid difficulty: {s}. Must be one of: beginner, intermediate, advanced"
            ))),
        }
    }
}

/// An admin-authored health tip surfaced to users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthTip {
    /// Unique identifier
    pub id: Uuid,
    /// Display title
    pub title: String,
    /// Tip body
    pub content: String,
    /// Category for filtering
    pub category: TipCategory,
    /// Tags for filtering and search (stored as a JSON column)
    #[serde(default)]
    pub tags: Vec<String>,
    /// Audience the tip targets
    pub target_audience: Audience,
    /// Display priority, 0 to 10
    pub priority: i64,
    /// Whether the tip is currently surfaced
    pub is_active: bool,
    /// Admin who authored the tip
    pub created_by: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// An admin-authored workout suggestion surfaced to users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSuggestion {
    /// Unique identifier
    pub id: Uuid,
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
    /// Tags for filtering and search (stored as a JSON column)
    #[serde(default)]
    pub tags: Vec<String>,
    /// Audience the suggestion targets
    pub target_audience: Audience,
    /// Display priority, 0 to 10
    pub priority: i64,
    /// Whether the suggestion is currently surfaced
    pub is_active: bool,
    /// Admin who authored the suggestion
    pub created_by: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}
