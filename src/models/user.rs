// ABOUTME: User account model and role definitions
// ABOUTME: User, UserRole with database string mapping and strict API parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// User role for the permission system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular account: owns workouts, goals, and analytics
    #[default]
    User,
    /// Administrator: user and content management
    Admin,
}

impl UserRole {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "admin" => Self::Admin,
            _ => Self::User,
        }
    }

    /// Check whether this role grants admin access
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(AppError::invalid_input(format!(
                "Invalid role: {s}. Must be one of: user, admin"
            ))),
        }
    }
}

/// Represents a registered account
///
/// The password hash never serializes; API responses use dedicated DTOs,
/// and this guard keeps accidental leaks out of logs and debug endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// Unique display handle
    pub username: String,
    /// Unique email address (used for login)
    pub email: String,
    /// Hashed password for authentication
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Role for the permission system
    pub role: UserRole,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// Last time the account was modified
    pub updated_at: DateTime<Utc>,
    /// Last successful login, if any
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new user with the given credentials and the default role
    #[must_use]
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            role: UserRole::User,
            created_at: now,
            updated_at: now,
            last_login: None,
        }
    }

    /// Check whether the user was active (logged in) since the given instant
    #[must_use]
    pub fn active_since(&self, cutoff: DateTime<Utc>) -> bool {
        self.last_login.is_some_and(|at| at >= cutoff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!(UserRole::parse("admin"), UserRole::Admin);
        assert_eq!(UserRole::parse("garbage"), UserRole::User);
        assert!("superuser".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_password_hash_never_serializes() {
        let user = User::new("ada".into(), "ada@example.com".into(), "hash".into());
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hash"));
    }
}
