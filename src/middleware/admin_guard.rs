// ABOUTME: Admin role guard for privileged routes
// ABOUTME: Rejects non-admin callers with a 403 permission error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use crate::auth::AuthResult;
use crate::errors::{AppError, AppResult};

/// Require the authenticated caller to hold the admin role
///
/// # Errors
///
/// Returns `PermissionDenied` for non-admin callers.
pub fn require_admin(auth: &AuthResult) -> AppResult<()> {
    if auth.role.is_admin() {
        Ok(())
    } else {
        tracing::debug!(user_id = %auth.user_id, "admin access denied");
        Err(AppError::permission_denied("Access denied. Admin only."))
    }
}
