//! Route-level authorization checks on an already authenticated caller.

use super::auth::AuthUser;
use crate::error::ApiError;

/// Caller must hold the admin flag
pub fn ensure_admin(caller: &AuthUser) -> Result<(), ApiError> {
    if caller.admin {
        return Ok(());
    }
    tracing::warn!("User {} denied admin-only route", caller.id);
    Err(ApiError::forbidden("Admin privileges required"))
}

/// Caller must be the user named in the path
pub fn ensure_correct_user(caller: &AuthUser, user_id: i32) -> Result<(), ApiError> {
    if caller.id == user_id {
        return Ok(());
    }
    tracing::warn!("User {} denied access to resources of user {}", caller.id, user_id);
    Err(ApiError::forbidden("Unauthorized access to another user's resources"))
}

pub fn ensure_admin_or_correct_user(caller: &AuthUser, user_id: i32) -> Result<(), ApiError> {
    if caller.admin {
        return Ok(());
    }
    ensure_correct_user(caller, user_id)
}
