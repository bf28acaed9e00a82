// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (bearer JWT, with per-route admin/ownership checks)

pub mod protected;
pub mod public;

use crate::error::ApiError;

/// Fallback for unmatched routes
pub async fn not_found() -> ApiError {
    ApiError::not_found("Not Found")
}
