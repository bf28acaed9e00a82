// handlers/protected/standards.rs - /standards routes

use axum::{extract::State, Extension};

use crate::api::{JsonBody, PathParam};
use crate::app::AppState;
use crate::database::models::{NewStandard, Standard};
use crate::error::ApiError;
use crate::middleware::{ensure_admin, ApiResponse, ApiResult, AuthUser};

/// GET /standards/:setId - Standards of one set, ordered by code
pub async fn list(
    State(state): State<AppState>,
    PathParam(set_id): PathParam<i32>,
) -> ApiResult<Vec<Standard>> {
    let mut conn = state.pool.acquire().await?;
    let standards = Standard::list_by_set(&mut conn, set_id).await?;
    Ok(ApiResponse::success(standards))
}

/// POST /standards (admin only)
pub async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    body: Result<JsonBody<NewStandard>, ApiError>,
) -> ApiResult<Standard> {
    ensure_admin(&caller)?;
    let JsonBody(payload) = body?;

    let mut conn = state.pool.acquire().await?;
    let standard = Standard::create(&mut conn, &payload).await?;
    Ok(ApiResponse::created(standard))
}
