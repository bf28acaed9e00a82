// handlers/protected/units.rs - /units routes

use axum::{extract::State, Extension};

use crate::api::{JsonBody, PathParam};
use crate::app::AppState;
use crate::database::models::{NewUnit, Unit, UnitDetail, UnitUpdate};
use crate::error::ApiError;
use crate::middleware::{ensure_admin, ApiResponse, ApiResult, AuthUser};

/// POST /units - Create a unit (admin only)
///
/// Body: `{ subjectId, number, title, startDate, endDate, reviewDate }`,
/// dates as `yyyy-mm-dd`. The admin check runs before the body is parsed.
pub async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    body: Result<JsonBody<NewUnit>, ApiError>,
) -> ApiResult<Unit> {
    ensure_admin(&caller)?;
    let JsonBody(payload) = body?;

    let mut conn = state.pool.acquire().await?;
    let unit = Unit::create(&mut conn, &payload).await?;
    Ok(ApiResponse::created(unit))
}

/// GET /units/:id - Unit with its subject's name and standard set
pub async fn get(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> ApiResult<UnitDetail> {
    let mut conn = state.pool.acquire().await?;
    let unit = Unit::get(&mut conn, id).await?;
    Ok(ApiResponse::success(unit))
}

/// PATCH /units/:id - Update dates, completion, planning and collaboration
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(payload): JsonBody<UnitUpdate>,
) -> ApiResult<Unit> {
    let mut conn = state.pool.acquire().await?;
    let unit = Unit::update(&mut conn, &payload, id).await?;
    Ok(ApiResponse::success(unit))
}
