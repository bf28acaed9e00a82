// handlers/protected/users.rs - /users routes

use axum::{extract::State, Extension};

use crate::api::{JsonBody, PathParam};
use crate::app::AppState;
use crate::database::models::{NewUser, Subject, User, UserUpdate};
use crate::error::ApiError;
use crate::middleware::{
    ensure_admin, ensure_admin_or_correct_user, ensure_correct_user, ApiResponse, ApiResult,
    AuthUser,
};

/// POST /users - Register a user (admin only); 409 on a duplicate email
pub async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    body: Result<JsonBody<NewUser>, ApiError>,
) -> ApiResult<User> {
    ensure_admin(&caller)?;
    let JsonBody(payload) = body?;

    let mut conn = state.pool.acquire().await?;
    let user = User::register(&mut conn, &payload).await?;
    Ok(ApiResponse::created(user))
}

/// GET /users/:userId
pub async fn get(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    PathParam(user_id): PathParam<i32>,
) -> ApiResult<User> {
    ensure_admin_or_correct_user(&caller, user_id)?;

    let mut conn = state.pool.acquire().await?;
    let user = User::get(&mut conn, user_id).await?;
    Ok(ApiResponse::success(user))
}

/// PATCH /users/:userId - Update name, email or password
pub async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    PathParam(user_id): PathParam<i32>,
    body: Result<JsonBody<UserUpdate>, ApiError>,
) -> ApiResult<User> {
    ensure_admin_or_correct_user(&caller, user_id)?;
    let JsonBody(payload) = body?;

    let mut conn = state.pool.acquire().await?;
    let user = User::update(&mut conn, &payload, user_id).await?;
    Ok(ApiResponse::success(user))
}

/// GET /users/:userId/subjects - The caller's own subjects, units nested
pub async fn subjects(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    PathParam(user_id): PathParam<i32>,
) -> ApiResult<Vec<Subject>> {
    ensure_correct_user(&caller, user_id)?;

    let mut conn = state.pool.acquire().await?;
    let subjects = Subject::list_for_user(&mut conn, user_id).await?;
    Ok(ApiResponse::success(subjects))
}
