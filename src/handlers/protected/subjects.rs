// handlers/protected/subjects.rs - /subjects routes

use axum::{extract::State, http::StatusCode, Extension};
use serde_json::{json, Value};

use crate::api::{JsonBody, PathParam};
use crate::app::AppState;
use crate::database::models::{NewSubject, Subject, User};
use crate::error::ApiError;
use crate::middleware::{ensure_admin, ApiResponse, ApiResult, AuthUser};

/// POST /subjects (admin only)
pub async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    body: Result<JsonBody<NewSubject>, ApiError>,
) -> ApiResult<Subject> {
    ensure_admin(&caller)?;
    let JsonBody(payload) = body?;

    let mut conn = state.pool.acquire().await?;
    let subject = Subject::create(&mut conn, &payload).await?;
    Ok(ApiResponse::created(subject))
}

/// GET /subjects/:id - Subject with its units in order
pub async fn get(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> ApiResult<Subject> {
    let mut conn = state.pool.acquire().await?;
    let subject = Subject::get(&mut conn, id).await?;
    Ok(ApiResponse::success(subject))
}

/// POST /subjects/:id/users/:userId - Assign a subject to a user (admin only)
pub async fn assign_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    PathParam((subject_id, user_id)): PathParam<(i32, i32)>,
) -> ApiResult<Value> {
    ensure_admin(&caller)?;

    let mut conn = state.pool.acquire().await?;
    // Resolve both sides first so a bad id is a 404 rather than a constraint error
    Subject::ensure_exists(&mut conn, subject_id).await?;
    User::get(&mut conn, user_id).await?;
    Subject::assign_user(&mut conn, subject_id, user_id).await?;

    Ok(ApiResponse::with_status(
        json!({ "subjectId": subject_id, "userId": user_id }),
        StatusCode::CREATED,
    ))
}
