// handlers/protected/questions.rs - /questions routes

use axum::{extract::State, Extension};

use crate::api::{JsonBody, PathParam};
use crate::app::AppState;
use crate::database::models::{NewQuestion, Question};
use crate::error::ApiError;
use crate::middleware::{ensure_admin, ApiResponse, ApiResult, AuthUser};

/// GET /questions/:subjectId - 404 when the subject has no questions
pub async fn list(
    State(state): State<AppState>,
    PathParam(subject_id): PathParam<i32>,
) -> ApiResult<Vec<Question>> {
    let mut conn = state.pool.acquire().await?;
    let questions = Question::list_by_subject(&mut conn, subject_id).await?;
    Ok(ApiResponse::success(questions))
}

/// POST /questions (admin only)
pub async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    body: Result<JsonBody<NewQuestion>, ApiError>,
) -> ApiResult<Question> {
    ensure_admin(&caller)?;
    let JsonBody(payload) = body?;

    let mut conn = state.pool.acquire().await?;
    let question = Question::create(&mut conn, &payload).await?;
    Ok(ApiResponse::created(question))
}
