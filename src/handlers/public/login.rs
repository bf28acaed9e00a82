// handlers/public/login.rs - POST /login handler

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::api::JsonBody;
use crate::app::AppState;
use crate::auth::{generate_jwt, Claims};
use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// POST /login - Exchange email + password for a signed token
///
/// Expected Input:
/// ```json
/// { "email": "coach@school.edu", "password": "..." }
/// ```
///
/// Expected Output:
/// ```json
/// {
///   "token": "eyJhbGciOiJIUzI1NiI...",
///   "user": { "id": 4, "firstName": "Austin", "lastName": "Larkman",
///             "email": "coach@school.edu", "schoolId": 1, "admin": true }
/// }
/// ```
///
/// Unknown email or wrong password: 401.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let mut conn = state.pool.acquire().await?;
    let user = User::authenticate(&mut conn, &payload.email, &payload.password).await?;

    let claims = Claims::for_user(&user, state.config.security.jwt_expiry_hours);
    let token = generate_jwt(&claims, &state.config.security.jwt_secret)?;

    tracing::info!("User {} logged in", user.id);
    Ok(ApiResponse::success(LoginResponse { token, user }))
}
