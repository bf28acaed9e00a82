#![allow(dead_code)]

use std::sync::OnceLock;

use anyhow::Result;
use axum::{
    body::Body,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method, Request, StatusCode,
    },
    Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use eduplan_api::auth::{generate_jwt, password::hash_password, Claims};
use eduplan_api::{app, AppConfig, AppState};

pub const TEACHER_ID: i32 = 1;
pub const OTHER_TEACHER_ID: i32 = 2;
pub const COACH_ID: i32 = 4;

pub const TEACHER_PASSWORD: &str = "password";
pub const COACH_EMAIL: &str = "coach@school.edu";
pub const COACH_PASSWORD: &str = "coachpw";

/// Argon2 is slow in debug builds, so hash the two fixture passwords once per test binary
fn fixture_hashes() -> &'static (String, String) {
    static HASHES: OnceLock<(String, String)> = OnceLock::new();
    HASHES.get_or_init(|| {
        (
            hash_password(TEACHER_PASSWORD).expect("hash teacher password"),
            hash_password(COACH_PASSWORD).expect("hash coach password"),
        )
    })
}

/// Seed a freshly migrated database. Ids are deterministic because every
/// `#[sqlx::test]` gets its own database.
pub async fn seed(pool: &PgPool) -> Result<()> {
    let (teacher_hash, coach_hash) = fixture_hashes();

    sqlx::query("INSERT INTO schools (name) VALUES ('Test Elementary')")
        .execute(pool)
        .await?;

    sqlx::query("INSERT INTO standard_sets (name) VALUES ('ELA Grade 5'), ('Math Grade 5')")
        .execute(pool)
        .await?;

    for (email, first, last, hash, admin) in [
        ("test1@school.edu", "Tess", "Teacher", teacher_hash, false),
        ("test2@school.edu", "Terry", "Teacher", teacher_hash, false),
        ("test3@school.edu", "Toni", "Teacher", teacher_hash, false),
        (COACH_EMAIL, "Austin", "Larkman", coach_hash, true),
    ] {
        sqlx::query(
            "INSERT INTO users (email, password, first_name, last_name, school_id, admin)
             VALUES ($1, $2, $3, $4, 1, $5)",
        )
        .bind(email)
        .bind(hash)
        .bind(first)
        .bind(last)
        .bind(admin)
        .execute(pool)
        .await?;
    }

    sqlx::query(
        "INSERT INTO subjects (school_id, set_id, name, grade)
         VALUES (1, 1, 'ELA', '5'), (1, 2, 'Math', '5')",
    )
    .execute(pool)
    .await?;

    sqlx::query("INSERT INTO users_subjects (user_id, subject_id) VALUES (1, 1), (1, 2), (2, 2)")
        .execute(pool)
        .await?;

    sqlx::query(
        "INSERT INTO standards (set_id, code, description) VALUES
            (1, 'RL.5.1', 'Quote accurately from a text when explaining what the text says.'),
            (1, 'RL.5.2', 'Determine a theme of a story, drama, or poem from details in the text.'),
            (2, '5.NBT.1', 'Recognize that in a multi-digit number, a digit in one place represents 10 times as much as it represents in the place to its right.')",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "INSERT INTO questions (subject_id, text) VALUES
            (1, 'What evidence from the text supports your answer?'),
            (1, 'How does the setting shape the story?')",
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub fn test_config() -> AppConfig {
    AppConfig::test()
}

pub fn test_app(pool: PgPool) -> Router {
    app(AppState::new(pool, test_config()))
}

pub fn token_for(id: i32, admin: bool) -> String {
    let config = test_config();
    let claims = Claims::new(id, admin, 1, config.security.jwt_expiry_hours);
    generate_jwt(&claims, &config.security.jwt_secret).expect("sign test token")
}

/// Token of a regular teacher (user 1)
pub fn test_jwt() -> String {
    token_for(TEACHER_ID, false)
}

/// Token of the admin coach (user 4)
pub fn admin_jwt() -> String {
    token_for(COACH_ID, true)
}

pub fn unit_data() -> Value {
    json!({
        "subjectId": 1,
        "number": 1,
        "title": "Test",
        "startDate": "2021-03-25",
        "endDate": "2021-04-25",
        "reviewDate": "2021-04-28"
    })
}

pub fn update_data() -> Value {
    json!({
        "startDate": "2021-03-25",
        "endDate": "2021-04-25",
        "reviewDate": "2021-04-28",
        "completed": true,
        "planning": { "objectives": "Teach stuff" },
        "collaboration": { "reflection": "Students learned stuff" }
    })
}

/// Drive one request through the router and decode the JSON body
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok((status, json))
}

pub async fn get(app: &Router, uri: &str, token: &str) -> Result<(StatusCode, Value)> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post(app: &Router, uri: &str, token: &str, body: Value) -> Result<(StatusCode, Value)> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn patch(app: &Router, uri: &str, token: &str, body: Value) -> Result<(StatusCode, Value)> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

/// Every error body has the `{ error: { message, status } }` shape
pub fn assert_error(body: &Value, status: StatusCode) {
    assert_eq!(body["error"]["status"], status.as_u16(), "unexpected body: {body}");
    assert!(body["error"]["message"].is_string(), "missing message: {body}");
}
