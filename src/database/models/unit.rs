use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, PgConnection};

use crate::database::pool::DatabaseError;

/// Free-form planning/collaboration document stored as JSONB
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

const UNIT_NOT_FOUND: &str = "Unit not found";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: i32,
    pub subject_id: i32,
    pub number: i32,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub review_date: Option<NaiveDate>,
    pub planning: Json<JsonObject>,
    pub collaboration: Json<JsonObject>,
    pub completed: bool,
}

/// A unit joined with the display fields of its subject
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UnitDetail {
    pub subject_name: String,
    pub set_id: Option<i32>,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub unit: Unit,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUnit {
    pub subject_id: i32,
    pub number: i32,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub review_date: Option<NaiveDate>,
}

/// Partial update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitUpdate {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub review_date: Option<NaiveDate>,
    pub completed: Option<bool>,
    pub planning: Option<JsonObject>,
    pub collaboration: Option<JsonObject>,
}

impl Unit {
    pub async fn create(conn: &mut PgConnection, data: &NewUnit) -> Result<Unit, DatabaseError> {
        let unit = sqlx::query_as::<_, Unit>(
            r#"
            INSERT INTO units (subject_id, number, title, start_date, end_date, review_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, subject_id, number, title, start_date, end_date, review_date,
                      planning, collaboration, completed
            "#,
        )
        .bind(data.subject_id)
        .bind(data.number)
        .bind(&data.title)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.review_date)
        .fetch_one(&mut *conn)
        .await?;

        tracing::debug!("Created unit {} for subject {}", unit.id, unit.subject_id);
        Ok(unit)
    }

    pub async fn update(
        conn: &mut PgConnection,
        data: &UnitUpdate,
        id: i32,
    ) -> Result<Unit, DatabaseError> {
        sqlx::query_as::<_, Unit>(
            r#"
            UPDATE units
            SET start_date = COALESCE($1, start_date),
                end_date = COALESCE($2, end_date),
                review_date = COALESCE($3, review_date),
                completed = COALESCE($4, completed),
                planning = COALESCE($5, planning),
                collaboration = COALESCE($6, collaboration)
            WHERE id = $7
            RETURNING id, subject_id, number, title, start_date, end_date, review_date,
                      planning, collaboration, completed
            "#,
        )
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.review_date)
        .bind(data.completed)
        .bind(data.planning.clone().map(Json))
        .bind(data.collaboration.clone().map(Json))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| DatabaseError::not_found(UNIT_NOT_FOUND))
    }

    pub async fn get(conn: &mut PgConnection, id: i32) -> Result<UnitDetail, DatabaseError> {
        sqlx::query_as::<_, UnitDetail>(
            r#"
            SELECT u.id, u.subject_id, s.name AS subject_name, s.set_id,
                   u.number, u.title, u.start_date, u.end_date, u.review_date,
                   u.planning, u.collaboration, u.completed
            FROM units AS u
            JOIN subjects AS s ON u.subject_id = s.id
            WHERE u.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| DatabaseError::not_found(UNIT_NOT_FOUND))
    }

    pub async fn list_for_subject(
        conn: &mut PgConnection,
        subject_id: i32,
    ) -> Result<Vec<Unit>, DatabaseError> {
        let units = sqlx::query_as::<_, Unit>(
            r#"
            SELECT id, subject_id, number, title, start_date, end_date, review_date,
                   planning, collaboration, completed
            FROM units
            WHERE subject_id = $1
            ORDER BY number, id
            "#,
        )
        .bind(subject_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(units)
    }

    /// Units for several subjects at once, ordered for grouping
    pub async fn list_for_subjects(
        conn: &mut PgConnection,
        subject_ids: &[i32],
    ) -> Result<Vec<Unit>, DatabaseError> {
        if subject_ids.is_empty() {
            return Ok(vec![]);
        }

        let units = sqlx::query_as::<_, Unit>(
            r#"
            SELECT id, subject_id, number, title, start_date, end_date, review_date,
                   planning, collaboration, completed
            FROM units
            WHERE subject_id = ANY($1)
            ORDER BY subject_id, number, id
            "#,
        )
        .bind(subject_ids)
        .fetch_all(&mut *conn)
        .await?;

        Ok(units)
    }
}
