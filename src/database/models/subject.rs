use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection};

use super::unit::Unit;
use crate::database::pool::DatabaseError;

const SUBJECT_NOT_FOUND: &str = "Subject not found";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: i32,
    pub school_id: i32,
    pub set_id: Option<i32>,
    pub name: String,
    pub grade: String,
    #[sqlx(skip)]
    #[serde(default)]
    pub units: Vec<Unit>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubject {
    pub school_id: i32,
    pub set_id: Option<i32>,
    pub name: String,
    pub grade: String,
}

impl Subject {
    pub async fn create(conn: &mut PgConnection, data: &NewSubject) -> Result<Subject, DatabaseError> {
        let subject = sqlx::query_as::<_, Subject>(
            r#"
            INSERT INTO subjects (school_id, set_id, name, grade)
            VALUES ($1, $2, $3, $4)
            RETURNING id, school_id, set_id, name, grade
            "#,
        )
        .bind(data.school_id)
        .bind(data.set_id)
        .bind(&data.name)
        .bind(&data.grade)
        .fetch_one(&mut *conn)
        .await?;

        Ok(subject)
    }

    /// Subject by id with its units in order
    pub async fn get(conn: &mut PgConnection, id: i32) -> Result<Subject, DatabaseError> {
        let mut subject = sqlx::query_as::<_, Subject>(
            "SELECT id, school_id, set_id, name, grade FROM subjects WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| DatabaseError::not_found(SUBJECT_NOT_FOUND))?;

        subject.units = Unit::list_for_subject(&mut *conn, id).await?;
        Ok(subject)
    }

    /// NotFound unless a subject with this id exists; loads nothing else
    pub async fn ensure_exists(conn: &mut PgConnection, id: i32) -> Result<(), DatabaseError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM subjects WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *conn)
            .await?;

        if !exists {
            return Err(DatabaseError::not_found(SUBJECT_NOT_FOUND));
        }
        Ok(())
    }

    /// Subjects assigned to a user, each with its units nested
    pub async fn list_for_user(
        conn: &mut PgConnection,
        user_id: i32,
    ) -> Result<Vec<Subject>, DatabaseError> {
        let mut subjects = sqlx::query_as::<_, Subject>(
            r#"
            SELECT s.id, s.school_id, s.set_id, s.name, s.grade
            FROM subjects AS s
            JOIN users_subjects AS us ON us.subject_id = s.id
            WHERE us.user_id = $1
            ORDER BY s.name, s.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;

        let ids: Vec<i32> = subjects.iter().map(|s| s.id).collect();
        let units = Unit::list_for_subjects(&mut *conn, &ids).await?;
        nest_units(&mut subjects, units);

        Ok(subjects)
    }

    /// Assign a subject to a user; repeating the assignment is a no-op
    pub async fn assign_user(
        conn: &mut PgConnection,
        subject_id: i32,
        user_id: i32,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO users_subjects (user_id, subject_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(subject_id)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }
}

/// Distribute units onto their subjects, keeping unit order
fn nest_units(subjects: &mut [Subject], units: Vec<Unit>) {
    for unit in units {
        if let Some(subject) = subjects.iter_mut().find(|s| s.id == unit.subject_id) {
            subject.units.push(unit);
        }
    }
}
