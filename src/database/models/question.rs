use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection};

use crate::database::pool::DatabaseError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i32,
    pub subject_id: i32,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    pub subject_id: i32,
    pub text: String,
}

impl Question {
    pub async fn create(conn: &mut PgConnection, data: &NewQuestion) -> Result<Question, DatabaseError> {
        let question = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (subject_id, text)
            VALUES ($1, $2)
            RETURNING id, subject_id, text
            "#,
        )
        .bind(data.subject_id)
        .bind(&data.text)
        .fetch_one(&mut *conn)
        .await?;

        Ok(question)
    }

    /// Questions for a subject. An empty result is NotFound, whether or not
    /// the subject itself exists.
    pub async fn list_by_subject(
        conn: &mut PgConnection,
        subject_id: i32,
    ) -> Result<Vec<Question>, DatabaseError> {
        let questions = sqlx::query_as::<_, Question>(
            "SELECT id, subject_id, text FROM questions WHERE subject_id = $1 ORDER BY id",
        )
        .bind(subject_id)
        .fetch_all(&mut *conn)
        .await?;

        if questions.is_empty() {
            return Err(DatabaseError::not_found("No questions found"));
        }

        Ok(questions)
    }
}
