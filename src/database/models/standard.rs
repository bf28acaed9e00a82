use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection};

use crate::database::pool::DatabaseError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Standard {
    pub id: i32,
    pub set_id: i32,
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStandard {
    pub set_id: i32,
    pub code: String,
    pub description: String,
}

impl Standard {
    pub async fn create(conn: &mut PgConnection, data: &NewStandard) -> Result<Standard, DatabaseError> {
        let standard = sqlx::query_as::<_, Standard>(
            r#"
            INSERT INTO standards (set_id, code, description)
            VALUES ($1, $2, $3)
            RETURNING id, set_id, code, description
            "#,
        )
        .bind(data.set_id)
        .bind(&data.code)
        .bind(&data.description)
        .fetch_one(&mut *conn)
        .await?;

        Ok(standard)
    }

    /// All standards in a set; an unknown set yields an empty list
    pub async fn list_by_set(conn: &mut PgConnection, set_id: i32) -> Result<Vec<Standard>, DatabaseError> {
        let standards = sqlx::query_as::<_, Standard>(
            r#"
            SELECT id, set_id, code, description
            FROM standards
            WHERE set_id = $1
            ORDER BY code, id
            "#,
        )
        .bind(set_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(standards)
    }
}
