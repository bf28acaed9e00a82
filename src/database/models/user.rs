use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection};

use crate::auth::password::{hash_password_blocking, verify_dummy_blocking, verify_password_blocking};
use crate::auth::AuthError;
use crate::database::pool::DatabaseError;

/// Public view of a user; the password hash never leaves the model layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub school_id: i32,
    pub admin: bool,
}

#[derive(Debug, FromRow)]
struct UserCredentials {
    #[sqlx(flatten)]
    user: User,
    password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub school_id: i32,
    #[serde(default)]
    pub admin: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    /// Check an email/password pair. Unknown email and wrong password are
    /// indistinguishable to the caller.
    pub async fn authenticate(
        conn: &mut PgConnection,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let credentials = sqlx::query_as::<_, UserCredentials>(
            r#"
            SELECT id, email, password, first_name, last_name, school_id, admin
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&mut *conn)
        .await
        .map_err(DatabaseError::from)?;

        let Some(credentials) = credentials else {
            tracing::debug!("Login attempt for unknown email");
            verify_dummy_blocking(password.to_string()).await?;
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password_blocking(password.to_string(), credentials.password).await? {
            tracing::debug!("Login attempt with wrong password for user {}", credentials.user.id);
            return Err(AuthError::InvalidCredentials);
        }

        Ok(credentials.user)
    }

    pub async fn register(conn: &mut PgConnection, data: &NewUser) -> Result<User, AuthError> {
        let hash = hash_password_blocking(data.password.clone()).await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password, first_name, last_name, school_id, admin)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, email, first_name, last_name, school_id, admin
            "#,
        )
        .bind(&data.email)
        .bind(hash)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(data.school_id)
        .bind(data.admin)
        .fetch_one(&mut *conn)
        .await
        .map_err(DatabaseError::from)?;

        tracing::info!("Registered user {} ({})", user.id, user.email);
        Ok(user)
    }

    pub async fn get(conn: &mut PgConnection, id: i32) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, first_name, last_name, school_id, admin
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| DatabaseError::not_found("User not found"))
    }

    pub async fn update(
        conn: &mut PgConnection,
        data: &UserUpdate,
        id: i32,
    ) -> Result<User, AuthError> {
        let hash = match &data.password {
            Some(password) => Some(hash_password_blocking(password.clone()).await?),
            None => None,
        };

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = COALESCE($1, email),
                password = COALESCE($2, password),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name)
            WHERE id = $5
            RETURNING id, email, first_name, last_name, school_id, admin
            "#,
        )
        .bind(&data.email)
        .bind(hash)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(DatabaseError::from)?
        .ok_or_else(|| DatabaseError::not_found("User not found"))?;

        Ok(user)
    }
}
