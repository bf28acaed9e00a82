//! Password hashing and verification (Argon2id, PHC-format strings).

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use super::AuthError;

/// Hash a password. Returns a PHC-format string for the `users.password` column.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC-format hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// [`hash_password`] on a blocking thread
pub async fn hash_password_blocking(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AuthError::PasswordHash(format!("hashing task failed: {e}")))?
}

/// [`verify_password`] on a blocking thread
pub async fn verify_password_blocking(password: String, hash: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AuthError::PasswordHash(format!("verification task failed: {e}")))?
}

/// Run one verification against a throwaway hash so a login for an unknown
/// email costs the same as a wrong password. The result is discarded.
pub async fn verify_dummy_blocking(password: String) -> Result<(), AuthError> {
    static DUMMY_HASH: OnceLock<String> = OnceLock::new();

    tokio::task::spawn_blocking(move || {
        let hash = match DUMMY_HASH.get() {
            Some(hash) => hash,
            None => {
                let hash = hash_password("unknown-user-placeholder")?;
                DUMMY_HASH.get_or_init(|| hash)
            }
        };
        verify_password(&password, hash).map(|_| ())
    })
    .await
    .map_err(|e| AuthError::PasswordHash(format!("verification task failed: {e}")))?
}
