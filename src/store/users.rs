//! Credential store: user lookup, secret verification, and registration.
//!
//! The plaintext password crosses into this module exactly once, on `create`
//! and `verify_secret`, and is hashed or compared here; it is never persisted
//! and never leaves in any return value.

use sqlx::PgPool;

use crate::auth::password::{hash_password, verify_password};
use crate::error::AppError;
use crate::models::{Credentials, User};

/// Looks up a user by email, returning the internal credentials row.
///
/// Email comparison is a plain equality against the stored value, so it is
/// case-sensitive.
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Credentials>, AppError> {
    let creds = sqlx::query_as::<_, Credentials>(
        "SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(creds)
}

/// Looks up a user by identifier. The projection never selects the password
/// hash, so the result is redacted by construction.
pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<User>, AppError> {
    let user =
        sqlx::query_as::<_, User>("SELECT id, name, email, created_at FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(user)
}

/// Checks a login attempt against the stored hash.
pub fn verify_secret(creds: &Credentials, attempt: &str) -> Result<bool, AppError> {
    verify_password(attempt, &creds.password_hash)
}

/// Registers a new user, hashing the password before persistence.
///
/// Fails with `Conflict` when the email is already registered; the unique
/// constraint on `users.email` backs the pre-check against concurrent
/// registrations.
pub async fn create(
    pool: &PgPool,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    if find_by_email(pool, email).await?.is_some() {
        return Err(AppError::Conflict("User already exists".into()));
    }

    let password_hash = hash_password(password)?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) \
         RETURNING id, name, email, created_at",
    )
    .bind(name)
    .bind(email)
    .bind(&password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
            AppError::Conflict("User already exists".into())
        }
        _ => AppError::from(e),
    })?;

    Ok(user)
}
