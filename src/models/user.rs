use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user as exposed by the API.
///
/// This type carries no secret material at all: the password hash lives only
/// in [`Credentials`], which is never serialized. Every path that returns a
/// user to a caller goes through this type.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Internal user row including the stored password hash.
///
/// Only the credential store reads or produces this type; deliberately not
/// `Serialize`.
#[derive(Debug, FromRow)]
pub struct Credentials {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl From<Credentials> for User {
    fn from(creds: Credentials) -> Self {
        Self {
            id: creds.id,
            name: creds.name,
            email: creds.email,
            created_at: creds.created_at,
        }
    }
}
