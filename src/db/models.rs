//! # Database Models
//!
//! Structs that map to rows in the database.

use chrono::Utc;
use serde::Serialize;

/// User account information
///
/// ## Derive Macros
/// - `Serialize`: Converts the user to JSON for API responses
/// - `sqlx::FromRow`: Maps a `users` row onto this struct
///
/// The password hash is skipped when serializing so it can never leak through
/// a JSON response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct User {
    /// Identifier generated by the database (AUTOINCREMENT)
    pub id: i64,

    /// Unique, non-empty username used to log in
    pub username: String,

    /// Argon2 hash in PHC string format, never the plaintext
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// When the account was created (RFC3339 timestamp)
    /// Example: "2024-01-15T10:30:00+00:00"
    pub created_at: String,
}

/// Column values for a user that has not been inserted yet
///
/// There is no `id` here: the store assigns it on insert.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub created_at: String,
}

impl NewUser {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}
