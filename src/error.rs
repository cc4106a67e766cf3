//! # Error Handling
//!
//! This module defines the application-wide error type and converts it into
//! HTTP responses.
//!
//! ## Two kinds of failure
//! - Validation failures (`AuthError`) are expected: the handlers catch them
//!   and re-render the form with the message as a flash.
//! - Everything else (database, session store, hashing) is an infrastructure
//!   failure and becomes a JSON error response.

use crate::auth::AuthError;
use crate::password::PasswordError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-wide error type
///
/// `#[from]` on a variant lets `?` convert the source error automatically:
/// ```rust,ignore
/// let user = sqlx::query_as::<_, User>(...).fetch_optional(pool).await?;
/// // sqlx::Error becomes AppError::Database
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Database errors (SQLx library errors)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Session store errors (loading, saving or cycling the session)
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Password hashing or hash parsing failed
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    /// A user-facing validation failure
    ///
    /// Handlers normally turn these into a re-rendered form; reaching
    /// `into_response` means a handler let one escape.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Internal server errors (500)
    ///
    /// Used for unexpected errors that shouldn't normally occur
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("Blocking task failed: {}", e))
    }
}

/// Convert AppError into an HTTP response
///
/// Infrastructure details are logged with `tracing::error!` and replaced by a
/// generic message in the body. Body format: `{ "error": "..." }`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            AppError::Session(e) => {
                tracing::error!("Session error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Session error".to_string())
            }
            AppError::Password(e) => {
                tracing::error!("Password error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Password error".to_string())
            }
            // Validation messages are written for the user, so they are safe to show
            AppError::Auth(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Internal(_) => {
                tracing::error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;
