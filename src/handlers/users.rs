//! # User Handlers
//!
//! Handlers for user-related operations.
//! Currently only has endpoint for getting current user profile.

use crate::auth::CurrentUser;
use crate::error::{AppError, AppResult};
use axum::Json;
use serde_json::{json, Value};

/// Get current authenticated user's profile
///
/// ## Route
/// GET /users/me
///
/// ## Authentication
/// Guarded by the `login_required` middleware; anonymous visitors are
/// redirected to the login form before this handler runs.
///
/// ## Response
/// ```json
/// {
///   "id": 1,
///   "username": "alice",
///   "created_at": "2024-01-15T10:30:00+00:00"
/// }
/// ```
///
/// The password hash is never part of the response.
pub async fn get_current_user(current_user: CurrentUser) -> AppResult<Json<Value>> {
    let user = current_user.into_user().ok_or_else(|| {
        AppError::Internal("Guarded route reached without a logged-in user".to_string())
    })?;

    Ok(Json(json!(user)))
}
