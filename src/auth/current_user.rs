//! # Current User
//!
//! The visitor's identity for one request, and the extractor handlers use to
//! read it.

use crate::db::models::User;
use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

/// Identity of the visitor making the current request.
///
/// Computed once per request by the `load_current_user` middleware and stored
/// in the request extensions. Handlers and the `login_required` guard read it
/// with this extractor. A request that never passed through the middleware
/// is treated as anonymous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentUser(Option<User>);

impl CurrentUser {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn authenticated(user: User) -> Self {
        Self(Some(user))
    }

    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }

    pub fn is_anonymous(&self) -> bool {
        self.0.is_none()
    }

    pub fn into_user(self) -> Option<User> {
        self.0
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .unwrap_or_default())
    }
}
