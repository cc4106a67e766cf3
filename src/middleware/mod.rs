//! # Middleware Module
//!
//! Middleware functions run before (or after) route handlers. They can
//! inspect or extend the request, or short-circuit it before the handler runs.
//!
//! ## Our Middleware
//! - `auth::load_current_user`: attaches the visitor's `CurrentUser` to every request
//! - `auth::login_required`: redirects anonymous visitors to the login form

pub mod auth;
