//! # HTTP Request Handlers
//!
//! Each handler processes one route.
//!
//! ## Submodules
//! - `health`: Health check endpoint (for monitoring)
//! - `auth`: Register, login, logout and session info
//! - `index`: Landing page
//! - `users`: Current user profile (login required)
//!
//! ## Handler Pattern
//! Handlers are async functions that:
//! 1. Extract data from the request (form body, session, `CurrentUser`)
//! 2. Call into `auth::flow` or the database
//! 3. Return a response (redirect, HTML page, JSON)

pub mod auth;
pub mod health;
pub mod index;
pub mod users;
