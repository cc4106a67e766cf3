//! # Blog Authentication Server
//!
//! Username/password registration and login for a small blog, with the
//! visitor's identity kept in a signed session cookie.
//!
//! ## Modules
//! - `app`: assembles the router and its layers
//! - `auth`: registration, login, identity loading and logout
//! - `config`: environment-based configuration
//! - `db`: the `users` table
//! - `error`: application error type and its HTTP mapping
//! - `handlers`: route handlers
//! - `middleware`: identity loading and the login guard
//! - `password`: Argon2 hashing
//! - `state`: shared application state
//! - `views`: HTML for the forms and landing page

pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod password;
pub mod state;
pub mod views;
