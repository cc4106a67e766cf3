//! # Configuration Management
//!
//! This module handles loading configuration from environment variables.
//! It uses the "12-factor app" methodology where configuration comes from the environment.
//!
//! ## Environment Variables
//! - `HOST`: Server bind address (default: 127.0.0.1)
//! - `PORT`: Server port (default: 8080)
//! - `DATABASE_URL`: SQLite database connection string
//! - `SECRET_KEY`: Key used to sign the session cookie (at least 64 bytes)
//! - `SESSION_TTL_HOURS`: Hours of inactivity before a session expires (default: 24)
//! - `SECURE_COOKIES`: Whether the session cookie is marked `Secure` (default: false)

use anyhow::{bail, Result};
use secrecy::{ExposeSecret, SecretString};
use std::env;
use tower_sessions::cookie::Key;

/// Minimum length of `SECRET_KEY`, imposed by the cookie signing key derivation.
const MIN_SECRET_KEY_LEN: usize = 64;

/// Application configuration
///
/// Holds every value needed to run the server. All fields are public so tests
/// can build a `Config` directly without touching the process environment.
///
/// `Debug` is safe to log: the secret key is wrapped in `SecretString`,
/// which prints as `[REDACTED]`.
#[derive(Debug)]
pub struct Config {
    /// Server host/IP address to bind to
    /// Examples: "127.0.0.1" (localhost only), "0.0.0.0" (all interfaces)
    pub host: String,

    /// Server port number (1-65535)
    /// Default: 8080
    pub port: u16,

    /// SQLite database connection URL
    /// Format: "sqlite:filename.db?mode=rwc"
    /// The "mode=rwc" means: read, write, create if not exists
    pub database_url: String,

    /// Key material for signing the session cookie
    ///
    /// When absent a random key is generated at startup, so every restart
    /// logs all visitors out.
    pub secret_key: Option<SecretString>,

    /// Sessions expire after this many hours without a request
    pub session_ttl_hours: i64,

    /// Mark the session cookie `Secure` (only sent over HTTPS)
    pub secure_cookies: bool,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// 1. Loads variables from a `.env` file if one exists
    /// 2. Reads each value, falling back to development defaults
    /// 3. Fails if a value is present but cannot be parsed
    ///
    /// ## Example .env file
    /// ```text
    /// HOST=127.0.0.1
    /// PORT=8080
    /// DATABASE_URL=sqlite:blog.db?mode=rwc
    /// SECRET_KEY=<at least 64 random characters>
    /// SESSION_TTL_HOURS=24
    /// SECURE_COOKIES=false
    /// ```
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),

            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,

            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:blog.db?mode=rwc".to_string()),

            secret_key: env::var("SECRET_KEY").ok().map(SecretString::from),

            session_ttl_hours: env::var("SESSION_TTL_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()?,

            secure_cookies: env::var("SECURE_COOKIES")
                .unwrap_or_else(|_| "false".to_string())
                .parse()?,
        })
    }

    /// Get the socket address to bind the server to
    ///
    /// Example: "127.0.0.1:8080"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Build the key that signs the session cookie
    ///
    /// A configured `SECRET_KEY` shorter than 64 bytes is rejected rather than
    /// padded.
    pub fn session_key(&self) -> Result<Key> {
        match &self.secret_key {
            Some(secret) => {
                let bytes = secret.expose_secret().as_bytes();
                if bytes.len() < MIN_SECRET_KEY_LEN {
                    bail!(
                        "SECRET_KEY must be at least {} bytes, got {}",
                        MIN_SECRET_KEY_LEN,
                        bytes.len()
                    );
                }
                Ok(Key::from(bytes))
            }
            None => {
                tracing::warn!("SECRET_KEY not set, sessions will not survive a restart");
                Ok(Key::generate())
            }
        }
    }
}
