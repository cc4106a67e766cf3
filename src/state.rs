//! # Application State
//!
//! Shared resources handed to every request handler through Axum's `State`
//! extractor. Axum clones the state per request, which is cheap: the pool is
//! reference counted internally and the hasher is a zero-sized value.

use crate::config::Config;
use crate::db;
use crate::password::PasswordHasher;
use anyhow::Result;
use sqlx::sqlite::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    ///
    /// Holds the `users` table. The session store shares the same pool.
    pub db: SqlitePool,

    /// Password hasher used by registration and login
    pub hasher: PasswordHasher,
}

impl AppState {
    /// Connect to the database and create the `users` table if needed.
    ///
    /// # Errors
    /// Returns an error if the connection or the migration fails.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = SqlitePool::connect(&config.database_url).await?;

        db::migrate(&db).await?;

        Ok(AppState::with_pool(db))
    }

    /// Build state around an already prepared pool.
    pub fn with_pool(db: SqlitePool) -> Self {
        AppState {
            db,
            hasher: PasswordHasher::new(),
        }
    }
}
