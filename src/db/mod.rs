//! # Database Module
//!
//! - `models`: Row types (`User`, `NewUser`)
//! - `users`: Queries against the `users` table
//!
//! The session table is owned by `tower-sessions-sqlx-store` and is not
//! touched from here.

pub mod models;
pub mod users;

use sqlx::migrate::MigrateError;
use sqlx::SqlitePool;

/// Create the tables this crate owns if they do not exist yet.
pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Single-connection in-memory pool with the schema applied.
///
/// Every connection to `sqlite::memory:` gets its own database, so the pool
/// is pinned to one connection that is never recycled.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite opens");
    migrate(&pool).await.expect("migrations apply");
    pool
}
