//! # Blog Authentication Server
//!
//! Entry point: registration, login and logout for a small blog, with
//! identity carried in a signed session cookie.

use blog_auth_server::app::app;
use blog_auth_server::config::Config;
use blog_auth_server::state::AppState;
use tower_sessions::ExpiredDeletion;
use tower_sessions_sqlx_store::SqliteStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main application entry point
///
/// 1. Sets up logging
/// 2. Loads configuration from environment variables
/// 3. Connects to the database and creates the `users` table
/// 4. Prepares the session store and its expiry cleanup task
/// 5. Builds the router and starts the HTTP server
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default: info level for most crates, debug level for this one.
    // Can be overridden with RUST_LOG.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,blog_auth_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded: {:?}", config);

    let app_state = AppState::new(&config).await?;
    tracing::info!("Application state initialized");

    // Session records live in the same SQLite database as the users
    let session_store = SqliteStore::new(app_state.db.clone());
    session_store.migrate().await?;

    // Expired sessions are only rejected on read; this removes them from disk
    let cleanup_store = session_store.clone();
    tokio::spawn(async move {
        tracing::debug!("Starting expired session cleanup task");
        if let Err(e) = cleanup_store
            .continuously_delete_expired(tokio::time::Duration::from_secs(600))
            .await
        {
            tracing::error!("Session cleanup failed: {:?}", e);
        }
    });

    let app = app(app_state, session_store, &config)?;

    let bind_addr = config.bind_address();
    tracing::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
