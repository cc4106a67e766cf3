//! # Router Assembly
//!
//! Builds the complete Axum application: routes, the identity-loading
//! middleware, the route guard and the session layer.

use crate::config::Config;
use crate::handlers::auth::*;
use crate::handlers::health::health_check;
use crate::handlers::index::index;
use crate::handlers::users::get_current_user;
use crate::middleware::auth::{load_current_user, login_required};
use crate::state::AppState;
use anyhow::Result;
use axum::{middleware as axum_middleware, routing::get, Router};
use time::Duration;
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

/// Name of the session cookie
pub const SESSION_COOKIE_NAME: &str = "session";

/// Build the router around prepared state and a migrated session store.
///
/// Layer order matters: layers wrap everything added before them, so the
/// session layer runs before `load_current_user`, which in turn runs before
/// any route (including `login_required` on the guarded ones).
pub fn app(state: AppState, session_store: SqliteStore, config: &Config) -> Result<Router> {
    // The cookie only carries the signed session id; the record lives in SQLite
    let session_layer = SessionManagerLayer::new(session_store)
        .with_name(SESSION_COOKIE_NAME)
        .with_secure(config.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::hours(config.session_ttl_hours)))
        .with_signed(config.session_key()?);

    // Routes that require a logged-in user
    let protected_routes: Router<AppState> = Router::new()
        .route("/users/me", get(get_current_user))
        .route_layer(axum_middleware::from_fn(login_required));

    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/auth/register", get(register_form).post(register))
        .route("/auth/login", get(login_form).post(login))
        .route("/auth/logout", get(logout))
        .route("/auth/session", get(session_info))
        .merge(protected_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            load_current_user,
        ))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}
