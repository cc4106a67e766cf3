use crate::auth::{flow, CurrentUser};
use crate::error::AppError;
use crate::handlers::auth::LOGIN_PATH;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

/// Resolve the visitor's identity before any handler runs.
///
/// Layered over the whole router, so every route sees a `CurrentUser`.
pub async fn load_current_user(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let current_user = flow::load_current_user(&state, &session).await?;
    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Only let authenticated visitors through; send everyone else to the login form.
///
/// Apply with `route_layer` on the routes to guard. Relies on
/// `load_current_user` running first.
pub async fn login_required(current_user: CurrentUser, request: Request, next: Next) -> Response {
    if current_user.is_anonymous() {
        return Redirect::to(LOGIN_PATH).into_response();
    }

    next.run(request).await
}
