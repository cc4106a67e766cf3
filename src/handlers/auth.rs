use crate::auth::{flow, Credentials, CurrentUser};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views::{AuthForm, FormPage};
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use serde_json::{json, Value};
use tower_sessions::Session;

pub const LOGIN_PATH: &str = "/auth/login";
pub const LANDING_PATH: &str = "/";

// Registration endpoints

pub async fn register_form() -> FormPage {
    FormPage::new(AuthForm::Register)
}

pub async fn register(
    State(state): State<AppState>,
    Form(credentials): Form<Credentials>,
) -> AppResult<Response> {
    match flow::register(&state, &credentials).await {
        Ok(_) => Ok(Redirect::to(LOGIN_PATH).into_response()),
        Err(AppError::Auth(e)) => {
            tracing::debug!("Registration rejected: {}", e);
            Ok(FormPage::with_flash(AuthForm::Register, e.to_string()).into_response())
        }
        Err(e) => Err(e),
    }
}

// Login endpoints

pub async fn login_form() -> FormPage {
    FormPage::new(AuthForm::Login)
}

pub async fn login(
    session: Session,
    State(state): State<AppState>,
    Form(credentials): Form<Credentials>,
) -> AppResult<Response> {
    let user = match flow::authenticate(&state, &credentials).await {
        Ok(user) => user,
        Err(AppError::Auth(e)) => {
            tracing::debug!("Login rejected: {}", e);
            return Ok(FormPage::with_flash(AuthForm::Login, e.to_string()).into_response());
        }
        Err(e) => return Err(e),
    };

    flow::start_session(&session, &user).await?;

    Ok(Redirect::to(LANDING_PATH).into_response())
}

pub async fn logout(session: Session) -> AppResult<Redirect> {
    flow::end_session(&session).await?;

    Ok(Redirect::to(LANDING_PATH))
}

pub async fn session_info(current_user: CurrentUser) -> Json<Value> {
    match current_user.user() {
        Some(user) => Json(json!({
            "authenticated": true,
            "user_id": user.id,
            "username": user.username
        })),
        None => Json(json!({
            "authenticated": false
        })),
    }
}
