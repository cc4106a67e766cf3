//! # Authentication Flow
//!
//! The operations behind the auth routes, kept free of HTTP types so they can
//! be exercised directly:
//!
//! - `register`: validate the form and create the user
//! - `authenticate`: check a username/password pair against the store
//! - `start_session`: bind a verified user to the visitor's session
//! - `load_current_user`: resolve the session's user id into a `CurrentUser`
//! - `end_session`: forget the visitor's identity
//!
//! Validation failures come back as `AppError::Auth` and never write anything.

use crate::auth::{AuthError, CurrentUser};
use crate::db::models::{NewUser, User};
use crate::db::users;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use serde::Deserialize;
use tower_sessions::{session, Session};

/// Session key holding the logged-in user's id
pub const USER_ID_KEY: &str = "user_id";

/// Fields submitted by the registration and login forms.
///
/// No `Debug` derive: the password must not end up in logs.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Create a new account.
///
/// Checks run in order and the first failure wins: empty username, empty
/// password, username taken. The password is hashed on the blocking pool.
pub async fn register(state: &AppState, credentials: &Credentials) -> AppResult<User> {
    if credentials.username.is_empty() {
        return Err(AuthError::UsernameRequired.into());
    }
    if credentials.password.is_empty() {
        return Err(AuthError::PasswordRequired.into());
    }
    if users::find_by_username(&state.db, &credentials.username)
        .await?
        .is_some()
    {
        return Err(AuthError::AlreadyRegistered(credentials.username.clone()).into());
    }

    let hasher = state.hasher;
    let password = credentials.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password)).await??;

    let new_user = NewUser::new(credentials.username.clone(), password_hash);
    let user = match users::create_user(&state.db, &new_user).await {
        Ok(user) => user,
        // Lost a race with a concurrent registration of the same name
        Err(AppError::Database(sqlx::Error::Database(e))) if e.is_unique_violation() => {
            return Err(AuthError::AlreadyRegistered(credentials.username.clone()).into());
        }
        Err(e) => return Err(e),
    };

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok(user)
}

/// Verify a username/password pair.
///
/// An unknown username and a wrong password are reported as different errors.
pub async fn authenticate(state: &AppState, credentials: &Credentials) -> AppResult<User> {
    let user = users::find_by_username(&state.db, &credentials.username)
        .await?
        .ok_or(AuthError::IncorrectUsername)?;

    let hasher = state.hasher;
    let password = credentials.password.clone();
    let stored_hash = user.password_hash.clone();
    let matches =
        tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash)).await??;

    if !matches {
        return Err(AuthError::IncorrectPassword.into());
    }

    Ok(user)
}

/// Replace whatever the session held with the given user's id.
///
/// The session id is rotated as well, so an id planted before login is
/// worthless afterwards.
pub async fn start_session(session: &Session, user: &User) -> AppResult<()> {
    session.clear().await;
    session.cycle_id().await?;
    session.insert(USER_ID_KEY, user.id).await?;

    tracing::info!(user_id = user.id, "Session started");

    Ok(())
}

/// Resolve the session's user id into the identity for this request.
///
/// Never fails because of what the visitor sent: a missing id, an id of the
/// wrong shape and an id whose user no longer exists all mean anonymous.
/// The last two are also removed from the session.
pub async fn load_current_user(state: &AppState, session: &Session) -> AppResult<CurrentUser> {
    let user_id = match session.get::<i64>(USER_ID_KEY).await {
        Ok(user_id) => user_id,
        Err(session::Error::SerdeJson(e)) => {
            tracing::warn!("Discarding unreadable session user id: {}", e);
            session.remove_value(USER_ID_KEY).await?;
            None
        }
        Err(e) => return Err(e.into()),
    };

    let Some(user_id) = user_id else {
        return Ok(CurrentUser::anonymous());
    };

    match users::find_by_id(&state.db, user_id).await? {
        Some(user) => Ok(CurrentUser::authenticated(user)),
        None => {
            tracing::debug!(user_id, "Session refers to a missing user, treating as anonymous");
            session.remove_value(USER_ID_KEY).await?;
            Ok(CurrentUser::anonymous())
        }
    }
}

/// Drop all session state. Safe to call on an already empty session.
pub async fn end_session(session: &Session) -> AppResult<()> {
    session.flush().await?;

    tracing::info!("Session ended");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::password::PasswordHasher;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    async fn test_state() -> AppState {
        AppState {
            db: test_pool().await,
            hasher: PasswordHasher::new(),
        }
    }

    fn auth_error(result: AppResult<User>) -> AuthError {
        match result {
            Err(AppError::Auth(e)) => e,
            Err(other) => panic!("expected a validation error, got {other:?}"),
            Ok(user) => panic!("expected a validation error, got user {}", user.username),
        }
    }

    #[tokio::test]
    async fn register_then_authenticate() {
        let state = test_state().await;
        let credentials = Credentials::new("alice", "wonderland");

        let registered = register(&state, &credentials).await.expect("registers");
        assert_ne!(registered.password_hash, "wonderland");

        let logged_in = authenticate(&state, &credentials).await.expect("logs in");
        assert_eq!(logged_in.id, registered.id);
    }

    #[tokio::test]
    async fn empty_username_is_reported_before_empty_password() {
        let state = test_state().await;

        let err = auth_error(register(&state, &Credentials::new("", "")).await);
        assert_eq!(err, AuthError::UsernameRequired);

        let err = auth_error(register(&state, &Credentials::new("", "pw")).await);
        assert_eq!(err, AuthError::UsernameRequired);

        let err = auth_error(register(&state, &Credentials::new("alice", "")).await);
        assert_eq!(err, AuthError::PasswordRequired);

        assert_eq!(users::count(&state.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn duplicate_registration_writes_nothing() {
        let state = test_state().await;
        register(&state, &Credentials::new("alice", "first")).await.unwrap();

        let err = auth_error(register(&state, &Credentials::new("alice", "second")).await);
        assert_eq!(err, AuthError::AlreadyRegistered("alice".into()));
        assert_eq!(err.to_string(), "User alice is already registered.");

        assert_eq!(users::count(&state.db).await.unwrap(), 1);
        // The first password still works, the second one was never stored
        authenticate(&state, &Credentials::new("alice", "first"))
            .await
            .expect("first password still valid");
    }

    #[tokio::test]
    async fn unknown_username_and_wrong_password_are_distinct() {
        let state = test_state().await;
        register(&state, &Credentials::new("alice", "wonderland"))
            .await
            .unwrap();

        let err = auth_error(authenticate(&state, &Credentials::new("bob", "wonderland")).await);
        assert_eq!(err, AuthError::IncorrectUsername);

        let err = auth_error(authenticate(&state, &Credentials::new("alice", "looking-glass")).await);
        assert_eq!(err, AuthError::IncorrectPassword);
    }

    #[tokio::test]
    async fn corrupt_stored_hash_is_not_a_validation_error() {
        let state = test_state().await;
        users::create_user(&state.db, &NewUser::new("mallory".into(), "garbage".into()))
            .await
            .unwrap();

        let result = authenticate(&state, &Credentials::new("mallory", "anything")).await;
        assert!(matches!(result, Err(AppError::Password(_))));
    }

    #[tokio::test]
    async fn unreadable_user_id_is_anonymous_and_removed() {
        let state = test_state().await;
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        session
            .insert(USER_ID_KEY, "not-a-number")
            .await
            .expect("session insert succeeds");

        let current = load_current_user(&state, &session)
            .await
            .expect("identity loading does not fail");

        assert!(current.is_anonymous());
        let remaining: Option<serde_json::Value> = session.get(USER_ID_KEY).await.unwrap();
        assert_eq!(remaining, None);
    }

    #[tokio::test]
    async fn stale_user_id_is_anonymous_and_removed() {
        let state = test_state().await;
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        session.insert(USER_ID_KEY, 42_i64).await.unwrap();

        let current = load_current_user(&state, &session).await.unwrap();

        assert!(current.is_anonymous());
        assert_eq!(session.get::<i64>(USER_ID_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn start_session_stores_the_user_id() {
        let state = test_state().await;
        let user = register(&state, &Credentials::new("alice", "wonderland"))
            .await
            .unwrap();
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        session.insert("leftover", "from before login").await.unwrap();

        start_session(&session, &user).await.unwrap();

        assert_eq!(session.get::<i64>(USER_ID_KEY).await.unwrap(), Some(user.id));
        assert_eq!(session.get::<String>("leftover").await.unwrap(), None);
        let current = load_current_user(&state, &session).await.unwrap();
        assert_eq!(current.user(), Some(&user));
    }
}
