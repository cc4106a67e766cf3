//! # Authentication
//!
//! Username/password accounts with cookie sessions.
//!
//! ## Visitor lifecycle
//! A visitor starts anonymous. A successful login stores their user id in
//! the session and they become authenticated. Logging out, or the stored id
//! no longer matching a user, makes them anonymous again.
//!
//! ## Submodules
//! - `errors`: user-facing validation failures
//! - `current_user`: the request-scoped identity and its extractor
//! - `flow`: registration, login, identity loading and logout

pub mod current_user;
pub mod errors;
pub mod flow;

pub use current_user::CurrentUser;
pub use errors::AuthError;
pub use flow::{Credentials, USER_ID_KEY};
