use thiserror::Error;

/// Validation failures of the registration and login forms.
///
/// The `Display` text is shown to the visitor verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Username is required!")]
    UsernameRequired,

    #[error("Password is required!")]
    PasswordRequired,

    #[error("User {0} is already registered.")]
    AlreadyRegistered(String),

    #[error("Incorrect username")]
    IncorrectUsername,

    #[error("Incorrect password")]
    IncorrectPassword,
}
