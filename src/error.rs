//! Error types surfaced by the session guard and its collaborators.
//!
//! ERROR HANDLING
//! ==============
//! Login failures collapse into one user-facing variant so the form never
//! distinguishes "wrong password" from "server unreachable". Expiry and
//! inconsistent storage are state transitions, not errors.

/// Failure of a login attempt.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Backend rejected the credentials, the request failed, or the response
    /// lacked a usable token.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// Credentials were accepted but the session could not be persisted.
    #[error("could not persist session: {0}")]
    Storage(String),
}

impl AuthError {
    /// Message shown on the login form.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "Invalid credentials. Try again.",
            AuthError::Storage(_) => "Could not save your session. Try again.",
        }
    }
}
