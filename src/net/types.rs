//! Wire DTOs for the client/backend auth boundary.
//!
//! DESIGN
//! ======
//! Field names mirror the backend's login payloads (`login`, `senha`, `nome`,
//! `perfil`) through serde renames so the Rust side can use domain names.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Access profile attached to every account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Professor,
}

impl Role {
    #[cfg(test)]
    pub const ALL: [Role; 2] = [Role::Admin, Role::Professor];

    /// Wire label (`"ADMIN"` / `"PROFESSOR"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Professor => "PROFESSOR",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Login form submission sent to `POST /api/auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    #[serde(rename = "login")]
    pub login_name: String,
    #[serde(rename = "senha")]
    pub password: String,
}

impl Credentials {
    pub fn new(login_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self { login_name: login_name.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login_name", &self.login_name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The authenticated account as cached by the client.
///
/// Deserializes from the full login response body; the token fields are
/// ignored, which is how the stored `user` record is read back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend account id. Absent on some older payloads.
    #[serde(default)]
    pub id: Option<i64>,
    /// Display name.
    #[serde(rename = "nome", default)]
    pub name: String,
    /// Username typed on the login form.
    #[serde(rename = "login", default)]
    pub login_name: String,
    /// Access profile. Required: a record without a role is rejected.
    #[serde(rename = "perfil", alias = "role")]
    pub role: Role,
}

/// Body returned by a successful `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer credential. Validated as non-empty before the session accepts it.
    #[serde(default)]
    pub token: Option<String>,
    /// Token scheme, `"Bearer"` in practice.
    #[serde(rename = "tipo", default = "default_token_type")]
    pub token_type: String,
    #[serde(flatten)]
    pub user: User,
}

impl LoginResponse {
    /// The token, if present and not blank.
    pub fn valid_token(&self) -> Option<&str> {
        self.token.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

fn default_token_type() -> String {
    "Bearer".to_owned()
}
