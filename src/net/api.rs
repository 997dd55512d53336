//! REST client for the backend auth endpoint.
//!
//! Browser builds (`csr`): real HTTP calls via `gloo-net`.
//! Other builds: the request is never sent and login reports invalid
//! credentials, which keeps the session guard testable without a network.
//!
//! ERROR HANDLING
//! ==============
//! Every failure mode (transport, non-2xx, undecodable body) maps to
//! [`AuthError::InvalidCredentials`]. The underlying cause is only logged.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{Credentials, LoginResponse};
use crate::error::AuthError;

/// The backend half of a login.
///
/// Implementations only talk to the network; validating the token and
/// persisting the session is the guard's job.
#[allow(async_fn_in_trait)]
pub trait AuthBackend {
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on rejection or transport failure.
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError>;
}

/// `POST {base_url}/api/auth/login` over `fetch`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpAuthBackend {
    base_url: String,
}

impl HttpAuthBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn login_endpoint(&self) -> String {
        login_endpoint(&self.base_url)
    }
}

fn login_endpoint(base_url: &str) -> String {
    format!("{}/api/auth/login", base_url.trim_end_matches('/'))
}

#[cfg(any(test, feature = "csr"))]
fn login_rejected_message(status: u16) -> String {
    format!("login rejected: {status}")
}

impl AuthBackend for HttpAuthBackend {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError> {
        #[cfg(feature = "csr")]
        {
            let url = self.login_endpoint();
            let resp = gloo_net::http::Request::post(&url)
                .json(credentials)
                .map_err(|e| {
                    log::warn!("login: encode request: {e}");
                    AuthError::InvalidCredentials
                })?
                .send()
                .await
                .map_err(|e| {
                    log::warn!("login: transport: {e}");
                    AuthError::InvalidCredentials
                })?;
            if !resp.ok() {
                log::warn!("{}", login_rejected_message(resp.status()));
                return Err(AuthError::InvalidCredentials);
            }
            resp.json::<LoginResponse>().await.map_err(|e| {
                log::warn!("login: decode response: {e}");
                AuthError::InvalidCredentials
            })
        }
        #[cfg(not(feature = "csr"))]
        {
            log::debug!("login for {} skipped outside the browser", credentials.login_name);
            Err(AuthError::InvalidCredentials)
        }
    }
}
