//! Session state for the current browser user and the access policy over it.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`SessionState`] lives in a reactive signal provided through context.
//! Route guards, the login page, the navbar, and the validity poll all read
//! and mutate it through the methods here, passing the durable store in
//! explicitly so the whole policy runs without a browser.
//!
//! STATE MACHINE
//! =============
//! `Hydrating -> {Unauthenticated, Authenticated(role)}`. Authenticated drops
//! back to Unauthenticated on logout, on a failed validity check, or when
//! `authorize` finds the token and user record out of sync. The only way back
//! up is a successful login.
//!
//! STORAGE PAIRING
//! ===============
//! `token` and `user` are written together on login and removed together on
//! logout. Seeing one without the other is treated as logged out.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::error::AuthError;
use crate::net::types::{LoginResponse, Role, User};
use crate::routes;
use crate::util::storage::{KeyValueStore, TOKEN_KEY, USER_KEY};

/// Coarse lifecycle phase derived from [`SessionState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Hydrating,
    Unauthenticated,
    Authenticated(Role),
}

/// Outcome of checking a protected view against the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthDecision {
    /// Hydration has not finished; render a transient "checking" state.
    Pending,
    Allow,
    RedirectToLogin,
    /// Authenticated, but the view needs another role. Carries the user's
    /// own role, whose home is the redirect target.
    RedirectToRoleHome(Role),
}

impl AuthDecision {
    /// Navigation target, if the decision is a redirect.
    pub fn redirect_path(self) -> Option<&'static str> {
        match self {
            AuthDecision::RedirectToLogin => Some(routes::LOGIN),
            AuthDecision::RedirectToRoleHome(role) => Some(routes::role_home(role)),
            AuthDecision::Pending | AuthDecision::Allow => None,
        }
    }
}

/// What the login page should do with the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginGate {
    Pending,
    ShowForm,
    /// Already signed in; skip the form and go to this role's home.
    RedirectToRoleHome(Role),
}

/// True iff a non-empty token is in durable storage.
///
/// Local and synchronous: it gates rendering before any network round-trip.
/// An unreadable store counts as no token.
pub fn is_authenticated<S: KeyValueStore + ?Sized>(store: &S) -> bool {
    store.get(TOKEN_KEY).is_some_and(|t| !t.trim().is_empty())
}

/// Authentication state tracking the current user, token, and hydration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub loading: bool,
}

impl SessionState {
    /// Initial state at startup, before storage has been read.
    pub fn hydrating() -> Self {
        Self { user: None, token: None, loading: true }
    }

    /// Leave `Hydrating`, restoring whatever session storage holds.
    ///
    /// A token whose user record is missing or unreadable is kept with an
    /// empty user; [`SessionState::authorize`] clears that case.
    pub fn hydrate<S: KeyValueStore + ?Sized>(&mut self, store: &S) {
        self.loading = false;
        if !is_authenticated(store) {
            self.user = None;
            self.token = None;
            log::debug!("session: hydrated without token");
            return;
        }
        self.token = store.get(TOKEN_KEY);
        self.user = store.get(USER_KEY).and_then(|raw| match serde_json::from_str::<User>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("session: stored user record unreadable: {e}");
                None
            }
        });
        match &self.user {
            Some(user) => log::info!("session: restored {} ({})", user.login_name, user.role),
            None => log::warn!("session: token present without user record"),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            return SessionPhase::Hydrating;
        }
        match (&self.user, &self.token) {
            (Some(user), Some(_)) => SessionPhase::Authenticated(user.role),
            _ => SessionPhase::Unauthenticated,
        }
    }

    pub fn current_role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    /// Install the outcome of a backend login call.
    ///
    /// All-or-nothing: on any error neither memory nor storage changes.
    /// Storage is written only after the response carries a usable token.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidCredentials`] if the backend failed or returned no token.
    /// - [`AuthError::Storage`] if the session could not be persisted.
    pub fn apply_login<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &S,
        outcome: Result<LoginResponse, AuthError>,
    ) -> Result<User, AuthError> {
        let mut response = outcome.inspect_err(|e| log::warn!("session: login failed: {e}"))?;
        let Some(token) = response.valid_token().map(str::to_owned) else {
            log::warn!("session: login response without token");
            return Err(AuthError::InvalidCredentials);
        };
        // The stored record carries the same trimmed token as the `token` key.
        response.token = Some(token.clone());
        let record = serde_json::to_string(&response).map_err(|e| AuthError::Storage(e.to_string()))?;

        let previous = (store.get(TOKEN_KEY), store.get(USER_KEY));
        if let Err(e) = store.set(TOKEN_KEY, &token).and_then(|()| store.set(USER_KEY, &record)) {
            log::warn!("session: persisting login failed: {e}");
            restore_raw(store, previous);
            return Err(AuthError::Storage(e.to_string()));
        }

        log::info!("session: logged in {} ({})", response.user.login_name, response.user.role);
        self.user = Some(response.user.clone());
        self.token = Some(token);
        self.loading = false;
        Ok(response.user)
    }

    /// Clear memory and storage. Idempotent.
    ///
    /// Returns whether the in-memory state changed, so reactive callers can
    /// skip notifying subscribers when nothing happened.
    pub fn logout<S: KeyValueStore + ?Sized>(&mut self, store: &S) -> bool {
        clear_store(store);
        let changed = self.user.is_some() || self.token.is_some();
        if changed {
            log::info!("session: logged out");
        }
        self.user = None;
        self.token = None;
        changed
    }

    /// Evaluate the access policy for a view needing `required_role`
    /// without side effects.
    pub fn decide<S: KeyValueStore + ?Sized>(&self, store: &S, required_role: Option<Role>) -> AuthDecision {
        if self.loading {
            return AuthDecision::Pending;
        }
        if !is_authenticated(store) {
            return AuthDecision::RedirectToLogin;
        }
        let Some(user) = &self.user else {
            return AuthDecision::RedirectToLogin;
        };
        match required_role {
            Some(required) if required != user.role => AuthDecision::RedirectToRoleHome(user.role),
            _ => AuthDecision::Allow,
        }
    }

    /// [`SessionState::decide`], then log out on `RedirectToLogin` so stale
    /// halves of a session never linger.
    pub fn authorize<S: KeyValueStore + ?Sized>(&mut self, store: &S, required_role: Option<Role>) -> AuthDecision {
        let decision = self.decide(store, required_role);
        if decision == AuthDecision::RedirectToLogin {
            self.logout(store);
        }
        decision
    }

    /// Decide whether the login page should render its form.
    pub fn login_gate<S: KeyValueStore + ?Sized>(&self, store: &S) -> LoginGate {
        match self.decide(store, None) {
            AuthDecision::Pending => LoginGate::Pending,
            AuthDecision::Allow => self.current_role().map_or(LoginGate::ShowForm, LoginGate::RedirectToRoleHome),
            AuthDecision::RedirectToLogin | AuthDecision::RedirectToRoleHome(_) => LoginGate::ShowForm,
        }
    }

    /// One validity poll tick. Logs out and returns `true` when a user is
    /// still cached but storage no longer holds a token.
    pub fn check_validity<S: KeyValueStore + ?Sized>(&mut self, store: &S) -> bool {
        if self.user.is_none() || is_authenticated(store) {
            return false;
        }
        log::info!("session: token no longer valid");
        self.logout(store);
        true
    }
}

fn clear_store<S: KeyValueStore + ?Sized>(store: &S) {
    store.remove(TOKEN_KEY);
    store.remove(USER_KEY);
}

/// Put back the raw `token`/`user` values captured before a failed write.
/// Falls back to clearing both if the pair cannot be restored intact.
fn restore_raw<S: KeyValueStore + ?Sized>(store: &S, previous: (Option<String>, Option<String>)) {
    let restored = [(TOKEN_KEY, previous.0), (USER_KEY, previous.1)].into_iter().try_for_each(|(key, value)| {
        match value {
            Some(value) => store.set(key, &value),
            None => {
                store.remove(key);
                Ok(())
            }
        }
    });
    if restored.is_err() {
        clear_store(store);
    }
}
