//! Reactive session context shared by routes, pages, and the navbar.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` provides one [`SessionContext`]; everything that needs the current
//! user reads it with `expect_context`. The context pairs the session signal
//! with the durable store so every mutation keeps memory and storage in step.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::future::Future;
use std::time::Duration;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::error::AuthError;
use crate::net::api::AuthBackend;
use crate::net::types::{Credentials, LoginResponse, Role, User};
use crate::routes;
use crate::state::session::{self, AuthDecision, LoginGate, SessionPhase, SessionState};
use crate::util::navigation::hard_reset;
use crate::util::poll::PollHandle;
use crate::util::storage::{BrowserStore, KeyValueStore};

/// Session signal plus the store it mirrors into.
#[derive(Clone, Copy, Debug)]
pub struct SessionContext<S = BrowserStore> {
    pub state: RwSignal<SessionState>,
    pub store: S,
}

impl<S> SessionContext<S>
where
    S: KeyValueStore + Clone + Send + Sync + 'static,
{
    /// A context in the `Hydrating` phase.
    pub fn new(store: S) -> Self {
        Self { state: RwSignal::new(SessionState::hydrating()), store }
    }

    pub fn hydrate(&self) {
        self.state.update(|s| s.hydrate(&self.store));
    }

    /// Tracked read of the session phase.
    pub fn phase(&self) -> SessionPhase {
        self.state.with(SessionState::phase)
    }

    /// Tracked read of the access decision for a view.
    pub fn decide(&self, required_role: Option<Role>) -> AuthDecision {
        self.state.with(|s| s.decide(&self.store, required_role))
    }

    /// Access decision for a view, logging out on `RedirectToLogin`.
    ///
    /// Subscribers are only notified when the logout cleared something.
    /// A disposed context never renders, so it reports `Pending`.
    pub fn authorize(&self, required_role: Option<Role>) -> AuthDecision {
        self.state
            .try_maybe_update(|s| {
                let had_session = s.user.is_some() || s.token.is_some();
                let decision = s.authorize(&self.store, required_role);
                (had_session && decision == AuthDecision::RedirectToLogin, decision)
            })
            .unwrap_or(AuthDecision::Pending)
    }

    /// Tracked read of the login-page gate.
    pub fn login_gate(&self) -> LoginGate {
        self.state.with(|s| s.login_gate(&self.store))
    }

    /// Submit `credentials` to `backend` and install the resulting session.
    ///
    /// # Errors
    ///
    /// See [`SessionState::apply_login`].
    pub async fn login<B: AuthBackend>(&self, backend: &B, credentials: &Credentials) -> Result<User, AuthError> {
        let outcome = backend.login(credentials).await;
        self.apply_login(outcome)
    }

    /// # Errors
    ///
    /// Propagates [`SessionState::apply_login`] failures.
    pub fn apply_login(&self, outcome: Result<LoginResponse, AuthError>) -> Result<User, AuthError> {
        self.state
            .try_update(|s| s.apply_login(&self.store, outcome))
            .unwrap_or(Err(AuthError::InvalidCredentials))
    }

    /// Clear the session. Subscribers are only notified if something changed.
    pub fn logout(&self) {
        self.state.maybe_update(|s| s.logout(&self.store));
    }

    /// User-initiated logout: clear the session, then reload the app at
    /// `/login` so nothing from this account stays in memory.
    ///
    /// Expiry and guard redirects stay inside the router; only an explicit
    /// logout pays for a full reload.
    pub fn logout_and_reset(&self) {
        self.logout();
        hard_reset(routes::LOGIN);
    }

    /// One validity tick. Returns `true` if the session was just expired.
    pub fn check_validity(&self) -> bool {
        let expired = self.state.with_untracked(|s| s.user.is_some() && !session::is_authenticated(&self.store));
        if expired {
            self.state.update(|s| {
                s.check_validity(&self.store);
            });
        }
        expired
    }
}

fn replace_navigation() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// What to do after the session's active flag changed.
#[derive(Debug)]
enum PollStep {
    Idle,
    /// The session expired on the immediate check; go to `/login`.
    Expired,
    /// Start a loop owning this handle.
    Start(PollHandle),
}

/// Cancel the poll in `slot` and, for an active session, check once and
/// hand out a fresh handle for the next loop.
fn restart_poll<S>(session: &SessionContext<S>, slot: &mut Option<PollHandle>, active: bool) -> PollStep
where
    S: KeyValueStore + Clone + Send + Sync + 'static,
{
    if let Some(previous) = slot.take() {
        previous.cancel();
    }
    if !active {
        return PollStep::Idle;
    }
    if session.check_validity() {
        return PollStep::Expired;
    }
    let handle = PollHandle::new();
    *slot = Some(handle.clone());
    PollStep::Start(handle)
}

/// Poll token validity every `interval` while a user is signed in.
///
/// The poll starts when a session becomes active, checks once immediately,
/// and is cancelled when the session clears or the owning scope is cleaned
/// up. On expiry the session is logged out and `navigate` goes to `/login`.
pub fn install_validity_poll<S, F>(session: SessionContext<S>, interval: Duration, navigate: F)
where
    S: KeyValueStore + Copy + Send + Sync + 'static,
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let active = Memo::new(move |_| matches!(session.phase(), SessionPhase::Authenticated(_)));
    let current = StoredValue::new(None::<PollHandle>);

    Effect::new(move || {
        let active = active.get();
        match current.try_update_value(|slot| restart_poll(&session, slot, active)) {
            Some(PollStep::Expired) => navigate(routes::LOGIN, replace_navigation()),
            Some(PollStep::Start(handle)) => spawn_poll_loop(session, interval, handle, navigate.clone()),
            Some(PollStep::Idle) | None => {}
        }
    });

    on_cleanup(move || {
        current.with_value(|slot| {
            if let Some(handle) = slot {
                handle.cancel();
            }
        });
    });
}

/// The validity loop: wait with `sleep`, stop once `handle` is cancelled,
/// and on expiry log out, navigate to `/login`, and stop.
pub async fn run_validity_poll<S, F, W, Fut>(session: SessionContext<S>, handle: PollHandle, mut sleep: W, navigate: F)
where
    S: KeyValueStore + Clone + Send + Sync + 'static,
    F: Fn(&str, NavigateOptions),
    W: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    loop {
        sleep().await;
        if !handle.is_alive() {
            break;
        }
        log::debug!("session: validity tick");
        if session.check_validity() {
            handle.cancel();
            navigate(routes::LOGIN, replace_navigation());
            break;
        }
    }
}

#[cfg(feature = "csr")]
fn spawn_poll_loop<S, F>(session: SessionContext<S>, interval: Duration, handle: PollHandle, navigate: F)
where
    S: KeyValueStore + Copy + Send + Sync + 'static,
    F: Fn(&str, NavigateOptions) + 'static,
{
    leptos::task::spawn_local(run_validity_poll(
        session,
        handle,
        move || gloo_timers::future::sleep(interval),
        navigate,
    ));
}

#[cfg(not(feature = "csr"))]
fn spawn_poll_loop<S, F>(session: SessionContext<S>, interval: Duration, handle: PollHandle, navigate: F)
where
    S: KeyValueStore + Copy + Send + Sync + 'static,
    F: Fn(&str, NavigateOptions) + 'static,
{
    let _ = (session, handle, navigate);
    log::debug!("session: validity poll every {interval:?} needs a browser timer; not started");
}
