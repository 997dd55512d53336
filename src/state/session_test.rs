use std::time::Duration;

use futures::executor::block_on;

use super::*;
use crate::net::api::AuthBackend;
use crate::net::types::Credentials;
use crate::config::DEFAULT_POLL_INTERVAL_SECS;
use crate::util::storage::MemoryStore;

// =============================================================
// Helpers
// =============================================================

struct ScriptedBackend(Result<serde_json::Value, AuthError>);

impl AuthBackend for ScriptedBackend {
    async fn login(&self, _credentials: &Credentials) -> Result<LoginResponse, AuthError> {
        let body = self.0.clone()?;
        serde_json::from_value(body).map_err(|_| AuthError::InvalidCredentials)
    }
}

fn accepts(body: serde_json::Value) -> ScriptedBackend {
    ScriptedBackend(Ok(body))
}

fn rejects() -> ScriptedBackend {
    ScriptedBackend(Err(AuthError::InvalidCredentials))
}

fn creds() -> Credentials {
    Credentials::new("prof1", "x")
}

/// Backend round-trip followed by `apply_login`, as the login page does it.
fn login(state: &mut SessionState, backend: &ScriptedBackend, store: &MemoryStore) -> Result<User, AuthError> {
    let outcome = block_on(backend.login(&creds()));
    state.apply_login(store, outcome)
}

fn response_for(role: Role) -> serde_json::Value {
    serde_json::json!({
        "token": format!("tok-{}", role.as_str().to_lowercase()),
        "tipo": "Bearer",
        "id": 1,
        "nome": "Someone",
        "login": format!("{}1", role.as_str().to_lowercase()),
        "perfil": role.as_str(),
    })
}

fn logged_in(role: Role) -> (SessionState, MemoryStore) {
    let store = MemoryStore::new();
    let mut state = SessionState::hydrating();
    state.hydrate(&store);
    login(&mut state, &accepts(response_for(role)), &store).unwrap();
    (state, store)
}

fn snapshot(store: &MemoryStore) -> (Option<String>, Option<String>) {
    (store.get(TOKEN_KEY), store.get(USER_KEY))
}

// =============================================================
// Hydration
// =============================================================

#[test]
fn hydrating_state_is_pending() {
    let store = MemoryStore::new();
    let state = SessionState::hydrating();
    assert_eq!(state.phase(), SessionPhase::Hydrating);
    assert_eq!(state.decide(&store, Some(Role::Admin)), AuthDecision::Pending);
    assert_eq!(state.login_gate(&store), LoginGate::Pending);
}

#[test]
fn hydrate_without_token_is_unauthenticated() {
    let store = MemoryStore::new();
    let mut state = SessionState::hydrating();
    state.hydrate(&store);
    assert!(!state.loading);
    assert_eq!(state.phase(), SessionPhase::Unauthenticated);
    assert_eq!(state.login_gate(&store), LoginGate::ShowForm);
}

#[test]
fn hydrate_restores_stored_session() {
    let (_, store) = logged_in(Role::Admin);

    let mut reloaded = SessionState::hydrating();
    reloaded.hydrate(&store);
    assert_eq!(reloaded.phase(), SessionPhase::Authenticated(Role::Admin));
    assert_eq!(reloaded.token.as_deref(), Some("tok-admin"));
    assert_eq!(reloaded.user.as_ref().map(|u| u.login_name.as_str()), Some("admin1"));
}

#[test]
fn hydrate_token_without_user_record_is_cleared_by_authorize() {
    let store = MemoryStore::new();
    store.set(TOKEN_KEY, "orphan").unwrap();

    let mut state = SessionState::hydrating();
    state.hydrate(&store);
    assert_eq!(state.token.as_deref(), Some("orphan"));
    assert!(state.user.is_none());
    assert_eq!(state.phase(), SessionPhase::Unauthenticated);

    assert_eq!(state.authorize(&store, Some(Role::Professor)), AuthDecision::RedirectToLogin);
    assert!(state.token.is_none());
    assert!(!is_authenticated(&store));
}

#[test]
fn hydrate_unreadable_user_record_leaves_user_empty() {
    let store = MemoryStore::new();
    store.set(TOKEN_KEY, "abc").unwrap();
    store.set(USER_KEY, "{not json").unwrap();

    let mut state = SessionState::hydrating();
    state.hydrate(&store);
    assert!(state.user.is_none());
    assert_eq!(state.decide(&store, None), AuthDecision::RedirectToLogin);
}

// =============================================================
// Login
// =============================================================

#[test]
fn login_happy_path_professor() {
    let store = MemoryStore::new();
    let mut state = SessionState::hydrating();
    state.hydrate(&store);

    let backend = accepts(serde_json::json!({"token": "abc", "role": "PROFESSOR", "nome": "Ana"}));
    let user = login(&mut state, &backend, &store).unwrap();

    assert_eq!(user.name, "Ana");
    assert_eq!(state.current_role(), Some(Role::Professor));
    assert_eq!(state.authorize(&store, Some(Role::Professor)), AuthDecision::Allow);
    let redirect = state.authorize(&store, Some(Role::Admin));
    assert_eq!(redirect, AuthDecision::RedirectToRoleHome(Role::Professor));
    assert_eq!(redirect.redirect_path(), Some("/professor/avaliacoes"));
}

#[test]
fn login_writes_token_and_full_response_together() {
    let (state, store) = logged_in(Role::Professor);
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("tok-professor"));

    let record: serde_json::Value = serde_json::from_str(&store.get(USER_KEY).unwrap()).unwrap();
    assert_eq!(record["token"], "tok-professor");
    assert_eq!(record["perfil"], "PROFESSOR");
    assert_eq!(record["tipo"], "Bearer");
    assert_eq!(state.token.as_deref(), Some("tok-professor"));
}

#[test]
fn login_stores_the_trimmed_token_in_both_keys() {
    let store = MemoryStore::new();
    let mut state = SessionState::default();
    let backend = accepts(serde_json::json!({"token": "  abc  ", "perfil": "ADMIN"}));
    login(&mut state, &backend, &store).unwrap();

    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc"));
    let record: serde_json::Value = serde_json::from_str(&store.get(USER_KEY).unwrap()).unwrap();
    assert_eq!(record["token"], "abc");
    assert_eq!(state.token.as_deref(), Some("abc"));
}

#[test]
fn failed_login_changes_nothing() {
    let (mut state, store) = logged_in(Role::Admin);
    let before_state = state.clone();
    let before_store = snapshot(&store);

    let result = login(&mut state, &rejects(), &store);

    assert_eq!(result, Err(AuthError::InvalidCredentials));
    assert_eq!(state, before_state);
    assert_eq!(snapshot(&store), before_store);
}

#[test]
fn failed_login_from_empty_session_writes_nothing() {
    let store = MemoryStore::new();
    let mut state = SessionState::hydrating();
    state.hydrate(&store);

    let result = login(&mut state, &rejects(), &store);
    assert_eq!(result, Err(AuthError::InvalidCredentials));
    assert!(store.is_empty());
    assert_eq!(state.phase(), SessionPhase::Unauthenticated);
}

#[test]
fn login_without_token_is_rejected_without_mutation() {
    let store = MemoryStore::new();
    let mut state = SessionState::hydrating();
    state.hydrate(&store);

    for body in [
        serde_json::json!({"perfil": "ADMIN", "nome": "Root"}),
        serde_json::json!({"token": "", "perfil": "ADMIN"}),
    ] {
        let result = login(&mut state, &accepts(body), &store);
        assert_eq!(result, Err(AuthError::InvalidCredentials));
        assert!(store.is_empty());
        assert!(state.user.is_none());
    }
}

#[test]
fn login_without_role_is_rejected() {
    let store = MemoryStore::new();
    let mut state = SessionState::default();
    let backend = accepts(serde_json::json!({"token": "abc", "nome": "Ana"}));
    assert_eq!(login(&mut state, &backend, &store), Err(AuthError::InvalidCredentials));
    assert!(store.is_empty());
}

#[test]
fn login_storage_failure_leaves_state_untouched() {
    let store = MemoryStore::read_only();
    let mut state = SessionState::hydrating();
    state.hydrate(&store);
    let before = state.clone();

    let result = login(&mut state, &accepts(response_for(Role::Admin)), &store);
    assert!(matches!(result, Err(AuthError::Storage(_))));
    assert_eq!(state, before);
    assert!(store.is_empty());
}

#[test]
fn relogin_replaces_session_and_role() {
    let (mut state, store) = logged_in(Role::Professor);
    state.logout(&store);
    login(&mut state, &accepts(response_for(Role::Admin)), &store).unwrap();
    assert_eq!(state.phase(), SessionPhase::Authenticated(Role::Admin));
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("tok-admin"));
}

// =============================================================
// Logout
// =============================================================

#[test]
fn logout_is_idempotent() {
    let (mut state, store) = logged_in(Role::Professor);

    assert!(state.logout(&store));
    let once = (state.clone(), snapshot(&store));

    assert!(!state.logout(&store));
    assert_eq!((state.clone(), snapshot(&store)), once);
    assert!(store.is_empty());
    assert_eq!(state.phase(), SessionPhase::Unauthenticated);
}

#[test]
fn logout_when_never_logged_in_is_noop() {
    let store = MemoryStore::new();
    let mut state = SessionState::default();
    assert!(!state.logout(&store));
    assert!(store.is_empty());
}

// =============================================================
// Authorize
// =============================================================

#[test]
fn role_mismatch_redirects_to_stored_role_home() {
    for stored in Role::ALL {
        for required in Role::ALL.into_iter().filter(|r| *r != stored) {
            let (mut state, store) = logged_in(stored);
            let decision = state.authorize(&store, Some(required));
            assert_eq!(decision, AuthDecision::RedirectToRoleHome(stored));
            assert_eq!(decision.redirect_path(), Some(routes::role_home(stored)));
            assert_ne!(decision.redirect_path(), Some(routes::role_home(required)));
            // A role mismatch is not a logout.
            assert!(is_authenticated(&store));
        }
    }
}

#[test]
fn matching_or_unspecified_role_allows() {
    for role in Role::ALL {
        let (mut state, store) = logged_in(role);
        assert_eq!(state.authorize(&store, Some(role)), AuthDecision::Allow);
        assert_eq!(state.authorize(&store, None), AuthDecision::Allow);
    }
}

#[test]
fn missing_token_with_cached_user_fails_closed() {
    for required in [None, Some(Role::Admin), Some(Role::Professor)] {
        let (mut state, store) = logged_in(Role::Professor);
        store.remove(TOKEN_KEY);

        assert_eq!(state.authorize(&store, required), AuthDecision::RedirectToLogin);
        assert!(!is_authenticated(&store));
        assert!(state.user.is_none());
        assert!(store.get(USER_KEY).is_none());
    }
}

#[test]
fn decide_has_no_side_effects() {
    let (state, store) = logged_in(Role::Admin);
    store.remove(TOKEN_KEY);
    assert_eq!(state.decide(&store, None), AuthDecision::RedirectToLogin);
    assert!(state.user.is_some());
    assert!(store.get(USER_KEY).is_some());
}

#[test]
fn blank_token_counts_as_missing() {
    let store = MemoryStore::new();
    store.set(TOKEN_KEY, "   ").unwrap();
    assert!(!is_authenticated(&store));
}

#[test]
fn allow_and_pending_have_no_redirect_path() {
    assert_eq!(AuthDecision::Allow.redirect_path(), None);
    assert_eq!(AuthDecision::Pending.redirect_path(), None);
    assert_eq!(AuthDecision::RedirectToLogin.redirect_path(), Some("/login"));
}

// =============================================================
// Login gate
// =============================================================

#[test]
fn authenticated_admin_skips_login_form() {
    let (state, store) = logged_in(Role::Admin);
    assert_eq!(state.login_gate(&store), LoginGate::RedirectToRoleHome(Role::Admin));
    assert_eq!(routes::role_home(Role::Admin), "/admin/professores");
}

#[test]
fn login_gate_shows_form_when_token_vanished() {
    let (state, store) = logged_in(Role::Admin);
    store.remove(TOKEN_KEY);
    assert_eq!(state.login_gate(&store), LoginGate::ShowForm);
}

// =============================================================
// Validity polling
// =============================================================

#[test]
fn check_validity_keeps_live_session() {
    let (mut state, store) = logged_in(Role::Professor);
    assert!(!state.check_validity(&store));
    assert_eq!(state.phase(), SessionPhase::Authenticated(Role::Professor));
}

#[test]
fn check_validity_ignores_logged_out_session() {
    let store = MemoryStore::new();
    let mut state = SessionState::default();
    assert!(!state.check_validity(&store));
}

#[test]
fn check_validity_logs_out_expired_session() {
    let (mut state, store) = logged_in(Role::Admin);
    store.remove(TOKEN_KEY);
    assert!(state.check_validity(&store));
    assert_eq!(state.phase(), SessionPhase::Unauthenticated);
    assert!(store.is_empty());
    // Second tick after expiry has nothing left to do.
    assert!(!state.check_validity(&store));
}

#[test]
fn polling_converges_within_one_interval() {
    let interval = Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS);
    let flip_at = Duration::from_secs(5);
    let (mut state, store) = logged_in(Role::Professor);

    let mut now = Duration::ZERO;
    let mut logged_out_at = None;
    while now <= flip_at + interval {
        if now >= flip_at {
            store.remove(TOKEN_KEY);
        }
        if now > Duration::ZERO && state.check_validity(&store) {
            logged_out_at = Some(now);
            break;
        }
        now += interval;
    }

    let logged_out_at = logged_out_at.expect("session should expire");
    assert!(logged_out_at <= flip_at + interval);
    assert_eq!(state.phase(), SessionPhase::Unauthenticated);
}
