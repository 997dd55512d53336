//! Login page: username + password against the backend auth endpoint.
//!
//! Signed-in users never see the form; they are sent to their role home.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::api::HttpAuthBackend;
use crate::net::types::Credentials;
use crate::routes;
use crate::state::session::LoginGate;
use crate::util::auth::SessionContext;

const MISSING_FIELDS_MESSAGE: &str = "Enter both user and password.";

/// Trim the username and require both fields to be non-blank.
/// The password is passed through untouched.
fn validate_login_input(login_name: &str, password: &str) -> Result<Credentials, &'static str> {
    let login_name = login_name.trim();
    if login_name.is_empty() || password.trim().is_empty() {
        return Err(MISSING_FIELDS_MESSAGE);
    }
    Ok(Credentials::new(login_name, password))
}

fn submit_label(busy: bool) -> &'static str {
    if busy { "Signing in..." } else { "Sign in" }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let backend = expect_context::<HttpAuthBackend>();
    let navigate = use_navigate();

    let login_name = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let gate = Memo::new(move |_| session.login_gate());

    // Also covers a successful submit: the new session flips the gate.
    Effect::new(move || {
        if let LoginGate::RedirectToRoleHome(role) = gate.get() {
            navigate(routes::role_home(role), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let credentials = match validate_login_input(&login_name.get_untracked(), &password.get_untracked()) {
            Ok(credentials) => credentials,
            Err(message) => {
                error.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        error.set(String::new());

        let backend = backend.clone();
        leptos::task::spawn_local(async move {
            if let Err(e) = session.login(&backend, &credentials).await {
                error.set(e.user_message().to_owned());
            }
            busy.set(false);
        });
    };

    let on_edit = move |target: RwSignal<String>, value: String| {
        target.set(value);
        error.set(String::new());
    };

    move || match gate.get() {
        LoginGate::Pending => view! {
            <div class="container guard-status">
                <p>"Loading..."</p>
            </div>
        }
        .into_any(),
        LoginGate::RedirectToRoleHome(_) => view! {
            <div class="container guard-status">
                <p>"Redirecting..."</p>
            </div>
        }
        .into_any(),
        LoginGate::ShowForm => view! {
            <div class="login-container">
                <div class="login-card">
                    <div class="login-header">
                        <h1 class="login-logo">"FLAVALIA"</h1>
                        <p class="login-subtitle">"Assessment System"</p>
                    </div>
                    <Show when=move || !error.get().is_empty()>
                        <div class="login-error" role="alert" aria-live="assertive">
                            {move || error.get()}
                        </div>
                    </Show>
                    <form class="login-form" on:submit=on_submit.clone()>
                        <div class="form-group">
                            <label for="login">"User"</label>
                            <input
                                id="login"
                                class="input"
                                type="text"
                                autocomplete="username"
                                required
                                prop:value=move || login_name.get()
                                on:input=move |ev| on_edit(login_name, event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <label for="senha">"Password"</label>
                            <input
                                id="senha"
                                class="input"
                                type="password"
                                autocomplete="current-password"
                                required
                                prop:value=move || password.get()
                                on:input=move |ev| on_edit(password, event_target_value(&ev))
                            />
                        </div>
                        <button
                            class="btn btn-primary btn-block"
                            type="submit"
                            disabled=move || busy.get()
                            aria-busy=move || busy.get().to_string()
                        >
                            {move || submit_label(busy.get())}
                        </button>
                    </form>
                </div>
            </div>
        }
        .into_any(),
    }
}
