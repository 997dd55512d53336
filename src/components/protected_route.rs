//! Route wrapper that renders its children only for an authorized session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every workspace route is mounted through this component. It derives the
//! access decision from the session context and acts on it: render on
//! `Allow`, show a checking state on `Pending`, otherwise navigate away
//! (logging out first when the session is missing or inconsistent).

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::Role;
use crate::state::session::AuthDecision;
use crate::util::auth::SessionContext;

#[component]
pub fn ProtectedRoute(
    /// Role the view requires. Omitted means any signed-in user.
    #[prop(optional)]
    required_role: Option<Role>,
    children: ChildrenFn,
) -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();

    let decision = Memo::new(move |_| session.decide(required_role));

    // The memo only reads; acting on it (logout included) happens here.
    Effect::new(move || {
        decision.track();
        if let Some(path) = session.authorize(required_role).redirect_path() {
            navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    move || match decision.get() {
        AuthDecision::Allow => children().into_any(),
        AuthDecision::Pending => view! {
            <div class="container guard-status">
                <p>"Checking authentication..."</p>
            </div>
        }
        .into_any(),
        AuthDecision::RedirectToLogin | AuthDecision::RedirectToRoleHome(_) => view! {
            <div class="container guard-status">
                <p>"Redirecting..."</p>
            </div>
        }
        .into_any(),
    }
}
