//! Top navigation bar for signed-in users.

use leptos::prelude::*;

use crate::routes::{self, nav_links};
use crate::util::auth::SessionContext;

/// Role-specific links, the user's name, and the logout button.
///
/// Logout goes through [`SessionContext::logout_and_reset`].
#[component]
pub fn Navbar() -> impl IntoView {
    let session = expect_context::<SessionContext>();

    let role = move || session.state.with(|s| s.current_role());
    let user_name = move || session.state.with(|s| s.user.as_ref().map(|u| u.name.clone()).unwrap_or_default());
    let home = move || role().map_or(routes::LOGIN, routes::role_home);

    let on_logout = move |_| session.logout_and_reset();

    view! {
        <nav class="navbar">
            <div class="navbar-container">
                <a href=home class="navbar-logo">"FLAVALIA"</a>
                <div class="navbar-menu">
                    {move || {
                        role()
                            .map(|role| {
                                nav_links(role)
                                    .iter()
                                    .map(|link| {
                                        view! {
                                            <a href=link.href class="navbar-link">
                                                <i class=format!("fas {}", link.icon)></i>
                                                " "
                                                {link.label}
                                            </a>
                                        }
                                    })
                                    .collect_view()
                            })
                    }}
                    <div class="navbar-user">
                        <span class="navbar-username">
                            <i class="fas fa-user-circle"></i>
                            " "
                            {user_name}
                        </span>
                        <button class="navbar-logout" on:click=on_logout>
                            <i class="fas fa-sign-out-alt"></i>
                            " Log out"
                        </button>
                    </div>
                </div>
            </div>
        </nav>
    }
}
