//! Shell for the role workspaces (exams, questions, subjects, professors).
//!
//! The CRUD screens behind these routes talk to their own backend endpoints;
//! this page frames them with the navbar and the screen heading.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::navbar::Navbar;
use crate::routes::Screen;

#[component]
pub fn WorkspacePage(screen: Screen) -> impl IntoView {
    let params = use_params_map();
    let record_id = move || params.with(|p| p.get("id"));

    view! {
        <Navbar/>
        <main class="container workspace">
            <h1 class="workspace__title">{screen.title()}</h1>
            {move || record_id().map(|id| view! { <p class="workspace__record">"#" {id}</p> })}
        </main>
    }
}
