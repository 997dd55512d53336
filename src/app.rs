//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Redirect, Route, Router, Routes},
    hooks::use_navigate,
};

use crate::components::protected_route::ProtectedRoute;
use crate::config::ClientConfig;
use crate::net::api::HttpAuthBackend;
use crate::pages::{login::LoginPage, workspace::WorkspacePage};
use crate::routes::{self, Screen};
use crate::util::auth::{SessionContext, install_validity_poll};
use crate::util::storage::BrowserStore;

/// Root application component.
///
/// Provides the config, the auth backend, and the single session context,
/// then sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::load();
    let session = SessionContext::new(BrowserStore);

    provide_context(HttpAuthBackend::new(config.api_base_url.clone()));
    provide_context(config);
    provide_context(session);

    // Leave `Hydrating` once mounted so guards render their pending state first.
    Effect::new(move || session.hydrate());

    view! {
        <Title text="FLAVALIA"/>

        <Router>
            <SessionPoll/>
            <Routes fallback=|| view! { <Redirect path=routes::LOGIN/> }>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=|| view! { <Redirect path=routes::LOGIN/> }/>

                <Route
                    path=(StaticSegment("professor"), StaticSegment("avaliacoes"))
                    view=|| protected(Screen::ProfessorExams)
                />
                <Route
                    path=(StaticSegment("professor"), StaticSegment("avaliacoes"), StaticSegment("nova"))
                    view=|| protected(Screen::ProfessorExamNew)
                />
                <Route
                    path=(
                        StaticSegment("professor"),
                        StaticSegment("avaliacoes"),
                        StaticSegment("editar"),
                        ParamSegment("id"),
                    )
                    view=|| protected(Screen::ProfessorExamEdit)
                />
                <Route
                    path=(StaticSegment("professor"), StaticSegment("questoes"))
                    view=|| protected(Screen::ProfessorQuestions)
                />
                <Route
                    path=(StaticSegment("professor"), StaticSegment("questoes"), StaticSegment("nova"))
                    view=|| protected(Screen::ProfessorQuestionNew)
                />
                <Route
                    path=(StaticSegment("professor"), StaticSegment("iavalia"))
                    view=|| protected(Screen::ProfessorAssistant)
                />

                <Route
                    path=(StaticSegment("admin"), StaticSegment("professores"))
                    view=|| protected(Screen::AdminProfessors)
                />
                <Route
                    path=(StaticSegment("admin"), StaticSegment("materias"))
                    view=|| protected(Screen::AdminSubjects)
                />
                <Route
                    path=(StaticSegment("admin"), StaticSegment("questoes"))
                    view=|| protected(Screen::AdminQuestions)
                />
                <Route
                    path=(StaticSegment("admin"), StaticSegment("avaliacoes"))
                    view=|| protected(Screen::AdminExams)
                />
                <Route
                    path=(StaticSegment("admin"), StaticSegment("avaliacoes"), StaticSegment("nova"))
                    view=|| protected(Screen::AdminExamNew)
                />
                <Route
                    path=(StaticSegment("admin"), StaticSegment("avaliacoes"), ParamSegment("id"))
                    view=|| protected(Screen::AdminExamView)
                />
            </Routes>
        </Router>
    }
}

fn protected(screen: Screen) -> impl IntoView {
    view! {
        <ProtectedRoute required_role=screen.required_role()>
            <WorkspacePage screen=screen/>
        </ProtectedRoute>
    }
}

/// Runs the token validity poll for the lifetime of the router.
#[component]
fn SessionPoll() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let config = expect_context::<ClientConfig>();
    install_validity_poll(session, config.poll_interval, use_navigate());
}
