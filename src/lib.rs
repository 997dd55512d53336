//! # flavalia-client
//!
//! Leptos + WASM browser client for the FLAVALIA assessment system.
//!
//! The crate's core is the session guard in [`state::session`]: it owns the
//! login token lifecycle, decides role-based access for protected routes, and
//! expires sessions whose token has left durable storage. Pages, components,
//! and the router consume it through the context in [`util::auth`].

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

/// Browser entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
