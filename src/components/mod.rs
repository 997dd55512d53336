//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the session from Leptos context; `protected_route` gates
//! workspace routes and `navbar` frames every signed-in screen.

pub mod navbar;
pub mod protected_route;
