//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates the session policy
//! to `state::session` through the shared context.

pub mod login;
pub mod workspace;
