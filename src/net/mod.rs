//! Networking modules for the REST auth boundary.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the login request and `types` defines the wire schema shared
//! with the session guard and the stored user record.

pub mod api;
pub mod types;
