//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is plain data with policy methods; the reactive wrapper lives in
//! `util::auth` so the policy can be exercised without a browser.

pub mod session;
