//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, timers,
//! window navigation) from page and component logic.

pub mod auth;
pub mod navigation;
pub mod poll;
pub mod storage;
