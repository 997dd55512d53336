//! Full-page navigation outside the client router.
//!
//! TRADE-OFFS
//! ==========
//! A hard reset reloads the bundle, dropping every signal and context. Logout
//! uses it so nothing from one account survives into the next. Without the
//! `csr` feature it is a no-op.

/// Navigate the window to `path`, discarding all in-memory client state.
pub fn hard_reset(path: &str) {
    log::debug!("navigation: hard reset to {path}");
    #[cfg(feature = "csr")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
}
