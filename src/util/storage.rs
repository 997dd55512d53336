//! Durable key/value storage for the session credentials.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session guard reads and writes the `token` and `user` keys through
//! [`KeyValueStore`]. In the browser that is `localStorage`; headless
//! callers and tests use [`MemoryStore`].
//!
//! TRADE-OFFS
//! ==========
//! Reads are infallible by signature: a storage backend that cannot be read
//! reports the key as absent, which the guard treats as logged out.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Key holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Key holding the JSON login response.
pub const USER_KEY: &str = "user";

/// A write that the storage backend refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("write to `{key}` rejected")]
    WriteRejected { key: String },
}

/// Minimal string store shared by all session reads and writes.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend refuses the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str);
}

/// Browser `localStorage`. Without the `csr` feature every read is empty and
/// every write reports [`StorageError::Unavailable`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            let storage = local_storage().ok_or(StorageError::Unavailable)?;
            storage
                .set_item(key, value)
                .map_err(|_| StorageError::WriteRejected { key: key.to_owned() })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable)
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
        }
    }
}

/// In-process store. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes are all rejected, for exercising failure paths.
    #[cfg(test)]
    pub fn read_only() -> Self {
        Self { entries: Arc::default(), read_only: true }
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().map_or(true, |map| map.is_empty())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::WriteRejected { key: key.to_owned() });
        }
        let mut map = self.entries.lock().map_err(|_| StorageError::Unavailable)?;
        map.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) {
        if let Ok(mut map) = self.entries.lock() {
            map.remove(key);
        }
    }
}
