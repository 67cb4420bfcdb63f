//! Durable bearer-token slot.
//!
//! The token is opaque: stores never inspect or validate it. Storage backends
//! swallow their own I/O failures (logging them) because the contract has no
//! failure mode; a failed read simply looks like "no token".

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use std::cell::RefCell;
use std::path::PathBuf;

/// Single-slot token storage read by every outgoing request.
pub trait TokenStore {
    /// Current token, or `None` when unauthenticated.
    fn get(&self) -> Option<String>;
    /// Replace the current token.
    fn set(&self, token: &str);
    /// Remove the current token. Clearing an empty store is a no-op.
    fn clear(&self);
}

/// In-process store. Does not survive a reload; used by tests and embedders
/// that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self { slot: RefCell::new(Some(token.to_owned())) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn set(&self, token: &str) {
        *self.slot.borrow_mut() = Some(token.to_owned());
    }

    fn clear(&self) {
        self.slot.borrow_mut().take();
    }
}

/// Token persisted as the raw contents of a single file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => None,
            Ok(raw) => Some(raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "token read failed");
                None
            }
        }
    }

    fn set(&self, token: &str) {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), error = %e, "token directory create failed");
                return;
            }
        }
        if let Err(e) = std::fs::write(&self.path, token) {
            tracing::warn!(path = %self.path.display(), error = %e, "token write failed");
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "token clear failed"),
        }
    }
}

/// Token persisted in browser `localStorage` under a single key.
#[cfg(feature = "hydrate")]
#[derive(Debug, Clone)]
pub struct LocalStorageTokenStore {
    key: String,
}

#[cfg(feature = "hydrate")]
impl LocalStorageTokenStore {
    pub fn new(key: &str) -> Self {
        Self { key: key.to_owned() }
    }

    fn storage() -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        match window.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                tracing::warn!(?err, "localStorage unavailable");
                None
            }
        }
    }
}

#[cfg(feature = "hydrate")]
impl TokenStore for LocalStorageTokenStore {
    fn get(&self) -> Option<String> {
        let storage = Self::storage()?;
        match storage.get_item(&self.key) {
            Ok(value) => value.filter(|token| !token.is_empty()),
            Err(err) => {
                tracing::warn!(?err, key = %self.key, "token read failed");
                None
            }
        }
    }

    fn set(&self, token: &str) {
        let Some(storage) = Self::storage() else {
            return;
        };
        if let Err(err) = storage.set_item(&self.key, token) {
            tracing::warn!(?err, key = %self.key, "token write failed");
        }
    }

    fn clear(&self) {
        let Some(storage) = Self::storage() else {
            return;
        };
        if let Err(err) = storage.remove_item(&self.key) {
            tracing::warn!(?err, key = %self.key, "token clear failed");
        }
    }
}
