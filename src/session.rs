//! Persistent session-token storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session is a single token slot in a key-value store. Services receive
//! a [`Session`] explicitly and read the token at call time; the login flow
//! writes it and logout clears it. Nothing else mutates the slot.
//!
//! ERROR HANDLING
//! ==============
//! Unreadable storage reads as "no token" so callers degrade to the
//! unauthenticated path. Write failures are surfaced.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use crate::error::ApiError;

/// Storage key holding the bearer token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

// =============================================================================
// STORE
// =============================================================================

/// String key-value storage backing a [`Session`].
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> io::Result<Option<String>>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> io::Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn remove(&self, key: &str) -> io::Result<()>;
}

/// Process-local store. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> io::Error {
    io::Error::other("session store lock poisoned")
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.remove(key);
        Ok(())
    }
}

/// JSON-object file on disk.
///
/// Writes go to a sibling temp file that is then renamed over the target,
/// so readers never observe a half-written file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> io::Result<BTreeMap<String, String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn store(&self, entries: &BTreeMap<String, String>) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let rendered = serde_json::to_string_pretty(entries).map_err(io::Error::other)?;
        let tmp = self.path.with_extension(format!("{}.tmp", uuid::Uuid::new_v4().simple()));
        fs::write(&tmp, rendered)?;
        fs::rename(&tmp, &self.path).inspect_err(|_| {
            let _ = fs::remove_file(&tmp);
        })
    }

    fn update(&self, apply: impl FnOnce(&mut BTreeMap<String, String>)) -> io::Result<()> {
        let _guard = self.write_lock.lock().map_err(|_| poisoned())?;
        // A corrupt file is replaced rather than blocking every future write.
        let mut entries = self.load().unwrap_or_default();
        apply(&mut entries);
        self.store(&entries)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.update(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// Handle to the stored bearer token. Cheap to clone.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl Session {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self { store: Arc::new(store) }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(FileStore::new(path))
    }

    /// Current token, or `None` when absent, blank, or unreadable.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        match self.store.get(ACCESS_TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "session store unreadable; treating as signed out");
                None
            }
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Store `token`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] if the store cannot be written.
    pub fn set_token(&self, token: &str) -> Result<(), ApiError> {
        self.store
            .set(ACCESS_TOKEN_KEY, token)
            .map_err(|e| ApiError::storage(e.to_string()))
    }

    /// Remove the stored token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] if the store cannot be written.
    pub fn clear_token(&self) -> Result<(), ApiError> {
        self.store
            .remove(ACCESS_TOKEN_KEY)
            .map_err(|e| ApiError::storage(e.to_string()))
    }
}
