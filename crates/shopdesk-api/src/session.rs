//! Session storage
//!
//! A session is two string entries, `token` and `user` (JSON text), kept in a
//! [`SessionStore`]. The gateway re-reads the store on every request and never
//! caches either entry.

use crate::error::StoreError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};
use tracing::warn;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Durable key/value storage for the session entries.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Drop both session entries.
    fn clear(&self) -> Result<(), StoreError> {
        self.remove(TOKEN_KEY)?;
        self.remove(USER_KEY)
    }
}

/// Snapshot of the stored session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<Value>,
}

impl Session {
    pub fn load(store: &dyn SessionStore) -> Self {
        Self {
            token: read_token(store),
            user: read_user(store),
        }
    }

    pub fn is_active(&self) -> bool {
        self.token.is_some()
    }
}

pub(crate) fn read_token(store: &dyn SessionStore) -> Option<String> {
    store.get(TOKEN_KEY).filter(|t| !t.is_empty())
}

/// Stored user, or `None` when absent or not valid JSON.
pub(crate) fn read_user(store: &dyn SessionStore) -> Option<Value> {
    let raw = store.get(USER_KEY)?;
    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Null) => None,
        Ok(user) => Some(user),
        Err(e) => {
            warn!("Ignoring malformed stored user: {}", e);
            None
        }
    }
}

/// In-process store, for tests and one-shot use.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store
            .entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(TOKEN_KEY.to_string(), token.into());
        store
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file, e.g. ~/.shopdesk/session.json.
///
/// Every read goes to disk so separate processes see each other's logins.
/// A missing file is an empty session; a corrupt one is logged and treated
/// as empty, and gets replaced on the next write.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> BTreeMap<String, String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return BTreeMap::new(),
        };
        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Session file {} is corrupt: {}", self.path.display(), e);
                BTreeMap::new()
            }
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn update<F>(&self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries = self.read_entries();
        if f(&mut entries) {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_entries().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.update(|entries| entries.remove(key).is_some())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.update(|entries| {
            let had_token = entries.remove(TOKEN_KEY).is_some();
            let had_user = entries.remove(USER_KEY).is_some();
            had_token || had_user
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_counts_as_absent() {
        let store = MemorySessionStore::with_token("");
        assert!(read_token(&store).is_none());
    }

    #[test]
    fn malformed_user_reads_as_none() {
        let store = MemorySessionStore::new();
        store.set(USER_KEY, "{not json").unwrap();
        assert!(read_user(&store).is_none());
        store.set(USER_KEY, "null").unwrap();
        assert!(read_user(&store).is_none());
    }
}
