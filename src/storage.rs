// Durable client storage
// String key/value store persisted as a single JSON file

use crate::models::Session;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Well-known storage keys
pub mod keys {
    /// Serialized `Session` (token + user)
    pub const SESSION: &str = "session";
    /// UI theme (`"light"` / `"dark"`)
    pub const THEME: &str = "theme";
    /// Whether the sidebar is expanded
    pub const SIDEBAR_OPEN: &str = "sidebarOpen";
    /// Selected interface language
    pub const LANGUAGE: &str = "language";
    /// Last selected agent id
    pub const ACTIVE_AGENT_ID: &str = "activeAgentId";
    /// Prefix for per-section expansion flags (`section:<name>`)
    pub const SECTION_PREFIX: &str = "section:";
}

const STORAGE_VERSION: u32 = 1;

/// Error types for storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    /// File I/O error
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON serialization/deserialization error
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
    /// Invalid data format
    #[error("Invalid Data: {0}")]
    InvalidData(String),
}

/// On-disk envelope
#[derive(Debug, Serialize, Deserialize)]
struct StorageFile {
    /// Version of the storage format (for future migration support)
    version: u32,
    entries: BTreeMap<String, String>,
}

/// Key/value storage shared by the API client and the console
///
/// Every write goes straight to disk. There is no locking across
/// processes: the last writer wins.
#[derive(Debug, Default)]
pub struct ClientStorage {
    entries: RwLock<BTreeMap<String, String>>,
    path: Option<PathBuf>,
}

impl ClientStorage {
    /// Storage that never touches the filesystem
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open (or lazily create) storage backed by `path`
    ///
    /// A missing file yields an empty store; the file is only created on
    /// the first write.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let json = fs::read_to_string(&path)?;
            let file: StorageFile = serde_json::from_str(&json)?;
            if file.version != STORAGE_VERSION {
                return Err(StorageError::InvalidData(format!(
                    "Unsupported storage version: {}",
                    file.version
                )));
            }
            file.entries
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            entries: RwLock::new(entries),
            path: Some(path),
        })
    }

    /// Raw string value for `key`
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    /// Store a raw string value
    ///
    /// Nothing changes, in memory or on disk, when the write fails.
    pub fn set(&self, key: &str, value: impl Into<String>) -> Result<(), StorageError> {
        let mut entries = self.entries.write();
        let mut next = entries.clone();
        next.insert(key.to_string(), value.into());
        self.flush(&next)?;
        *entries = next;
        Ok(())
    }

    /// Remove `key`; removing an absent key is not an error
    ///
    /// The key stays readable when the write fails.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write();
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.flush(&next)?;
        *entries = next;
        Ok(())
    }

    /// All entries whose key starts with `prefix`
    pub fn entries_with_prefix(&self, prefix: &str) -> Vec<(String, String)> {
        self.entries
            .read()
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Decode a JSON value stored under `key`
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.get(key) {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Store `value` as JSON under `key`
    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.set(key, raw)
    }

    /// Persisted session, if any
    pub fn session(&self) -> Result<Option<Session>, StorageError> {
        self.get_json(keys::SESSION)
    }

    /// Persist `session`
    pub fn save_session(&self, session: &Session) -> Result<(), StorageError> {
        self.set_json(keys::SESSION, session)
    }

    /// Forget the persisted session
    pub fn clear_session(&self) -> Result<(), StorageError> {
        self.remove(keys::SESSION)
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let file = StorageFile {
            version: STORAGE_VERSION,
            entries: entries.clone(),
        };
        fs::write(path, serde_json::to_string_pretty(&file)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionUser;
    use tempfile::tempdir;

    fn session(token: &str) -> Session {
        Session {
            token: token.to_string(),
            user: SessionUser {
                email: "ops@example.com".to_string(),
            },
        }
    }

    #[test]
    fn test_in_memory_set_get_remove() {
        let storage = ClientStorage::in_memory();
        assert!(storage.get(keys::THEME).is_none());

        storage.set(keys::THEME, "dark").unwrap();
        assert_eq!(storage.get(keys::THEME).as_deref(), Some("dark"));

        storage.remove(keys::THEME).unwrap();
        assert!(storage.get(keys::THEME).is_none());
        // Removing twice is fine
        storage.remove(keys::THEME).unwrap();
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let storage = ClientStorage::open(&path).unwrap();
        storage.save_session(&session("abc")).unwrap();
        storage.set(keys::LANGUAGE, "de").unwrap();
        drop(storage);

        let reopened = ClientStorage::open(&path).unwrap();
        assert_eq!(reopened.session().unwrap(), Some(session("abc")));
        assert_eq!(reopened.get(keys::LANGUAGE).as_deref(), Some("de"));
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let storage = ClientStorage::open(&path).unwrap();
        assert!(storage.session().unwrap().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_clear_session() {
        let storage = ClientStorage::in_memory();
        storage.save_session(&session("abc")).unwrap();
        storage.clear_session().unwrap();
        assert!(storage.session().unwrap().is_none());
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let storage = ClientStorage::open(blocker.join("storage.json")).unwrap();
        assert!(storage.save_session(&session("abc")).is_err());
        assert!(storage.session().unwrap().is_none());
    }

    #[test]
    fn test_failed_remove_keeps_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let storage = ClientStorage::open(&path).unwrap();
        storage.save_session(&session("abc")).unwrap();

        // A directory where the file should be makes the next write fail
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(storage.clear_session().is_err());
        assert_eq!(storage.session().unwrap(), Some(session("abc")));
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, r#"{"version": 7, "entries": {}}"#).unwrap();

        let err = ClientStorage::open(&path).unwrap_err();
        assert!(matches!(err, StorageError::InvalidData(_)));
    }

    #[test]
    fn test_corrupt_session_value_is_json_error() {
        let storage = ClientStorage::in_memory();
        storage.set(keys::SESSION, "{not json").unwrap();
        assert!(matches!(storage.session(), Err(StorageError::Json(_))));
    }
}
