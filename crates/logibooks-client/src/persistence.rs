//! Persisted UI state.
//!
//! Stores keep selected slices (list filters, paging) across sessions. Each
//! slice is stored as JSON under its store identifier. Hydration is best
//! effort: a missing or corrupted slice degrades to the default value.

use crate::error::{ClientError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Raw string key-value storage.
pub trait KeyValueStorage: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-process storage, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| ClientError::Storage("memory storage lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| ClientError::Storage("memory storage lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| ClientError::Storage("memory storage lock poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

/// One file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir` for storage, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Storage directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && !key.contains("..");
        if valid {
            Ok(self.dir.join(format!("{key}.json")))
        } else {
            Err(ClientError::Storage(format!("invalid storage key '{key}'")))
        }
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::write(path, value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Serializes store slices into a [`KeyValueStorage`].
#[derive(Clone)]
pub struct UiStatePersistence {
    storage: Arc<dyn KeyValueStorage>,
}

impl UiStatePersistence {
    /// Wrap a storage backend.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Persistence backed by memory only.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Save a slice under `store_id`.
    ///
    /// # Errors
    /// Returns error if serialization or the storage write fails.
    pub fn persist<T: Serialize>(&self, store_id: &str, slice: &T) -> Result<()> {
        let json = serde_json::to_string(slice)?;
        self.storage.set(store_id, &json)
    }

    /// Load the slice stored under `store_id`.
    ///
    /// Missing, unreadable, or malformed entries yield `T::default()`.
    #[must_use]
    pub fn hydrate<T: DeserializeOwned + Default>(&self, store_id: &str) -> T {
        let raw = match self.storage.get(store_id) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(err) => {
                tracing::warn!(store = store_id, "failed to read persisted state: {err}");
                return T::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(store = store_id, "ignoring malformed persisted state: {err}");
            T::default()
        })
    }

    /// Drop the slice stored under `store_id`.
    ///
    /// # Errors
    /// Returns error if the storage removal fails.
    pub fn clear(&self, store_id: &str) -> Result<()> {
        self.storage.remove(store_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logibooks_core::ParcelsFilter;
    use tempfile::TempDir;

    #[test]
    fn test_persist_and_hydrate() {
        let persistence = UiStatePersistence::in_memory();
        let filter = ParcelsFilter {
            parcel_number: "RU0001".to_string(),
            page: 3,
            ..ParcelsFilter::default()
        };
        persistence.persist("parcels", &filter).expect("persist");

        let restored: ParcelsFilter = persistence.hydrate("parcels");
        assert_eq!(restored, filter);
    }

    #[test]
    fn test_hydrate_missing_is_default() {
        let persistence = UiStatePersistence::in_memory();
        let restored: ParcelsFilter = persistence.hydrate("parcels");
        assert_eq!(restored, ParcelsFilter::default());
    }

    #[test]
    fn test_hydrate_malformed_is_default() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set("parcels", "{not json").expect("set raw");
        let persistence = UiStatePersistence::new(storage);

        let restored: ParcelsFilter = persistence.hydrate("parcels");
        assert_eq!(restored, ParcelsFilter::default());
    }

    #[test]
    fn test_clear() {
        let persistence = UiStatePersistence::in_memory();
        persistence
            .persist("registers", &serde_json::json!({"page": 2}))
            .expect("persist");
        persistence.clear("registers").expect("clear");
        persistence.clear("registers").expect("clear twice");

        let restored: serde_json::Value = persistence.hydrate("registers");
        assert_eq!(restored, serde_json::Value::Null);
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let tmp = TempDir::new().expect("create temp dir");
        let storage = FileStorage::new(tmp.path().join("ui-state")).expect("create storage");

        assert_eq!(storage.get("parcels").expect("get"), None);
        storage.set("parcels", r#"{"page":2}"#).expect("set");
        assert_eq!(
            storage.get("parcels").expect("get").as_deref(),
            Some(r#"{"page":2}"#)
        );
        storage.remove("parcels").expect("remove");
        assert_eq!(storage.get("parcels").expect("get"), None);
    }

    #[test]
    fn test_file_storage_rejects_path_keys() {
        let tmp = TempDir::new().expect("create temp dir");
        let storage = FileStorage::new(tmp.path()).expect("create storage");
        assert!(storage.set("../escape", "x").is_err());
        assert!(storage.set("a/b", "x").is_err());
        assert!(storage.set("", "x").is_err());
    }

    #[test]
    fn test_file_storage_malformed_file_is_default() {
        let tmp = TempDir::new().expect("create temp dir");
        let storage = FileStorage::new(tmp.path()).expect("create storage");
        fs::write(tmp.path().join("parcels.json"), "garbage").expect("write garbage");

        let persistence = UiStatePersistence::new(Arc::new(storage));
        let restored: ParcelsFilter = persistence.hydrate("parcels");
        assert_eq!(restored, ParcelsFilter::default());
    }
}
