//! # Blob Store
//!
//! The persistence seam for ledger actors. A [`BlobStore`] is a flat
//! string-keyed map of JSON blobs, one blob per collection, injected into
//! whatever needs to load or flush state. Two implementations ship with
//! the crate:
//!
//! * [`FileStore`] - one JSON file per key under a data directory.
//! * [`MemoryStore`] - a `HashMap`-backed fake for tests, with a switch
//!   to make writes fail so persistence-failure isolation is testable.
//!
//! The [`load_collection`] and [`persist_collection`] helpers implement
//! the best-effort policy shared by every caller: a missing or corrupt
//! blob loads as the empty collection, and a failed flush is logged at
//! `warn` and swallowed so the in-memory state stays authoritative.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::warn;

/// Errors surfaced by a blob store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage unavailable")]
    Unavailable,
}

/// A flat map of named JSON blobs.
pub trait BlobStore: Send + Sync {
    /// Returns the blob for `key`, or `None` if nothing was ever written.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replaces the blob for `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes the blob for `key`. Removing an absent key is not an
    /// error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// File-backed store: one `<key>.json` file per blob under a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (and creates, if needed) the data directory.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::write(self.path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every `write` and `remove` fails with
    /// [`StoreError::Unavailable`].
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Test hook: look at the raw blob for a key.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.blobs.lock().unwrap().get(key).cloned()
    }

    /// Test hook: pre-seed a blob.
    pub fn put(&self, key: &str, value: impl Into<String>) {
        self.blobs.lock().unwrap().insert(key.to_string(), value.into());
    }
}

impl BlobStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.blobs.lock().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }
        self.blobs
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }
        self.blobs.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Loads a collection, falling back to the empty collection when the blob
/// is absent, unreadable, or corrupt. The fallback cases are logged, not
/// fatal.
pub fn load_collection<T>(store: &dyn BlobStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match store.read(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Stored blob is corrupt, starting empty");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(e) => {
            warn!(key, error = %e, "Storage read failed, starting empty");
            T::default()
        }
    }
}

/// Flushes a collection, best effort. A failure never reaches the caller;
/// the in-memory state stays authoritative until the next successful
/// write.
pub fn persist_collection<T: Serialize>(store: &dyn BlobStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => {
            if let Err(e) = store.write(key, &raw) {
                warn!(key, error = %e, "Storage write failed, keeping in-memory state");
            }
        }
        Err(e) => warn!(key, error = %e, "Could not serialize collection"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_and_tolerates_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        assert!(store.read("absent").unwrap().is_none());

        store.write("notes", r#"["a","b"]"#).unwrap();
        assert_eq!(store.read("notes").unwrap().unwrap(), r#"["a","b"]"#);

        store.remove("notes").unwrap();
        assert!(store.read("notes").unwrap().is_none());
        // Removing again is fine.
        store.remove("notes").unwrap();
    }

    #[test]
    fn load_collection_falls_back_on_corrupt_blob() {
        let store = MemoryStore::new();
        store.put("notes", "not json at all");

        let loaded: Vec<String> = load_collection(&store, "notes");
        assert!(loaded.is_empty());
    }

    #[test]
    fn persist_collection_swallows_write_failures() {
        let store = MemoryStore::new();
        store.fail_writes(true);

        persist_collection(&store, "notes", &vec!["a".to_string()]);
        assert!(store.raw("notes").is_none());

        store.fail_writes(false);
        persist_collection(&store, "notes", &vec!["a".to_string()]);
        assert_eq!(store.raw("notes").unwrap(), r#"["a"]"#);
    }
}
