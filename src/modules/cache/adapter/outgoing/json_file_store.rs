use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::warn;

use crate::modules::cache::application::ports::outgoing::key_value_store::{
    KeyValueStore, StoreError,
};

/// File-backed implementation of [`KeyValueStore`].
///
/// The whole map is one JSON document on disk, rewritten on every
/// mutation. That is deliberately naive: the state this holds (a
/// handful of cache envelopes and the visibility map) is small, and the
/// modeled backend has the same last-write-wins semantics.
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl JsonFileStore {
    /// Opens (or lazily creates) the store at `path`. An unreadable or
    /// corrupt file is treated as empty rather than an error; this is a
    /// cache, losing it is acceptable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!("Ignoring corrupt cache file {}: {}", path.display(), err);
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|err| StoreError::WriteFailed(err.to_string()))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| StoreError::WriteFailed(err.to_string()))?;
        }
        fs::write(&self.path, raw).map_err(|err| StoreError::WriteFailed(err.to_string()))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("store mutex poisoned")
            .get(key)
            .cloned()
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("store mutex poisoned");
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> bool {
        let mut entries = self.entries.lock().expect("store mutex poisoned");
        let removed = entries.remove(key).is_some();
        if removed {
            if let Err(err) = self.persist(&entries) {
                warn!("Failed to persist removal of {}: {}", key, err);
            }
        }
        removed
    }
}
