use std::sync::Arc;

use chrono::Duration;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::modules::cache::application::ports::outgoing::key_value_store::KeyValueStore;
use crate::modules::cache::domain::entities::CachedSnapshot;

//
// ──────────────────────────────────────────────────────────
// TTL policy
// ──────────────────────────────────────────────────────────
//

/// What happens to an entry that turns out to be stale on read.
///
/// Cheap-to-refetch kinds (repos, skills) are physically removed.
/// Expensive kinds (LinkedIn snapshots, paid per scrape) are kept so
/// the degraded-fallback path can still read them after a failed
/// refetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eviction {
    RemoveStale,
    KeepStale,
}

//
// ──────────────────────────────────────────────────────────
// Snapshot store
// ──────────────────────────────────────────────────────────
//

/// TTL snapshot logic over any [`KeyValueStore`].
///
/// This is the single writer for all cache keys; adapters never see the
/// envelope format. There is deliberately no eviction beyond TTL and no
/// size bound.
#[derive(Clone)]
pub struct SnapshotStore {
    store: Arc<dyn KeyValueStore>,
}

impl SnapshotStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Fresh read: `None` if the entry is absent, corrupt, or older
    /// than `ttl`. Corrupt entries are always dropped; stale entries
    /// are dropped or kept per `eviction`.
    pub fn get_fresh<T: DeserializeOwned>(
        &self,
        key: &str,
        ttl: Duration,
        eviction: Eviction,
    ) -> Option<T> {
        let raw = self.store.get_raw(key)?;

        let snapshot: CachedSnapshot<T> = match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!("Dropping corrupt cache entry {}: {}", key, err);
                self.store.remove(key);
                return None;
            }
        };

        if snapshot.is_fresh(ttl) {
            return Some(snapshot.data);
        }

        debug!("Cache entry {} is stale", key);
        if eviction == Eviction::RemoveStale {
            self.store.remove(key);
        }
        None
    }

    /// Degraded read: returns whatever is stored, ignoring TTL. Used
    /// only as a fallback after a live refetch failed.
    pub fn get_stale<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.get_raw(key)?;
        match serde_json::from_str::<CachedSnapshot<T>>(&raw) {
            Ok(snapshot) => Some(snapshot.data),
            Err(err) => {
                warn!("Unreadable cache entry {}: {}", key, err);
                None
            }
        }
    }

    /// Writes `{data, timestamp: now}`, overwriting any existing entry.
    /// Storage failures (quota and the like) are logged and swallowed;
    /// a failed cache write must never fail the fetch that produced the
    /// data.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) {
        let snapshot = CachedSnapshot::taken_now(value);
        match serde_json::to_string(&snapshot) {
            Ok(raw) => {
                if let Err(err) = self.store.set_raw(key, &raw) {
                    warn!("Failed to cache {}: {}", key, err);
                }
            }
            Err(err) => warn!("Failed to serialize cache entry {}: {}", key, err),
        }
    }

    /// Best-effort removal, surfaced as a success flag rather than an
    /// error.
    pub fn clear(&self, key: &str) -> bool {
        self.store.remove(key)
    }
}
