//
// ──────────────────────────────────────────────────────────
// Outgoing port: key/value persistence
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("Write failed: {0}")]
    WriteFailed(String),
}

/// Flat string key/value persistence, the shape of browser local
/// storage. The modeled backend is synchronous, so the port is too:
/// every call completes within the caller's turn, which is what makes
/// the read-then-write cache paths race-free without locking.
///
/// Adapters: `InMemoryStore` for tests and defaults, `JsonFileStore`
/// for durable state. Two processes racing on the same key is
/// last-write-wins by design.
pub trait KeyValueStore: Send + Sync {
    /// Returns the raw stored string, or `None` if absent.
    fn get_raw(&self, key: &str) -> Option<String>;

    /// Overwrites any existing entry.
    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes an entry. Returns `false` when the key was absent or the
    /// backend refused; callers treat removal as best-effort.
    fn remove(&self, key: &str) -> bool;
}
