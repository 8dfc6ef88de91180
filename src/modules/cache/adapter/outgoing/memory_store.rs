use std::collections::HashMap;
use std::sync::Mutex;

use crate::modules::cache::application::ports::outgoing::key_value_store::{
    KeyValueStore, StoreError,
};

/// In-memory implementation of [`KeyValueStore`].
///
/// Default backend for tests and for embedding the aggregator without
/// durable state. Nothing survives the process.
#[derive(Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("store mutex poisoned")
            .get(key)
            .cloned()
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .expect("store mutex poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> bool {
        self.entries
            .lock()
            .expect("store mutex poisoned")
            .remove(key)
            .is_some()
    }
}
