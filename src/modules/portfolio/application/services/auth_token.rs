use std::sync::Arc;

use tracing::warn;

use crate::modules::cache::application::ports::outgoing::KeyValueStore;
use crate::modules::cache::domain::entities::keys;

//
// ──────────────────────────────────────────────────────────
// Bearer token persistence
// ──────────────────────────────────────────────────────────
//

/// The bearer token under its fixed storage key.
///
/// The token is an opaque string; issuing and validating it is the
/// persistence API's business (auth protocol design is out of scope
/// here). Stored raw, not wrapped in a snapshot envelope — it has no
/// TTL on this side.
#[derive(Clone)]
pub struct AuthTokenStore {
    store: Arc<dyn KeyValueStore>,
}

impl AuthTokenStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn get(&self) -> Option<String> {
        self.store
            .get_raw(keys::AUTH_TOKEN)
            .filter(|token| !token.trim().is_empty())
    }

    pub fn set(&self, token: &str) {
        if let Err(err) = self.store.set_raw(keys::AUTH_TOKEN, token) {
            warn!("Failed to persist auth token: {}", err);
        }
    }

    pub fn clear(&self) -> bool {
        self.store.remove(keys::AUTH_TOKEN)
    }
}
