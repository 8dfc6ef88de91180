use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::modules::cache::application::ports::outgoing::KeyValueStore;
use crate::modules::cache::domain::entities::keys;
use crate::modules::github::domain::entities::RepositorySummary;

//
// ──────────────────────────────────────────────────────────
// Visibility policy store
// ──────────────────────────────────────────────────────────
//

/// Per-project visibility overrides layered on the default heuristic.
///
/// The stored mapping (`repo name -> bool`) never expires and is not a
/// snapshot; it is the owner's explicit curation. Resolution order:
/// 1. explicit override, if any;
/// 2. metadata heuristic `stars > 0 || forks > 0`, when metadata is at
///    hand;
/// 3. hidden.
///
/// This three-tier fallback decides what a site visitor sees by
/// default, so it must not be reordered.
#[derive(Clone)]
pub struct VisibilityPolicy {
    store: Arc<dyn KeyValueStore>,
}

impl VisibilityPolicy {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn overrides(&self) -> HashMap<String, bool> {
        let Some(raw) = self.store.get_raw(keys::PROJECT_VISIBILITY) else {
            return HashMap::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!("Ignoring corrupt visibility settings: {}", err);
            HashMap::new()
        })
    }

    fn persist(&self, overrides: &HashMap<String, bool>) {
        match serde_json::to_string(overrides) {
            Ok(raw) => {
                if let Err(err) = self.store.set_raw(keys::PROJECT_VISIBILITY, &raw) {
                    warn!("Failed to persist visibility settings: {}", err);
                }
            }
            Err(err) => warn!("Failed to serialize visibility settings: {}", err),
        }
    }

    pub fn is_visible(&self, repo_name: &str, repo: Option<&RepositorySummary>) -> bool {
        if let Some(explicit) = self.overrides().get(repo_name) {
            return *explicit;
        }
        match repo {
            Some(repo) => repo.stargazers_count > 0 || repo.forks_count > 0,
            None => false,
        }
    }

    /// Upserts the override and persists immediately; no batching.
    pub fn set_visible(&self, repo_name: &str, visible: bool) {
        let mut overrides = self.overrides();
        overrides.insert(repo_name.to_string(), visible);
        self.persist(&overrides);
    }

    /// Drops the override so the heuristic applies again.
    pub fn clear_override(&self, repo_name: &str) {
        let mut overrides = self.overrides();
        if overrides.remove(repo_name).is_some() {
            self.persist(&overrides);
        }
    }
}
