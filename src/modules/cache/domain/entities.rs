use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

//
// ──────────────────────────────────────────────────────────
// Snapshot envelope
// ──────────────────────────────────────────────────────────
//

/// The envelope every cached value is wrapped in.
///
/// On the wire this is `{"data": ..., "timestamp": "..."}`. The
/// timestamp is the fetch time; freshness is always decided against it,
/// never against storage metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedSnapshot<T> {
    pub data: T,
    pub timestamp: DateTime<Utc>,
}

impl<T> CachedSnapshot<T> {
    pub fn taken_now(data: T) -> Self {
        Self {
            data,
            timestamp: Utc::now(),
        }
    }

    /// A snapshot is fresh iff `now - timestamp <= ttl`.
    pub fn is_fresh(&self, ttl: chrono::Duration) -> bool {
        Utc::now() - self.timestamp <= ttl
    }
}

//
// ──────────────────────────────────────────────────────────
// Cache keys
// ──────────────────────────────────────────────────────────
//

/// Per-kind key namespace. These are the exact keys the stored state
/// lives under; changing one orphans previously written entries.
pub mod keys {
    pub const GITHUB_REPOS: &str = "github_repos_cache_v1";
    pub const GITHUB_SKILLS: &str = "github_skills_cache";
    pub const LINKEDIN_PROFILE: &str = "linkedin_profile_cache_v1";
    pub const LINKEDIN_ADDITIONAL_PROFILE: &str = "linkedin_additional_profile_cache_v1";
    pub const PROJECT_VISIBILITY: &str = "project_visibility_settings";
    pub const AUTH_TOKEN: &str = "auth_token";

    const LINKEDIN_COMPANY_PREFIX: &str = "linkedin_company_cache_v1_";

    /// Company snapshots are keyed per domain to avoid collisions.
    pub fn linkedin_company_cache_key(domain: &str) -> String {
        format!("{}{}", LINKEDIN_COMPANY_PREFIX, domain)
    }
}
