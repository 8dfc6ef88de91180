use async_trait::async_trait;

use crate::modules::github::domain::entities::RepositorySummary;

//
// ──────────────────────────────────────────────────────────
// Outgoing port: repository proxy
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum RepositoryQueryError {
    /// Non-2xx or transport failure. The message carries the upstream
    /// status code so the surfaced error names it.
    #[error("Repository proxy error: {0}")]
    Network(String),

    #[error("Repository proxy returned an unexpected payload: {0}")]
    BadPayload(String),
}

/// Read access to the server-side repository proxy.
///
/// The proxy exists so the browser-equivalent client never talks to
/// GitHub directly; server-side caching and rate-limit shielding live
/// behind it.
#[async_trait]
pub trait RepositoryQuery: Send + Sync {
    async fn fetch_repositories(
        &self,
        username: &str,
    ) -> Result<Vec<RepositorySummary>, RepositoryQueryError>;
}
