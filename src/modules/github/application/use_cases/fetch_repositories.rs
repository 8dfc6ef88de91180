use async_trait::async_trait;
use chrono::Duration;
use tracing::{debug, info};

use crate::modules::cache::application::snapshot_store::{Eviction, SnapshotStore};
use crate::modules::cache::domain::entities::keys;
use crate::modules::github::application::ports::outgoing::repository_query::{
    RepositoryQuery, RepositoryQueryError,
};
use crate::modules::github::domain::entities::RepositorySummary;

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchRepositoriesError {
    #[error("{0}")]
    Upstream(String),
}

impl From<RepositoryQueryError> for FetchRepositoriesError {
    fn from(err: RepositoryQueryError) -> Self {
        match err {
            RepositoryQueryError::Network(msg) => FetchRepositoriesError::Upstream(msg),
            RepositoryQueryError::BadPayload(msg) => FetchRepositoriesError::Upstream(msg),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Incoming port (use case)
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait IFetchRepositoriesUseCase: Send + Sync {
    async fn execute(
        &self,
        username: &str,
    ) -> Result<Vec<RepositorySummary>, FetchRepositoriesError>;
}

//
// ──────────────────────────────────────────────────────────
// Service implementation
// ──────────────────────────────────────────────────────────
//

fn repos_ttl() -> Duration {
    Duration::hours(24)
}

/// Cache-guarded repository fetch.
///
/// A fresh snapshot short-circuits the proxy call. On a miss the live
/// result is written back before being returned. Repositories are cheap
/// to refetch, so there is no stale-fallback here (that treatment is
/// reserved for the LinkedIn snapshot).
pub struct FetchRepositoriesService<Q>
where
    Q: RepositoryQuery,
{
    query: Q,
    cache: SnapshotStore,
}

impl<Q> FetchRepositoriesService<Q>
where
    Q: RepositoryQuery,
{
    pub fn new(query: Q, cache: SnapshotStore) -> Self {
        Self { query, cache }
    }
}

#[async_trait]
impl<Q> IFetchRepositoriesUseCase for FetchRepositoriesService<Q>
where
    Q: RepositoryQuery + Send + Sync,
{
    async fn execute(
        &self,
        username: &str,
    ) -> Result<Vec<RepositorySummary>, FetchRepositoriesError> {
        if let Some(cached) =
            self.cache
                .get_fresh::<Vec<RepositorySummary>>(keys::GITHUB_REPOS, repos_ttl(), Eviction::RemoveStale)
        {
            debug!("Serving {} repositories from cache", cached.len());
            return Ok(cached);
        }

        let repos = self.query.fetch_repositories(username).await?;
        info!("Fetched {} repositories for {}", repos.len(), username);
        self.cache.put(keys::GITHUB_REPOS, &repos);
        Ok(repos)
    }
}
