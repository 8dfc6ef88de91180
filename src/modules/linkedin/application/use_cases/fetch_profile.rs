use async_trait::async_trait;
use chrono::Duration;
use tracing::{debug, info, warn};

use crate::modules::cache::application::snapshot_store::{Eviction, SnapshotStore};
use crate::modules::linkedin::application::ports::outgoing::profile_scrape::{
    ProfileScrape, ProfileScrapeError,
};
use crate::modules::linkedin::application::services::quality::profile_is_usable;
use crate::modules::linkedin::domain::entities::LinkedInProfile;

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchProfileError {
    #[error("LinkedIn API token is missing or invalid. Check the scraper token in the admin settings.")]
    MissingApiToken,

    #[error("LinkedIn scrape timed out")]
    Timeout,

    #[error("LinkedIn scrape failed: {0}")]
    ScrapeFailed(String),

    /// The scrape answered but the payload failed the data-quality
    /// gate. Treated like an upstream failure for bio purposes.
    #[error("LinkedIn returned an unusable profile")]
    UnusableProfile,
}

impl From<ProfileScrapeError> for FetchProfileError {
    fn from(err: ProfileScrapeError) -> Self {
        match err {
            ProfileScrapeError::MissingApiToken => FetchProfileError::MissingApiToken,
            ProfileScrapeError::Timeout => FetchProfileError::Timeout,
            ProfileScrapeError::ScrapeFailed(msg) => FetchProfileError::ScrapeFailed(msg),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Incoming port (use case)
// ──────────────────────────────────────────────────────────
//

/// A successfully obtained profile, flagged when it was served from an
/// expired snapshot after a failed live refetch.
#[derive(Debug, Clone)]
pub struct ProfileFetch {
    pub profile: LinkedInProfile,
    pub degraded: bool,
}

#[async_trait]
pub trait IFetchProfileUseCase: Send + Sync {
    async fn execute(&self, profile_url: &str) -> Result<ProfileFetch, FetchProfileError>;
}

//
// ──────────────────────────────────────────────────────────
// Service implementation
// ──────────────────────────────────────────────────────────
//

fn profile_ttl() -> Duration {
    Duration::days(7)
}

/// Cache-guarded profile fetch with a degraded-fallback path.
///
/// Scrapes are paid and slow, so this is the one place where an expired
/// snapshot is still served: when the live scrape fails (or its result
/// fails the quality gate), the stale entry wins over an empty page.
/// Stale entries are therefore never evicted on read.
///
/// The same service covers the primary and the additional profile; the
/// cache key is injected at construction time.
pub struct FetchProfileService<S>
where
    S: ProfileScrape,
{
    scrape: S,
    cache: SnapshotStore,
    cache_key: String,
}

impl<S> FetchProfileService<S>
where
    S: ProfileScrape,
{
    pub fn new(scrape: S, cache: SnapshotStore, cache_key: impl Into<String>) -> Self {
        Self {
            scrape,
            cache,
            cache_key: cache_key.into(),
        }
    }

    fn stale_fallback(&self) -> Option<ProfileFetch> {
        self.cache
            .get_stale::<LinkedInProfile>(&self.cache_key)
            .map(|profile| {
                warn!("Serving expired LinkedIn snapshot from {}", self.cache_key);
                ProfileFetch {
                    profile,
                    degraded: true,
                }
            })
    }
}

#[async_trait]
impl<S> IFetchProfileUseCase for FetchProfileService<S>
where
    S: ProfileScrape + Send + Sync,
{
    async fn execute(&self, profile_url: &str) -> Result<ProfileFetch, FetchProfileError> {
        if let Some(profile) = self.cache.get_fresh::<LinkedInProfile>(
            &self.cache_key,
            profile_ttl(),
            Eviction::KeepStale,
        ) {
            debug!("Serving LinkedIn profile from cache ({})", self.cache_key);
            return Ok(ProfileFetch {
                profile,
                degraded: false,
            });
        }

        match self.scrape.scrape(profile_url).await {
            Ok(profile) => {
                if profile_is_usable(&profile) {
                    info!("Scraped LinkedIn profile for {}", profile_url);
                    self.cache.put(&self.cache_key, &profile);
                    Ok(ProfileFetch {
                        profile,
                        degraded: false,
                    })
                } else {
                    // Unusable payloads are not cached; the next load
                    // should retry the scrape.
                    warn!("Scraped profile failed the data-quality gate");
                    self.stale_fallback()
                        .ok_or(FetchProfileError::UnusableProfile)
                }
            }
            Err(err) => match self.stale_fallback() {
                Some(fallback) => Ok(fallback),
                None => Err(err.into()),
            },
        }
    }
}
