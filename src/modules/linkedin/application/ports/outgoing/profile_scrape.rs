use async_trait::async_trait;

use crate::modules::linkedin::domain::entities::LinkedInProfile;

//
// ──────────────────────────────────────────────────────────
// Outgoing port: LinkedIn scraping proxy
// ──────────────────────────────────────────────────────────
//

/// The three failure modes must stay distinguishable; the presentation
/// layer shows a different message for each.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProfileScrapeError {
    #[error("LinkedIn API token is missing or invalid. Check the scraper token in the admin settings.")]
    MissingApiToken,

    #[error("LinkedIn scrape timed out")]
    Timeout,

    #[error("LinkedIn scrape failed: {0}")]
    ScrapeFailed(String),
}

/// Access to the scraping proxy. A call is expensive (paid per scrape)
/// and may legitimately take tens of seconds; callers are expected to
/// cache-guard it.
#[async_trait]
pub trait ProfileScrape: Send + Sync {
    async fn scrape(&self, profile_url: &str) -> Result<LinkedInProfile, ProfileScrapeError>;
}
