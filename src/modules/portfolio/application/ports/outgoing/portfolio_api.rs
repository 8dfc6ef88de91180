use async_trait::async_trait;

use crate::modules::portfolio::domain::entities::{PortfolioRecord, ViewContext};

//
// ──────────────────────────────────────────────────────────
// Outgoing port: portfolio persistence API
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum PortfolioApiError {
    #[error("Not authorized. Sign in again to edit the portfolio.")]
    Unauthorized,

    #[error("Portfolio API error: {0}")]
    Network(String),

    #[error("Portfolio API returned an unexpected payload: {0}")]
    BadPayload(String),
}

/// The server-side persistence API, the source of truth for user-edited
/// fields. Reads are context-dependent (owner vs public visitor);
/// writes require a bearer token.
#[async_trait]
pub trait PortfolioApi: Send + Sync {
    /// `Ok(None)` means no record exists yet (404), which is a normal
    /// state for a fresh account, not an error.
    async fn fetch(&self, ctx: &ViewContext) -> Result<Option<PortfolioRecord>, PortfolioApiError>;

    /// Persists a partial record and returns the confirmed full record.
    async fn update(&self, record: &PortfolioRecord) -> Result<PortfolioRecord, PortfolioApiError>;

    /// Uploads a profile image; returns the stored image URL.
    async fn upload_profile_image(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, PortfolioApiError>;
}
