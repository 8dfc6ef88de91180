use serde::{Deserialize, Serialize};

//
// ──────────────────────────────────────────────────────────
// Portfolio record
// ──────────────────────────────────────────────────────────
//

/// User-edited portfolio data, owned by the server-side persistence
/// API. Values here override LinkedIn-derived defaults whenever present
/// and non-empty; the client only reads and proposes updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortfolioRecord {
    pub name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub profile_image_url: Option<String>,
    pub cv_url_en: Option<String>,
    pub cv_url_de: Option<String>,
    pub social: SocialLinks,
}

/// Social links may hold a full URL or a bare handle; normalization
/// happens where the link is consumed, not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialLinks {
    pub github: Option<String>,
    pub linkedin: Option<String>,
}

//
// ──────────────────────────────────────────────────────────
// View context
// ──────────────────────────────────────────────────────────
//

/// Who the aggregated view is being assembled for.
///
/// Decided once at the boundary and threaded through the aggregation
/// entry point; never re-derived from a URL mid-pipeline. The owner
/// path reads the authenticated `/portfolio` endpoint, the public path
/// the unauthenticated per-username one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewContext {
    Owner,
    PublicVisitor { username: String },
}
