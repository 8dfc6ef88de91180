use crate::modules::linkedin::domain::entities::LinkedInProfile;
use crate::shared::text::is_blank;

//
// ──────────────────────────────────────────────────────────
// Data-quality gate
// ──────────────────────────────────────────────────────────
//

/// Rejects technically-valid but practically-empty scrape results
/// before they are used to synthesize content.
///
/// A profile is usable iff at least one of the following holds:
/// - name AND headline are present,
/// - a summary or about text is present,
/// - at least one experience entry exists.
///
/// A failing gate is treated like an upstream failure downstream: no
/// biographical content is ever fabricated from an unusable payload.
pub fn profile_is_usable(profile: &LinkedInProfile) -> bool {
    let has_identity =
        !is_blank(profile.name.as_deref()) && !is_blank(profile.headline.as_deref());
    let has_text =
        !is_blank(profile.summary.as_deref()) || !is_blank(profile.about.as_deref());
    let has_experience = !profile.experiences.is_empty();

    has_identity || has_text || has_experience
}
