use serde::{Deserialize, Serialize};

//
// ──────────────────────────────────────────────────────────
// Scraped profile
// ──────────────────────────────────────────────────────────
//

/// Normalized LinkedIn profile as served by the scraping proxy.
///
/// Everything is optional; the scraper regularly returns partial
/// payloads, which is why the data-quality gate exists before any of
/// this is used to synthesize content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkedInProfile {
    pub name: Option<String>,
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub about: Option<String>,
    pub location: Option<String>,
    pub profile_picture_url: Option<String>,
    pub experiences: Vec<ExperienceEntry>,
    pub educations: Vec<EducationEntry>,
    pub languages: Vec<RawLanguageEntry>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub title: Option<String>,
    pub company: Option<String>,
    pub duration: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationEntry {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub years: Option<String>,
}

/// One entry of the profile's structured `languages` array, in any of
/// the shapes the upstream has been observed to use. Normalization into
/// [`LanguageProficiency`] happens in exactly one place
/// (`services::languages`), with the precedence order made explicit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawLanguageEntry {
    pub code: Option<String>,
    pub language: Option<String>,
    pub name: Option<String>,
    pub proficiency: Option<String>,
}

/// Canonical language-proficiency record used by the view model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageProficiency {
    /// 2-letter code, uppercased (`DE`, `EN`, ...).
    pub code: String,
    pub name: String,
    /// CEFR level token (`A1`..`C2`) when one could be extracted.
    pub level: Option<String>,
    /// Whether a certificate ("telc", "certificate") was mentioned.
    pub certificate: bool,
}
