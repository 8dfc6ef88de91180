use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::modules::github::domain::entities::SkillsBreakdown;
use crate::modules::linkedin::domain::entities::{
    EducationEntry, ExperienceEntry, LanguageProficiency,
};
use crate::modules::portfolio::application::services::field_precedence::ResolvedField;
use crate::modules::portfolio::domain::entities::SocialLinks;
use crate::shared::status::LoadState;

//
// ──────────────────────────────────────────────────────────
// View model
// ──────────────────────────────────────────────────────────
//

/// A value in both display languages. German is machine-translated
/// best-effort; it is never blank when the English text exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Bilingual {
    pub en: String,
    pub de: String,
}

impl Bilingual {
    pub fn same(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            en: text.clone(),
            de: text,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.en.is_empty() && self.de.is_empty()
    }
}

/// One visible project, ready to render.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectCard {
    pub title: Bilingual,
    pub description: Bilingual,
    pub tags: Vec<String>,
    pub repo_url: String,
    pub live_url: Option<String>,
    pub video_url: Option<String>,
    pub stars: u32,
    pub forks: u32,
    /// Always `false` for dynamically aggregated projects; repos are
    /// never auto-featured.
    pub featured: bool,
    pub pushed_at: Option<DateTime<Utc>>,
}

/// The assembled page model. Every section carries its own
/// [`LoadState`]; the presentation layer renders states, it never
/// classifies errors itself.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioView {
    pub name: ResolvedField,
    pub title: ResolvedField,
    pub profile_image_url: ResolvedField,
    pub bio: Bilingual,

    pub skills: SkillsBreakdown,
    pub projects: Vec<ProjectCard>,
    pub experiences: Vec<ExperienceEntry>,
    pub educations: Vec<EducationEntry>,
    pub languages: Vec<LanguageProficiency>,

    pub cv_url_en: Option<String>,
    pub cv_url_de: Option<String>,
    pub social: SocialLinks,

    pub portfolio_state: LoadState,
    pub skills_state: LoadState,
    pub projects_state: LoadState,
    pub linkedin_state: LoadState,
}
