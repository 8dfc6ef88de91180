use async_trait::async_trait;
use tracing::debug;

use crate::modules::aggregation::domain::view_model::Bilingual;
use crate::modules::linkedin::application::services::quality::profile_is_usable;
use crate::modules::linkedin::domain::entities::{ExperienceEntry, LinkedInProfile};
use crate::modules::translation::application::ports::outgoing::Translator;
use crate::shared::text::is_blank;

//
// ──────────────────────────────────────────────────────────
// English bio derivation (pure)
// ──────────────────────────────────────────────────────────
//

/// Terminal fallback of the derivation chain, reached only when the
/// quality gate passed on an experience entry that itself carries no
/// usable text.
const FALLBACK_BIO: &str = "Software developer.";

const MAX_BIO_SKILLS: usize = 5;

fn experience_sentence(exp: &ExperienceEntry) -> Option<String> {
    match (exp.title.as_deref(), exp.company.as_deref()) {
        (Some(title), Some(company)) if !title.trim().is_empty() && !company.trim().is_empty() => {
            Some(format!("Currently working as {} at {}.", title.trim(), company.trim()))
        }
        (Some(title), _) if !title.trim().is_empty() => {
            Some(format!("Currently working as {}.", title.trim()))
        }
        (_, Some(company)) if !company.trim().is_empty() => {
            Some(format!("Currently at {}.", company.trim()))
        }
        _ => None,
    }
}

/// Derive the English bio text from a profile.
///
/// Source order: explicit summary, explicit about, synthesized
/// "{name} - {headline}", synthesized from the most recent experience,
/// fixed default. Only the name+headline synthesis gets the appendix
/// paragraphs (experience, top skills, location, education), and each
/// paragraph is appended only when its content is not already present
/// in the text.
pub fn derive_english_bio(profile: &LinkedInProfile) -> String {
    if let Some(summary) = profile.summary.as_deref() {
        if !summary.trim().is_empty() {
            return summary.trim().to_string();
        }
    }
    if let Some(about) = profile.about.as_deref() {
        if !about.trim().is_empty() {
            return about.trim().to_string();
        }
    }

    let name = profile.name.as_deref().unwrap_or("").trim();
    let headline = profile.headline.as_deref().unwrap_or("").trim();
    if !name.is_empty() && !headline.is_empty() {
        let mut bio = format!("{} - {}", name, headline);
        append_paragraphs(&mut bio, profile);
        return bio;
    }

    if let Some(sentence) = profile.experiences.first().and_then(experience_sentence) {
        return sentence;
    }

    FALLBACK_BIO.to_string()
}

fn append_paragraphs(bio: &mut String, profile: &LinkedInProfile) {
    if let Some(sentence) = profile.experiences.first().and_then(experience_sentence) {
        append_unless_present(bio, &sentence);
    }

    let skills: Vec<&str> = profile
        .skills
        .iter()
        .map(String::as_str)
        .filter(|s| !s.trim().is_empty())
        .take(MAX_BIO_SKILLS)
        .collect();
    if !skills.is_empty() {
        append_unless_present(bio, &format!("Skilled in {}.", skills.join(", ")));
    }

    if let Some(location) = profile.location.as_deref() {
        if !location.trim().is_empty() {
            append_unless_present(bio, &format!("Based in {}.", location.trim()));
        }
    }

    if let Some(education) = profile.educations.first() {
        let sentence = match (education.degree.as_deref(), education.school.as_deref()) {
            (Some(degree), Some(school))
                if !degree.trim().is_empty() && !school.trim().is_empty() =>
            {
                Some(format!("{} at {}.", degree.trim(), school.trim()))
            }
            (_, Some(school)) if !school.trim().is_empty() => {
                Some(format!("Studied at {}.", school.trim()))
            }
            _ => None,
        };
        if let Some(sentence) = sentence {
            append_unless_present(bio, &sentence);
        }
    }
}

fn append_unless_present(bio: &mut String, paragraph: &str) {
    if !bio.contains(paragraph) {
        bio.push_str("\n\n");
        bio.push_str(paragraph);
    }
}

//
// ──────────────────────────────────────────────────────────
// Incoming port (use case)
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait IDeriveBioUseCase: Send + Sync {
    /// Bilingual bio from a scraped profile. An unusable profile yields
    /// an empty bio — content is never fabricated.
    async fn execute(&self, profile: &LinkedInProfile) -> Bilingual;

    /// Bilingual bio from user-edited English text (the precedence
    /// path where the portfolio record already carries a bio).
    async fn from_text(&self, english: &str) -> Bilingual;
}

//
// ──────────────────────────────────────────────────────────
// Service implementation
// ──────────────────────────────────────────────────────────
//

/// Sequenced after the profile fetch; the German text is best-effort
/// translation and falls back to the English text verbatim, so it is
/// never blank when the English bio exists.
pub struct DeriveBioService<T>
where
    T: Translator,
{
    translator: T,
}

impl<T> DeriveBioService<T>
where
    T: Translator,
{
    pub fn new(translator: T) -> Self {
        Self { translator }
    }

    async fn bilingual(&self, english: String) -> Bilingual {
        if english.is_empty() {
            return Bilingual::default();
        }
        let german = self.translator.translate(&english, "en", "de").await;
        let german = if german.trim().is_empty() {
            english.clone()
        } else {
            german
        };
        Bilingual {
            en: english,
            de: german,
        }
    }
}

#[async_trait]
impl<T> IDeriveBioUseCase for DeriveBioService<T>
where
    T: Translator + Send + Sync,
{
    async fn execute(&self, profile: &LinkedInProfile) -> Bilingual {
        if !profile_is_usable(profile) {
            debug!("Profile failed the quality gate, returning empty bio");
            return Bilingual::default();
        }
        self.bilingual(derive_english_bio(profile)).await
    }

    async fn from_text(&self, english: &str) -> Bilingual {
        if is_blank(Some(english)) {
            return Bilingual::default();
        }
        self.bilingual(english.trim().to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::modules::linkedin::domain::entities::EducationEntry;

    /* --------------------------------------------------
     * Mock Translator
     * -------------------------------------------------- */

    struct MockTranslator {
        /// `None` simulates a failed translation (adapter returns the
        /// source text).
        translation: Option<String>,
    }

    #[async_trait]
    impl Translator for MockTranslator {
        async fn translate(&self, text: &str, _source: &str, _target: &str) -> String {
            self.translation.clone().unwrap_or_else(|| text.to_string())
        }
    }

    fn working_translator() -> MockTranslator {
        MockTranslator {
            translation: Some("Übersetzt.".to_string()),
        }
    }

    fn failing_translator() -> MockTranslator {
        MockTranslator { translation: None }
    }

    /* --------------------------------------------------
     * Helpers
     * -------------------------------------------------- */

    fn named_profile() -> LinkedInProfile {
        LinkedInProfile {
            name: Some("Alice".to_string()),
            headline: Some("Android Developer".to_string()),
            ..Default::default()
        }
    }

    /* --------------------------------------------------
     * Pure derivation
     * -------------------------------------------------- */

    #[test]
    fn summary_wins_and_gets_no_appendices() {
        let mut profile = named_profile();
        profile.summary = Some("I build Android apps.".to_string());
        profile.location = Some("Berlin".to_string());

        assert_eq!(derive_english_bio(&profile), "I build Android apps.");
    }

    #[test]
    fn about_is_the_second_choice() {
        let mut profile = named_profile();
        profile.about = Some("About me.".to_string());
        assert_eq!(derive_english_bio(&profile), "About me.");
    }

    #[test]
    fn name_headline_synthesis_appends_detail_paragraphs() {
        let mut profile = named_profile();
        profile.experiences = vec![ExperienceEntry {
            title: Some("Engineer".to_string()),
            company: Some("Acme".to_string()),
            ..Default::default()
        }];
        profile.skills = vec!["Kotlin".to_string(), "Rust".to_string()];
        profile.location = Some("Berlin".to_string());
        profile.educations = vec![EducationEntry {
            school: Some("TU Berlin".to_string()),
            degree: Some("B.Sc.".to_string()),
            ..Default::default()
        }];

        let bio = derive_english_bio(&profile);
        let paragraphs: Vec<&str> = bio.split("\n\n").collect();
        assert_eq!(
            paragraphs,
            vec![
                "Alice - Android Developer",
                "Currently working as Engineer at Acme.",
                "Skilled in Kotlin, Rust.",
                "Based in Berlin.",
                "B.Sc. at TU Berlin."
            ]
        );
    }

    #[test]
    fn already_present_content_is_not_appended_twice() {
        let mut profile = named_profile();
        profile.headline = Some("Based in Berlin.".to_string());
        profile.location = Some("Berlin".to_string());

        let bio = derive_english_bio(&profile);
        assert_eq!(bio.matches("Based in Berlin.").count(), 1);
    }

    #[test]
    fn experience_synthesis_when_name_is_missing() {
        let profile = LinkedInProfile {
            experiences: vec![ExperienceEntry {
                title: Some("Engineer".to_string()),
                company: Some("Acme".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };

        assert_eq!(
            derive_english_bio(&profile),
            "Currently working as Engineer at Acme."
        );
    }

    /* --------------------------------------------------
     * Bilingual service
     * -------------------------------------------------- */

    #[tokio::test]
    async fn empty_profile_yields_empty_bio() {
        let service = DeriveBioService::new(working_translator());
        let bio = service.execute(&LinkedInProfile::default()).await;
        assert_eq!(bio, Bilingual::default());
    }

    #[tokio::test]
    async fn german_side_is_the_translation() {
        let service = DeriveBioService::new(working_translator());
        let mut profile = named_profile();
        profile.summary = Some("I build apps.".to_string());

        let bio = service.execute(&profile).await;
        assert_eq!(bio.en, "I build apps.");
        assert_eq!(bio.de, "Übersetzt.");
    }

    #[tokio::test]
    async fn failed_translation_falls_back_to_english() {
        let service = DeriveBioService::new(failing_translator());
        let mut profile = named_profile();
        profile.summary = Some("I build apps.".to_string());

        let bio = service.execute(&profile).await;
        assert_eq!(bio.de, "I build apps.");
    }

    #[tokio::test]
    async fn user_edited_text_path() {
        let service = DeriveBioService::new(working_translator());
        let bio = service.from_text("  Hand-written bio.  ").await;
        assert_eq!(bio.en, "Hand-written bio.");
        assert_eq!(bio.de, "Übersetzt.");

        assert_eq!(service.from_text("   ").await, Bilingual::default());
    }
}
