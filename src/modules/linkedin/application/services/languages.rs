use crate::modules::linkedin::domain::entities::{
    LanguageProficiency, LinkedInProfile, RawLanguageEntry,
};
use crate::shared::text::is_blank;

//
// ──────────────────────────────────────────────────────────
// Language-proficiency normalization
// ──────────────────────────────────────────────────────────
//

/// Keyword -> 2-letter code lookup for the flat-skills fallback path.
/// Anything not listed defaults to the first two letters, uppercased.
const LANGUAGE_KEYWORDS: &[(&str, &str)] = &[
    ("German", "DE"),
    ("English", "EN"),
    ("French", "FR"),
    ("Spanish", "ES"),
    ("Arabic", "AR"),
    ("Chinese", "ZH"),
];

const CEFR_LEVELS: &[&str] = &["A1", "A2", "B1", "B2", "C1", "C2"];

/// Extract the profile's language proficiencies.
///
/// Precedence: the structured `languages` array when present; otherwise
/// the flat `skills` list is scanned for known language keywords.
pub fn normalize_languages(profile: &LinkedInProfile) -> Vec<LanguageProficiency> {
    if !profile.languages.is_empty() {
        return profile
            .languages
            .iter()
            .filter_map(normalize_raw_entry)
            .collect();
    }

    languages_from_skills(&profile.skills)
}

/// Normalize one structured entry, whatever upstream shape it uses.
///
/// Field precedence, in order:
/// 1. display name: `language`, else `name`;
/// 2. code: explicit `code`, else first two letters of the name,
///    uppercased;
/// 3. level and certificate: substring search over `proficiency`.
fn normalize_raw_entry(entry: &RawLanguageEntry) -> Option<LanguageProficiency> {
    let name = entry
        .language
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .or(entry.name.as_deref().filter(|v| !v.trim().is_empty()))?
        .trim()
        .to_string();

    let code = match entry.code.as_deref().filter(|c| !c.trim().is_empty()) {
        Some(code) => code.trim().to_uppercase(),
        None => default_code(&name),
    };

    let proficiency = entry.proficiency.as_deref().unwrap_or("");
    Some(LanguageProficiency {
        code,
        name,
        level: extract_cefr_level(proficiency),
        certificate: mentions_certificate(proficiency),
    })
}

fn languages_from_skills(skills: &[String]) -> Vec<LanguageProficiency> {
    let mut found = Vec::new();

    for skill in skills {
        if is_blank(Some(skill)) {
            continue;
        }
        let lowered = skill.to_lowercase();
        for (keyword, code) in LANGUAGE_KEYWORDS {
            if !lowered.contains(&keyword.to_lowercase()) {
                continue;
            }
            // One entry per language, first mention wins.
            if found
                .iter()
                .any(|l: &LanguageProficiency| l.code == *code)
            {
                continue;
            }
            found.push(LanguageProficiency {
                code: code.to_string(),
                name: keyword.to_string(),
                level: extract_cefr_level(skill),
                certificate: mentions_certificate(skill),
            });
        }
    }

    found
}

fn default_code(name: &str) -> String {
    LANGUAGE_KEYWORDS
        .iter()
        .find(|(keyword, _)| keyword.eq_ignore_ascii_case(name))
        .map(|(_, code)| code.to_string())
        .unwrap_or_else(|| name.chars().take(2).collect::<String>().to_uppercase())
}

fn extract_cefr_level(text: &str) -> Option<String> {
    let upper = text.to_uppercase();
    CEFR_LEVELS
        .iter()
        .find(|level| upper.contains(*level))
        .map(|level| level.to_string())
}

fn mentions_certificate(text: &str) -> bool {
    let lowered = text.to_lowercase();
    lowered.contains("telc") || lowered.contains("certificate")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_with_languages(languages: Vec<RawLanguageEntry>) -> LinkedInProfile {
        LinkedInProfile {
            languages,
            ..Default::default()
        }
    }

    fn profile_with_skills(skills: &[&str]) -> LinkedInProfile {
        LinkedInProfile {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn structured_entries_take_precedence_over_skills() {
        let mut profile = profile_with_skills(&["German C1"]);
        profile.languages = vec![RawLanguageEntry {
            language: Some("English".to_string()),
            proficiency: Some("Native".to_string()),
            ..Default::default()
        }];

        let langs = normalize_languages(&profile);
        assert_eq!(langs.len(), 1);
        assert_eq!(langs[0].name, "English");
        assert_eq!(langs[0].code, "EN");
    }

    #[test]
    fn explicit_code_wins_over_derived_code() {
        let profile = profile_with_languages(vec![RawLanguageEntry {
            code: Some("de".to_string()),
            name: Some("German".to_string()),
            ..Default::default()
        }]);

        let langs = normalize_languages(&profile);
        assert_eq!(langs[0].code, "DE");
    }

    #[test]
    fn unknown_language_defaults_to_first_two_letters() {
        let profile = profile_with_languages(vec![RawLanguageEntry {
            name: Some("Portuguese".to_string()),
            ..Default::default()
        }]);

        let langs = normalize_languages(&profile);
        assert_eq!(langs[0].code, "PO");
    }

    #[test]
    fn entries_without_any_name_are_skipped() {
        let profile = profile_with_languages(vec![RawLanguageEntry {
            proficiency: Some("B2".to_string()),
            ..Default::default()
        }]);

        assert!(normalize_languages(&profile).is_empty());
    }

    #[test]
    fn skills_fallback_extracts_level_and_certificate() {
        let profile = profile_with_skills(&["German - C1 telc certificate", "Rust"]);

        let langs = normalize_languages(&profile);
        assert_eq!(langs.len(), 1);
        assert_eq!(langs[0].code, "DE");
        assert_eq!(langs[0].name, "German");
        assert_eq!(langs[0].level.as_deref(), Some("C1"));
        assert!(langs[0].certificate);
    }

    #[test]
    fn skills_fallback_dedupes_per_language() {
        let profile = profile_with_skills(&["English B2", "Business English"]);

        let langs = normalize_languages(&profile);
        assert_eq!(langs.len(), 1);
        assert_eq!(langs[0].level.as_deref(), Some("B2"));
    }

    #[test]
    fn non_language_skills_are_ignored() {
        let profile = profile_with_skills(&["Kubernetes", "Android"]);
        assert!(normalize_languages(&profile).is_empty());
    }
}
