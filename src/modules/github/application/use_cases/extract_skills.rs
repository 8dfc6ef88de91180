use async_trait::async_trait;
use chrono::Duration;
use tracing::debug;

use crate::modules::cache::application::snapshot_store::{Eviction, SnapshotStore};
use crate::modules::cache::domain::entities::keys;
use crate::modules::github::application::use_cases::fetch_repositories::{
    FetchRepositoriesError, IFetchRepositoriesUseCase,
};
use crate::modules::github::domain::entities::{RepositorySummary, SkillsBreakdown};
use crate::shared::text::title_case_from_kebab;

//
// ──────────────────────────────────────────────────────────
// Classification
// ──────────────────────────────────────────────────────────
//

/// Fixed allow-list of known programming-language names. Membership is
/// checked case-insensitively; the canonical spelling here is what gets
/// displayed, so a `kotlin` topic and a `Kotlin` language field count
/// as the same skill.
const PROGRAMMING_LANGUAGES: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "Python",
    "Java",
    "Kotlin",
    "Swift",
    "C",
    "C++",
    "C#",
    "Go",
    "Rust",
    "Ruby",
    "PHP",
    "Scala",
    "Dart",
    "R",
    "Perl",
    "Haskell",
    "Elixir",
    "Clojure",
    "Lua",
    "Objective-C",
    "Shell",
    "HTML",
    "CSS",
    "SQL",
    "MATLAB",
];

const MAX_LANGUAGES: usize = 15;
const MAX_OTHER_SKILLS: usize = 20;

fn known_language(term: &str) -> Option<&'static str> {
    PROGRAMMING_LANGUAGES
        .iter()
        .find(|candidate| candidate.eq_ignore_ascii_case(term))
        .copied()
}

//
// ──────────────────────────────────────────────────────────
// Pure extraction
// ──────────────────────────────────────────────────────────
//

struct SkillCounter {
    // Insertion-ordered; the stable sort below makes first-seen the
    // tiebreak, which is what keeps the output deterministic.
    entries: Vec<(String, String, usize)>, // (lowercase key, display, count)
}

impl SkillCounter {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn bump(&mut self, display: &str) {
        let key = display.to_ascii_lowercase();
        match self.entries.iter_mut().find(|(k, _, _)| *k == key) {
            Some(entry) => entry.2 += 1,
            None => self.entries.push((key, display.to_string(), 1)),
        }
    }

    fn ranked(mut self, limit: usize) -> Vec<String> {
        self.entries.sort_by(|a, b| b.2.cmp(&a.2));
        self.entries
            .into_iter()
            .take(limit)
            .map(|(_, display, _)| display)
            .collect()
    }
}

/// Derive the frequency-ranked skills breakdown from a repository list.
///
/// Topics are preferred as the richer source (they encode frameworks
/// the bare language field cannot), but the language field is counted
/// as well so a repository without topics still contributes.
pub fn extract_skills(repos: &[RepositorySummary]) -> SkillsBreakdown {
    let mut languages = SkillCounter::new();
    let mut other = SkillCounter::new();

    for repo in repos {
        for topic in &repo.topics {
            let formatted = title_case_from_kebab(topic);
            if formatted.is_empty() {
                continue;
            }
            match known_language(&formatted) {
                Some(canonical) => languages.bump(canonical),
                None => other.bump(&formatted),
            }
        }

        if let Some(language) = repo.language.as_deref() {
            if !language.trim().is_empty() {
                match known_language(language) {
                    Some(canonical) => languages.bump(canonical),
                    None => other.bump(language),
                }
            }
        }
    }

    SkillsBreakdown {
        programming_languages: languages.ranked(MAX_LANGUAGES),
        other_skills: other.ranked(MAX_OTHER_SKILLS),
    }
}

//
// ──────────────────────────────────────────────────────────
// Incoming port (use case)
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum ExtractSkillsError {
    #[error("{0}")]
    Upstream(String),
}

impl From<FetchRepositoriesError> for ExtractSkillsError {
    fn from(err: FetchRepositoriesError) -> Self {
        match err {
            FetchRepositoriesError::Upstream(msg) => ExtractSkillsError::Upstream(msg),
        }
    }
}

#[async_trait]
pub trait IExtractSkillsUseCase: Send + Sync {
    async fn execute(&self, username: &str) -> Result<SkillsBreakdown, ExtractSkillsError>;
}

//
// ──────────────────────────────────────────────────────────
// Service implementation
// ──────────────────────────────────────────────────────────
//

fn skills_ttl() -> Duration {
    Duration::hours(24)
}

/// Cache-guarded skill derivation, layered on the repository fetch use
/// case (which has its own snapshot, so a skills miss right after a
/// repos fetch costs no extra proxy call).
pub struct ExtractSkillsService<F>
where
    F: IFetchRepositoriesUseCase,
{
    fetch_repositories: F,
    cache: SnapshotStore,
}

impl<F> ExtractSkillsService<F>
where
    F: IFetchRepositoriesUseCase,
{
    pub fn new(fetch_repositories: F, cache: SnapshotStore) -> Self {
        Self {
            fetch_repositories,
            cache,
        }
    }
}

#[async_trait]
impl<F> IExtractSkillsUseCase for ExtractSkillsService<F>
where
    F: IFetchRepositoriesUseCase + Send + Sync,
{
    async fn execute(&self, username: &str) -> Result<SkillsBreakdown, ExtractSkillsError> {
        if let Some(cached) = self.cache.get_fresh::<SkillsBreakdown>(
            keys::GITHUB_SKILLS,
            skills_ttl(),
            Eviction::RemoveStale,
        ) {
            debug!("Serving skills breakdown from cache");
            return Ok(cached);
        }

        let repos = self.fetch_repositories.execute(username).await?;
        let skills = extract_skills(&repos);
        self.cache.put(keys::GITHUB_SKILLS, &skills);
        Ok(skills)
    }
}
