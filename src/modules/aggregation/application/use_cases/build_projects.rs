use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::modules::aggregation::domain::view_model::{Bilingual, ProjectCard};
use crate::modules::github::domain::entities::RepositorySummary;
use crate::modules::visibility::application::visibility_policy::VisibilityPolicy;
use crate::shared::text::title_case_from_kebab;

//
// ──────────────────────────────────────────────────────────
// Video URL extraction
// ──────────────────────────────────────────────────────────
//

fn youtube_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"https?://(?:www\.)?(?:youtube\.com/watch\?v=[\w-]+|youtube\.com/shorts/[\w-]+|youtu\.be/[\w-]+)",
        )
        .expect("youtube regex is valid")
    })
}

/// First embedded YouTube URL in a repository description, if any.
pub fn extract_video_url(description: &str) -> Option<String> {
    youtube_regex()
        .find(description)
        .map(|m| m.as_str().to_string())
}

//
// ──────────────────────────────────────────────────────────
// Project list construction
// ──────────────────────────────────────────────────────────
//

const MAX_TOPIC_TAGS: usize = 3;

/// Turns repository snapshots into the visible project list.
///
/// Filter order: forks, private repos and "fork"-named repos are never
/// shown; everything else goes through the visibility policy. The
/// resulting cards sort by the featured flag first (kept for a complete
/// comparator even though aggregation never sets it) and last-pushed
/// time second, newest first.
pub struct BuildProjectsService {
    policy: VisibilityPolicy,
}

impl BuildProjectsService {
    pub fn new(policy: VisibilityPolicy) -> Self {
        Self { policy }
    }

    pub fn execute(&self, repos: &[RepositorySummary]) -> Vec<ProjectCard> {
        let mut cards: Vec<ProjectCard> = repos
            .iter()
            .filter(|repo| {
                !repo.fork && !repo.is_private && !repo.name.to_lowercase().contains("fork")
            })
            .filter(|repo| self.policy.is_visible(&repo.name, Some(repo)))
            .map(build_card)
            .collect();

        cards.sort_by(|a, b| {
            b.featured
                .cmp(&a.featured)
                .then(b.pushed_at.cmp(&a.pushed_at))
        });

        debug!("Built {} visible projects from {} repos", cards.len(), repos.len());
        cards
    }
}

fn build_card(repo: &RepositorySummary) -> ProjectCard {
    let description = repo.description.clone().unwrap_or_default();

    ProjectCard {
        title: Bilingual::same(title_case_from_kebab(&repo.name)),
        description: Bilingual::same(description.as_str()),
        tags: build_tags(repo),
        repo_url: repo.html_url.clone(),
        live_url: repo
            .homepage
            .clone()
            .filter(|url| !url.trim().is_empty()),
        video_url: extract_video_url(&description),
        stars: repo.stargazers_count,
        forks: repo.forks_count,
        featured: false,
        pushed_at: repo.pushed_at,
    }
}

fn build_tags(repo: &RepositorySummary) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();

    if let Some(language) = repo.language.as_deref() {
        if !language.trim().is_empty() {
            tags.push(language.trim().to_string());
        }
    }

    for topic in repo.topics.iter().take(MAX_TOPIC_TAGS) {
        let formatted = title_case_from_kebab(topic);
        if formatted.is_empty() {
            continue;
        }
        if tags.iter().any(|t| t.eq_ignore_ascii_case(&formatted)) {
            continue;
        }
        tags.push(formatted);
    }

    if tags.is_empty() {
        tags.push("Project".to_string());
    }
    tags
}
