use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

//
// ──────────────────────────────────────────────────────────
// Repository snapshot
// ──────────────────────────────────────────────────────────
//

/// Immutable snapshot of one GitHub repository, as served by the
/// repository proxy. Field names follow the GitHub REST payload so the
/// proxy can pass responses through unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fork: bool,
    #[serde(rename = "private", default)]
    pub is_private: bool,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub homepage: Option<String>,
}

//
// ──────────────────────────────────────────────────────────
// Derived skills
// ──────────────────────────────────────────────────────────
//

/// Two disjoint frequency-ranked lists derived from the repository
/// collection. Regenerated from snapshots, cached independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillsBreakdown {
    pub programming_languages: Vec<String>,
    pub other_skills: Vec<String>,
}

impl SkillsBreakdown {
    pub fn is_empty(&self) -> bool {
        self.programming_languages.is_empty() && self.other_skills.is_empty()
    }
}
