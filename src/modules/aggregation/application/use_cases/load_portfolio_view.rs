use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::modules::aggregation::application::use_cases::build_projects::BuildProjectsService;
use crate::modules::aggregation::application::use_cases::derive_bio::IDeriveBioUseCase;
use crate::modules::aggregation::domain::view_model::{Bilingual, PortfolioView, ProjectCard};
use crate::modules::github::application::use_cases::extract_skills::IExtractSkillsUseCase;
use crate::modules::github::application::use_cases::fetch_repositories::IFetchRepositoriesUseCase;
use crate::modules::github::domain::entities::SkillsBreakdown;
use crate::modules::linkedin::application::services::languages::normalize_languages;
use crate::modules::linkedin::application::services::profile_url::canonical_profile_url;
use crate::modules::linkedin::application::use_cases::fetch_profile::{
    FetchProfileError, IFetchProfileUseCase,
};
use crate::modules::linkedin::domain::entities::LinkedInProfile;
use crate::modules::portfolio::application::ports::outgoing::portfolio_api::{
    PortfolioApi, PortfolioApiError,
};
use crate::modules::portfolio::application::services::field_precedence::{
    resolve_field, ResolvedField,
};
use crate::modules::portfolio::application::services::image_url::resolve_image_url;
use crate::modules::portfolio::domain::entities::{PortfolioRecord, ViewContext};
use crate::shared::status::{ErrorReason, LoadState};
use crate::shared::text::is_blank;

//
// ──────────────────────────────────────────────────────────
// Incoming port (use case)
// ──────────────────────────────────────────────────────────
//

/// Assembles the full page model for one view context.
///
/// This never errors: every upstream failure is absorbed into the
/// per-section [`LoadState`] so a broken source degrades its own section
/// and nothing else.
#[async_trait]
pub trait ILoadPortfolioViewUseCase: Send + Sync {
    async fn execute(&self, ctx: &ViewContext) -> PortfolioView;
}

//
// ──────────────────────────────────────────────────────────
// Service implementation
// ──────────────────────────────────────────────────────────
//

const NO_GITHUB_USERNAME: &str =
    "No GitHub username is configured. Set one in the profile settings.";

pub struct LoadPortfolioViewService {
    api: Arc<dyn PortfolioApi>,
    fetch_repositories: Arc<dyn IFetchRepositoriesUseCase>,
    extract_skills: Arc<dyn IExtractSkillsUseCase>,
    fetch_profile: Arc<dyn IFetchProfileUseCase>,
    /// Secondary profile whose entries get appended to the primary one.
    /// Wired only when an additional profile URL is configured.
    fetch_additional_profile: Option<Arc<dyn IFetchProfileUseCase>>,
    derive_bio: Arc<dyn IDeriveBioUseCase>,
    build_projects: BuildProjectsService,
    config: AppConfig,
}

impl LoadPortfolioViewService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        api: Arc<dyn PortfolioApi>,
        fetch_repositories: Arc<dyn IFetchRepositoriesUseCase>,
        extract_skills: Arc<dyn IExtractSkillsUseCase>,
        fetch_profile: Arc<dyn IFetchProfileUseCase>,
        fetch_additional_profile: Option<Arc<dyn IFetchProfileUseCase>>,
        derive_bio: Arc<dyn IDeriveBioUseCase>,
        build_projects: BuildProjectsService,
        config: AppConfig,
    ) -> Self {
        Self {
            api,
            fetch_repositories,
            extract_skills,
            fetch_profile,
            fetch_additional_profile,
            derive_bio,
            build_projects,
            config,
        }
    }

    async fn load_record(&self, ctx: &ViewContext) -> (PortfolioRecord, LoadState) {
        match self.api.fetch(ctx).await {
            Ok(Some(record)) => (record, LoadState::Ready),
            Ok(None) => (PortfolioRecord::default(), LoadState::Empty),
            Err(err) => {
                warn!("Portfolio record unavailable: {}", err);
                let reason = match err {
                    PortfolioApiError::Unauthorized => ErrorReason::Configuration,
                    _ => ErrorReason::Upstream,
                };
                (
                    PortfolioRecord::default(),
                    LoadState::error(reason, err.to_string()),
                )
            }
        }
    }

    /// GitHub username resolution: explicit configuration first, then
    /// the portfolio record's social link (URL or bare handle).
    fn github_username(&self, record: &PortfolioRecord) -> Option<String> {
        self.config
            .github_username
            .clone()
            .or_else(|| record.social.github.as_deref().map(github_handle))
            .filter(|username| !username.is_empty())
    }

    async fn load_projects_and_skills(
        &self,
        username: Option<&str>,
    ) -> (
        (Vec<ProjectCard>, LoadState),
        (SkillsBreakdown, LoadState),
    ) {
        let Some(username) = username else {
            let missing = || LoadState::error(ErrorReason::Configuration, NO_GITHUB_USERNAME);
            return ((Vec::new(), missing()), (SkillsBreakdown::default(), missing()));
        };

        let (repos, skills) = tokio::join!(
            self.fetch_repositories.execute(username),
            self.extract_skills.execute(username),
        );

        let projects = match repos {
            Ok(repos) => {
                let cards = self.build_projects.execute(&repos);
                let state = if cards.is_empty() {
                    LoadState::Empty
                } else {
                    LoadState::Ready
                };
                (cards, state)
            }
            Err(err) => {
                warn!("Repository fetch failed: {}", err);
                (
                    Vec::new(),
                    LoadState::error(ErrorReason::Upstream, err.to_string()),
                )
            }
        };

        let skills = match skills {
            Ok(skills) => {
                let state = if skills.is_empty() {
                    LoadState::Empty
                } else {
                    LoadState::Ready
                };
                (skills, state)
            }
            Err(err) => {
                warn!("Skill extraction failed: {}", err);
                (
                    SkillsBreakdown::default(),
                    LoadState::error(ErrorReason::Upstream, err.to_string()),
                )
            }
        };

        (projects, skills)
    }

    async fn load_profile(&self, record: &PortfolioRecord) -> (Option<LinkedInProfile>, LoadState) {
        let configured = record
            .social
            .linkedin
            .clone()
            .or_else(|| self.config.linkedin_profile_url.clone());

        let url = match canonical_profile_url(configured.as_deref()) {
            Ok(url) => url,
            Err(err) => {
                return (
                    None,
                    LoadState::error(ErrorReason::Configuration, err.to_string()),
                )
            }
        };

        match self.fetch_profile.execute(&url).await {
            Ok(fetched) => {
                if fetched.degraded {
                    info!("LinkedIn section rendered from an expired snapshot");
                }
                let mut profile = fetched.profile;
                self.merge_additional_profile(&mut profile).await;
                (Some(profile), LoadState::Ready)
            }
            Err(err) => {
                warn!("LinkedIn profile unavailable: {}", err);
                let reason = match err {
                    FetchProfileError::MissingApiToken => ErrorReason::Configuration,
                    FetchProfileError::Timeout | FetchProfileError::ScrapeFailed(_) => {
                        ErrorReason::Upstream
                    }
                    FetchProfileError::UnusableProfile => ErrorReason::DataQuality,
                };
                (None, LoadState::error(reason, err.to_string()))
            }
        }
    }

    /// Appends the additional profile's experiences and educations to
    /// the primary profile. Strictly best-effort: any failure leaves the
    /// primary profile untouched.
    async fn merge_additional_profile(&self, profile: &mut LinkedInProfile) {
        let Some(fetch) = self.fetch_additional_profile.as_ref() else {
            return;
        };
        let Ok(url) =
            canonical_profile_url(self.config.additional_linkedin_profile_url.as_deref())
        else {
            return;
        };

        match fetch.execute(&url).await {
            Ok(extra) => {
                profile.experiences.extend(extra.profile.experiences);
                profile.educations.extend(extra.profile.educations);
            }
            Err(err) => warn!("Additional LinkedIn profile unavailable: {}", err),
        }
    }

    async fn resolve_bio(
        &self,
        record: &PortfolioRecord,
        profile: Option<&LinkedInProfile>,
    ) -> Bilingual {
        if !is_blank(record.bio.as_deref()) {
            return self
                .derive_bio
                .from_text(record.bio.as_deref().unwrap_or_default())
                .await;
        }
        match profile {
            Some(profile) => self.derive_bio.execute(profile).await,
            None => Bilingual::default(),
        }
    }

    fn resolve_image(
        &self,
        record: &PortfolioRecord,
        profile: &LinkedInProfile,
    ) -> ResolvedField {
        match resolve_field(
            record.profile_image_url.as_deref(),
            profile.profile_picture_url.as_deref(),
        ) {
            ResolvedField::Value(raw) => {
                let resolved = resolve_image_url(&raw, &self.config.api_base_url);
                if resolved.is_empty() {
                    ResolvedField::NotAvailable
                } else {
                    ResolvedField::Value(resolved)
                }
            }
            ResolvedField::NotAvailable => ResolvedField::NotAvailable,
        }
    }
}

fn github_handle(raw: &str) -> String {
    let raw = raw.trim();
    let raw = raw
        .strip_prefix("https://")
        .or_else(|| raw.strip_prefix("http://"))
        .unwrap_or(raw);
    let raw = raw.strip_prefix("www.").unwrap_or(raw);
    let raw = raw.strip_prefix("github.com/").unwrap_or(raw);
    raw.trim_start_matches('@').trim_matches('/').to_string()
}

#[async_trait]
impl ILoadPortfolioViewUseCase for LoadPortfolioViewService {
    async fn execute(&self, ctx: &ViewContext) -> PortfolioView {
        let (record, portfolio_state) = self.load_record(ctx).await;

        let username = self.github_username(&record);
        let (profile_result, github_result) = tokio::join!(
            self.load_profile(&record),
            self.load_projects_and_skills(username.as_deref()),
        );
        let (profile, linkedin_state) = profile_result;
        let ((projects, projects_state), (skills, skills_state)) = github_result;

        let bio = self.resolve_bio(&record, profile.as_ref()).await;

        let fallback = LinkedInProfile::default();
        let linkedin = profile.as_ref().unwrap_or(&fallback);

        PortfolioView {
            name: resolve_field(record.name.as_deref(), linkedin.name.as_deref()),
            title: resolve_field(record.title.as_deref(), linkedin.headline.as_deref()),
            profile_image_url: self.resolve_image(&record, linkedin),
            bio,

            skills,
            projects,
            experiences: linkedin.experiences.clone(),
            educations: linkedin.educations.clone(),
            languages: normalize_languages(linkedin),

            cv_url_en: record.cv_url_en.clone().filter(|u| !u.trim().is_empty()),
            cv_url_de: record.cv_url_de.clone().filter(|u| !u.trim().is_empty()),
            social: record.social.clone(),

            portfolio_state,
            skills_state,
            projects_state,
            linkedin_state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use crate::modules::cache::adapter::outgoing::memory_store::InMemoryStore;
    use crate::modules::github::application::use_cases::extract_skills::ExtractSkillsError;
    use crate::modules::github::application::use_cases::fetch_repositories::FetchRepositoriesError;
    use crate::modules::github::domain::entities::RepositorySummary;
    use crate::modules::linkedin::application::use_cases::fetch_profile::ProfileFetch;
    use crate::modules::portfolio::domain::entities::SocialLinks;
    use crate::modules::visibility::application::visibility_policy::VisibilityPolicy;

    /* --------------------------------------------------
     * Mock PortfolioApi
     * -------------------------------------------------- */

    mockall::mock! {
        Api {}

        #[async_trait]
        impl PortfolioApi for Api {
            async fn fetch(
                &self,
                ctx: &ViewContext,
            ) -> Result<Option<PortfolioRecord>, PortfolioApiError>;

            async fn update(
                &self,
                record: &PortfolioRecord,
            ) -> Result<PortfolioRecord, PortfolioApiError>;

            async fn upload_profile_image(
                &self,
                filename: &str,
                content_type: &str,
                bytes: Vec<u8>,
            ) -> Result<String, PortfolioApiError>;
        }
    }

    fn api_returning(result: Result<Option<PortfolioRecord>, PortfolioApiError>) -> MockApi {
        let mut api = MockApi::new();
        api.expect_fetch().returning(move |_| result.clone());
        api
    }

    /* --------------------------------------------------
     * Hand-rolled port mocks
     * -------------------------------------------------- */

    struct MockRepos {
        result: Result<Vec<RepositorySummary>, FetchRepositoriesError>,
    }

    #[async_trait]
    impl IFetchRepositoriesUseCase for MockRepos {
        async fn execute(
            &self,
            _username: &str,
        ) -> Result<Vec<RepositorySummary>, FetchRepositoriesError> {
            self.result.clone()
        }
    }

    struct MockSkills {
        result: Result<SkillsBreakdown, ExtractSkillsError>,
    }

    #[async_trait]
    impl IExtractSkillsUseCase for MockSkills {
        async fn execute(&self, _username: &str) -> Result<SkillsBreakdown, ExtractSkillsError> {
            self.result.clone()
        }
    }

    struct MockProfile {
        result: Result<ProfileFetch, FetchProfileError>,
    }

    #[async_trait]
    impl IFetchProfileUseCase for MockProfile {
        async fn execute(&self, _profile_url: &str) -> Result<ProfileFetch, FetchProfileError> {
            self.result.clone()
        }
    }

    /// Marks which path produced the bio so tests can assert precedence.
    struct MockDeriveBio;

    #[async_trait]
    impl IDeriveBioUseCase for MockDeriveBio {
        async fn execute(&self, _profile: &LinkedInProfile) -> Bilingual {
            Bilingual::same("derived from profile")
        }

        async fn from_text(&self, english: &str) -> Bilingual {
            Bilingual::same(english)
        }
    }

    /* --------------------------------------------------
     * Harness
     * -------------------------------------------------- */

    fn config() -> AppConfig {
        AppConfig {
            api_base_url: "https://api.example.com".to_string(),
            github_username: Some("alice".to_string()),
            linkedin_profile_url: Some("alice".to_string()),
            additional_linkedin_profile_url: None,
            request_timeout: Duration::from_secs(30),
            scrape_timeout: Duration::from_secs(60),
        }
    }

    fn starred_repo(name: &str) -> RepositorySummary {
        RepositorySummary {
            name: name.to_string(),
            description: None,
            language: Some("Kotlin".to_string()),
            topics: vec![],
            pushed_at: None,
            fork: false,
            is_private: false,
            stargazers_count: 3,
            forks_count: 0,
            html_url: format!("https://github.com/alice/{}", name),
            homepage: None,
        }
    }

    fn usable_profile() -> LinkedInProfile {
        LinkedInProfile {
            name: Some("Alice from LinkedIn".to_string()),
            headline: Some("Android Developer".to_string()),
            ..Default::default()
        }
    }

    fn skills() -> SkillsBreakdown {
        SkillsBreakdown {
            programming_languages: vec!["Kotlin".to_string()],
            other_skills: vec![],
        }
    }

    struct Harness {
        api: Result<Option<PortfolioRecord>, PortfolioApiError>,
        repos: Result<Vec<RepositorySummary>, FetchRepositoriesError>,
        skills: Result<SkillsBreakdown, ExtractSkillsError>,
        profile: Result<ProfileFetch, FetchProfileError>,
        additional: Option<Result<ProfileFetch, FetchProfileError>>,
        config: AppConfig,
    }

    impl Harness {
        fn happy() -> Self {
            Self {
                api: Ok(Some(PortfolioRecord {
                    name: Some("Alice Edited".to_string()),
                    bio: Some("Hand-written bio.".to_string()),
                    ..Default::default()
                })),
                repos: Ok(vec![starred_repo("cool-app")]),
                skills: Ok(skills()),
                profile: Ok(ProfileFetch {
                    profile: usable_profile(),
                    degraded: false,
                }),
                additional: None,
                config: config(),
            }
        }

        fn service(self) -> LoadPortfolioViewService {
            let policy = VisibilityPolicy::new(std::sync::Arc::new(InMemoryStore::new()));
            LoadPortfolioViewService::new(
                Arc::new(api_returning(self.api)),
                Arc::new(MockRepos { result: self.repos }),
                Arc::new(MockSkills {
                    result: self.skills,
                }),
                Arc::new(MockProfile {
                    result: self.profile,
                }),
                self.additional
                    .map(|result| Arc::new(MockProfile { result }) as Arc<dyn IFetchProfileUseCase>),
                Arc::new(MockDeriveBio),
                BuildProjectsService::new(policy),
                self.config,
            )
        }
    }

    /* --------------------------------------------------
     * Tests
     * -------------------------------------------------- */

    #[tokio::test]
    async fn happy_path_marks_every_section_ready() {
        let view = Harness::happy().service().execute(&ViewContext::Owner).await;

        assert!(view.portfolio_state.is_ready());
        assert!(view.projects_state.is_ready());
        assert!(view.skills_state.is_ready());
        assert!(view.linkedin_state.is_ready());
        assert_eq!(view.projects.len(), 1);
        assert_eq!(view.projects[0].title.en, "Cool App");
    }

    #[tokio::test]
    async fn user_edits_beat_linkedin_values() {
        let view = Harness::happy().service().execute(&ViewContext::Owner).await;

        assert_eq!(view.name.value(), Some("Alice Edited"));
        // No edited title, so the LinkedIn headline fills in.
        assert_eq!(view.title.value(), Some("Android Developer"));
        assert_eq!(view.bio.en, "Hand-written bio.");
    }

    #[tokio::test]
    async fn missing_bio_falls_back_to_the_derived_one() {
        let mut harness = Harness::happy();
        harness.api = Ok(Some(PortfolioRecord::default()));

        let view = harness.service().execute(&ViewContext::Owner).await;
        assert_eq!(view.bio.en, "derived from profile");
        assert_eq!(view.name.value(), Some("Alice from LinkedIn"));
    }

    #[tokio::test]
    async fn missing_github_username_is_a_configuration_error() {
        let mut harness = Harness::happy();
        harness.config.github_username = None;
        harness.api = Ok(Some(PortfolioRecord::default()));

        let view = harness.service().execute(&ViewContext::Owner).await;
        for state in [&view.projects_state, &view.skills_state] {
            match state {
                LoadState::Error { reason, message } => {
                    assert_eq!(*reason, ErrorReason::Configuration);
                    assert_eq!(message.as_deref(), Some(NO_GITHUB_USERNAME));
                }
                other => panic!("unexpected state: {:?}", other),
            }
        }
        assert!(view.projects.is_empty());
    }

    #[tokio::test]
    async fn username_from_the_social_link_fills_the_config_gap() {
        let mut harness = Harness::happy();
        harness.config.github_username = None;
        harness.api = Ok(Some(PortfolioRecord {
            social: SocialLinks {
                github: Some("https://github.com/alice/".to_string()),
                linkedin: None,
            },
            ..Default::default()
        }));

        let view = harness.service().execute(&ViewContext::Owner).await;
        assert!(view.projects_state.is_ready());
    }

    #[tokio::test]
    async fn missing_linkedin_url_degrades_only_that_section() {
        let mut harness = Harness::happy();
        harness.config.linkedin_profile_url = None;
        harness.api = Ok(Some(PortfolioRecord::default()));

        let view = harness.service().execute(&ViewContext::Owner).await;
        match &view.linkedin_state {
            LoadState::Error { reason, .. } => assert_eq!(*reason, ErrorReason::Configuration),
            other => panic!("unexpected state: {:?}", other),
        }
        assert!(view.experiences.is_empty());
        assert!(view.bio.is_empty());
        // GitHub sections are untouched.
        assert!(view.projects_state.is_ready());
    }

    #[tokio::test]
    async fn scrape_failures_map_to_distinct_reasons() {
        let cases = [
            (FetchProfileError::MissingApiToken, ErrorReason::Configuration),
            (FetchProfileError::Timeout, ErrorReason::Upstream),
            (
                FetchProfileError::ScrapeFailed("boom".to_string()),
                ErrorReason::Upstream,
            ),
            (FetchProfileError::UnusableProfile, ErrorReason::DataQuality),
        ];

        for (err, expected) in cases {
            let mut harness = Harness::happy();
            harness.profile = Err(err);

            let view = harness.service().execute(&ViewContext::Owner).await;
            match &view.linkedin_state {
                LoadState::Error { reason, .. } => assert_eq!(*reason, expected),
                other => panic!("unexpected state: {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn unauthorized_record_fetch_is_a_configuration_error() {
        let mut harness = Harness::happy();
        harness.api = Err(PortfolioApiError::Unauthorized);

        let view = harness.service().execute(&ViewContext::Owner).await;
        match &view.portfolio_state {
            LoadState::Error { reason, .. } => assert_eq!(*reason, ErrorReason::Configuration),
            other => panic!("unexpected state: {:?}", other),
        }
        // The LinkedIn URL from configuration still applies.
        assert!(view.linkedin_state.is_ready());
    }

    #[tokio::test]
    async fn absent_record_is_empty_not_an_error() {
        let mut harness = Harness::happy();
        harness.api = Ok(None);

        let view = harness.service().execute(&ViewContext::Owner).await;
        assert_eq!(view.portfolio_state, LoadState::Empty);
    }

    #[tokio::test]
    async fn profile_image_resolves_against_the_api_origin() {
        let mut harness = Harness::happy();
        harness.api = Ok(Some(PortfolioRecord {
            profile_image_url: Some("/uploads/me.png".to_string()),
            ..Default::default()
        }));

        let view = harness.service().execute(&ViewContext::Owner).await;
        assert_eq!(
            view.profile_image_url.value(),
            Some("https://api.example.com/uploads/me.png")
        );
    }

    #[tokio::test]
    async fn additional_profile_entries_are_appended() {
        let mut primary = usable_profile();
        primary.experiences = vec![crate::modules::linkedin::domain::entities::ExperienceEntry {
            title: Some("Engineer".to_string()),
            ..Default::default()
        }];

        let extra = LinkedInProfile {
            name: Some("Alice".to_string()),
            headline: Some("Freelancer".to_string()),
            experiences: vec![crate::modules::linkedin::domain::entities::ExperienceEntry {
                title: Some("Consultant".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };

        let mut harness = Harness::happy();
        harness.profile = Ok(ProfileFetch {
            profile: primary,
            degraded: false,
        });
        harness.additional = Some(Ok(ProfileFetch {
            profile: extra,
            degraded: false,
        }));
        harness.config.additional_linkedin_profile_url = Some("alice-extra".to_string());

        let view = harness.service().execute(&ViewContext::Owner).await;
        let titles: Vec<&str> = view
            .experiences
            .iter()
            .filter_map(|e| e.title.as_deref())
            .collect();
        assert_eq!(titles, vec!["Engineer", "Consultant"]);
    }

    #[tokio::test]
    async fn additional_profile_failure_is_not_fatal() {
        let mut harness = Harness::happy();
        harness.additional = Some(Err(FetchProfileError::Timeout));
        harness.config.additional_linkedin_profile_url = Some("alice-extra".to_string());

        let view = harness.service().execute(&ViewContext::Owner).await;
        assert!(view.linkedin_state.is_ready());
    }

    /* --------------------------------------------------
     * Handle normalization
     * -------------------------------------------------- */

    #[test]
    fn github_handle_accepts_urls_and_bare_handles() {
        assert_eq!(github_handle("alice"), "alice");
        assert_eq!(github_handle("@alice"), "alice");
        assert_eq!(github_handle("github.com/alice"), "alice");
        assert_eq!(github_handle("https://github.com/alice/"), "alice");
        assert_eq!(github_handle("https://www.github.com/alice"), "alice");
    }
}
