pub mod config;
pub mod modules;
pub mod shared;

use std::env;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::modules::aggregation::application::use_cases::build_projects::BuildProjectsService;
use crate::modules::aggregation::application::use_cases::derive_bio::DeriveBioService;
use crate::modules::aggregation::application::use_cases::load_portfolio_view::{
    ILoadPortfolioViewUseCase, LoadPortfolioViewService,
};
use crate::modules::cache::adapter::outgoing::json_file_store::JsonFileStore;
use crate::modules::cache::application::ports::outgoing::KeyValueStore;
use crate::modules::cache::application::snapshot_store::SnapshotStore;
use crate::modules::cache::domain::entities::keys;
use crate::modules::github::adapter::outgoing::github_proxy_client::GithubProxyClient;
use crate::modules::github::application::use_cases::extract_skills::ExtractSkillsService;
use crate::modules::github::application::use_cases::fetch_repositories::FetchRepositoriesService;
use crate::modules::linkedin::adapter::outgoing::linkedin_proxy_client::LinkedInProxyClient;
use crate::modules::linkedin::application::use_cases::fetch_profile::{
    FetchProfileService, IFetchProfileUseCase,
};
use crate::modules::portfolio::adapter::outgoing::portfolio_http_client::PortfolioHttpClient;
use crate::modules::portfolio::application::services::auth_token::AuthTokenStore;
use crate::modules::portfolio::application::use_cases::update_portfolio::{
    IUpdatePortfolioUseCase, UpdatePortfolioService,
};
use crate::modules::portfolio::application::use_cases::upload_profile_image::{
    IUploadProfileImageUseCase, UploadProfileImageService,
};
use crate::modules::portfolio::domain::entities::ViewContext;
use crate::modules::translation::adapter::outgoing::translation_proxy_client::TranslationProxyClient;
use crate::modules::visibility::application::visibility_policy::VisibilityPolicy;

#[derive(Clone)]
pub struct AppState {
    pub load_portfolio_view_use_case: Arc<dyn ILoadPortfolioViewUseCase>,
    pub update_portfolio_use_case: Arc<dyn IUpdatePortfolioUseCase>,
    pub upload_profile_image_use_case: Arc<dyn IUploadProfileImageUseCase>,
    pub visibility_policy: VisibilityPolicy,
    pub auth_tokens: AuthTokenStore,
}

impl AppState {
    /// Wires every adapter and use case over one shared key-value
    /// backend. All snapshots, the auth token and the visibility
    /// overrides live in the same store, mirroring how the cache keys
    /// are namespaced.
    pub fn build(config: &AppConfig, store: Arc<dyn KeyValueStore>) -> anyhow::Result<Self> {
        let cache = SnapshotStore::new(store.clone());
        let auth_tokens = AuthTokenStore::new(store.clone());
        let visibility_policy = VisibilityPolicy::new(store);

        let portfolio_client = PortfolioHttpClient::new(
            &config.api_base_url,
            config.request_timeout,
            auth_tokens.clone(),
        )
        .context("building the portfolio API client")?;

        let github_client = GithubProxyClient::new(&config.api_base_url, config.request_timeout)
            .context("building the repository proxy client")?;
        let fetch_repositories = FetchRepositoriesService::new(github_client.clone(), cache.clone());
        let extract_skills = ExtractSkillsService::new(
            FetchRepositoriesService::new(github_client, cache.clone()),
            cache.clone(),
        );

        let fetch_profile = FetchProfileService::new(
            LinkedInProxyClient::new(&config.api_base_url, config.scrape_timeout)
                .context("building the scraping proxy client")?,
            cache.clone(),
            keys::LINKEDIN_PROFILE,
        );
        let fetch_additional_profile: Option<Arc<dyn IFetchProfileUseCase>> =
            match config.additional_linkedin_profile_url {
                Some(_) => Some(Arc::new(FetchProfileService::new(
                    LinkedInProxyClient::new(&config.api_base_url, config.scrape_timeout)
                        .context("building the scraping proxy client")?,
                    cache.clone(),
                    keys::LINKEDIN_ADDITIONAL_PROFILE,
                ))),
                None => None,
            };

        let derive_bio = DeriveBioService::new(TranslationProxyClient::new(
            &config.api_base_url,
            config.request_timeout,
        ));

        let load_portfolio_view = LoadPortfolioViewService::new(
            Arc::new(portfolio_client.clone()),
            Arc::new(fetch_repositories),
            Arc::new(extract_skills),
            Arc::new(fetch_profile),
            fetch_additional_profile,
            Arc::new(derive_bio),
            BuildProjectsService::new(visibility_policy.clone()),
            config.clone(),
        );

        Ok(Self {
            load_portfolio_view_use_case: Arc::new(load_portfolio_view),
            update_portfolio_use_case: Arc::new(UpdatePortfolioService::new(
                portfolio_client.clone(),
            )),
            upload_profile_image_use_case: Arc::new(UploadProfileImageService::new(
                portfolio_client,
            )),
            visibility_policy,
            auth_tokens,
        })
    }
}

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    let cache_file =
        env::var("CACHE_FILE").unwrap_or_else(|_| "portfolio_cache.json".to_string());
    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(cache_file));

    let state = AppState::build(&config, store)?;

    // VIEW_USERNAME switches the aggregation into the public-visitor
    // context; without it the owner's own view is assembled.
    let ctx = match env::var("VIEW_USERNAME") {
        Ok(username) if !username.trim().is_empty() => ViewContext::PublicVisitor {
            username: username.trim().to_string(),
        },
        _ => ViewContext::Owner,
    };

    info!("Assembling portfolio view...");
    let view = state.load_portfolio_view_use_case.execute(&ctx).await;
    println!("{}", serde_json::to_string_pretty(&view)?);

    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
