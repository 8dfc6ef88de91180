use std::env;
use std::time::Duration;

//
// ──────────────────────────────────────────────────────────
// Environment configuration
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set. Add it to the environment or the .env file.")]
    MissingVar(&'static str),
}

/// Runtime configuration, read once at startup.
///
/// `API_BASE_URL` is the only required variable; without it neither the
/// proxies nor the persistence API are reachable. The GitHub username
/// and LinkedIn URLs are optional here because the portfolio record's
/// social links can supply them at aggregation time.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub github_username: Option<String>,
    pub linkedin_profile_url: Option<String>,
    pub additional_linkedin_profile_url: Option<String>,
    pub request_timeout: Duration,
    /// Scrapes run through a headless browser upstream and need a much
    /// larger budget than plain API calls.
    pub scrape_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: required("API_BASE_URL")?,
            github_username: optional("GITHUB_USERNAME"),
            linkedin_profile_url: optional("LINKEDIN_PROFILE_URL"),
            additional_linkedin_profile_url: optional("LINKEDIN_ADDITIONAL_PROFILE_URL"),
            request_timeout: parse_seconds(optional("REQUEST_TIMEOUT_SECS"), 30),
            scrape_timeout: parse_seconds(optional("SCRAPE_TIMEOUT_SECS"), 60),
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::MissingVar(name))
}

fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_seconds(raw: Option<String>, default: u64) -> Duration {
    let secs = raw
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default);
    Duration::from_secs(secs)
}
