use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::modules::github::application::ports::outgoing::repository_query::{
    RepositoryQuery, RepositoryQueryError,
};
use crate::modules::github::domain::entities::RepositorySummary;

/// HTTP adapter for the repository proxy (`GET /github-repos`).
#[derive(Clone)]
pub struct GithubProxyClient {
    client: reqwest::Client,
    base_url: String,
}

impl GithubProxyClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RepositoryQueryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| RepositoryQueryError::Network(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// The proxy answers either with a bare array or with `{"data": [...]}`.
/// Anything else is a defect in the proxy, surfaced as `BadPayload`
/// rather than guessed around.
pub fn parse_repos_envelope(raw: Value) -> Result<Vec<RepositorySummary>, RepositoryQueryError> {
    let payload = if raw.is_array() {
        raw
    } else if let Value::Object(mut map) = raw {
        match map.remove("data") {
            Some(data @ Value::Array(_)) => data,
            _ => {
                return Err(RepositoryQueryError::BadPayload(
                    "expected an array or {\"data\": [...]}".to_string(),
                ))
            }
        }
    } else {
        return Err(RepositoryQueryError::BadPayload(
            "expected an array or {\"data\": [...]}".to_string(),
        ))
    };

    serde_json::from_value(payload).map_err(|err| RepositoryQueryError::BadPayload(err.to_string()))
}

#[async_trait]
impl RepositoryQuery for GithubProxyClient {
    async fn fetch_repositories(
        &self,
        username: &str,
    ) -> Result<Vec<RepositorySummary>, RepositoryQueryError> {
        let url = format!("{}/github-repos", self.base_url);
        debug!("Fetching repositories for {} via proxy", username);

        let response = self
            .client
            .get(&url)
            .query(&[("username", username)])
            .send()
            .await
            .map_err(|err| RepositoryQueryError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RepositoryQueryError::Network(format!(
                "GitHub proxy responded with status {}",
                status.as_u16()
            )));
        }

        let raw: Value = response
            .json()
            .await
            .map_err(|err| RepositoryQueryError::BadPayload(err.to_string()))?;

        parse_repos_envelope(raw)
    }
}
