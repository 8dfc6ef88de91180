use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::modules::linkedin::application::ports::outgoing::profile_scrape::{
    ProfileScrape, ProfileScrapeError,
};
use crate::modules::linkedin::domain::entities::LinkedInProfile;

/// HTTP adapter for the scraping proxy (`POST /linkedin-profile`).
///
/// The proxy fronts a paid scraping actor whose jobs can run for tens
/// of seconds, so the request timeout here mirrors the proxy's own
/// timeout rather than a snappy default.
#[derive(Clone)]
pub struct LinkedInProxyClient {
    client: reqwest::Client,
    base_url: String,
}

impl LinkedInProxyClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ProfileScrapeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ProfileScrapeError::ScrapeFailed(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Classify a non-2xx proxy answer into the port's error taxonomy.
/// The proxy reports actor problems in the response body.
fn classify_failure(status: u16, body: &str) -> ProfileScrapeError {
    let lowered = body.to_lowercase();

    if status == 401
        || status == 403
        || lowered.contains("api token")
        || lowered.contains("unauthorized")
    {
        return ProfileScrapeError::MissingApiToken;
    }
    if status == 408 || status == 504 || lowered.contains("timed out") || lowered.contains("timeout")
    {
        return ProfileScrapeError::Timeout;
    }
    ProfileScrapeError::ScrapeFailed(format!("proxy status {}: {}", status, truncate(body, 200)))
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// The proxy answers with a bare profile object or `{"data": {...}}`.
fn parse_profile_envelope(raw: Value) -> Result<LinkedInProfile, ProfileScrapeError> {
    let payload = if let Value::Object(ref map) = raw {
        match map.get("data") {
            Some(data @ Value::Object(_)) => data.clone(),
            _ => raw,
        }
    } else {
        return Err(ProfileScrapeError::ScrapeFailed(
            "expected a profile object".to_string(),
        ));
    };

    serde_json::from_value(payload).map_err(|err| ProfileScrapeError::ScrapeFailed(err.to_string()))
}

#[async_trait]
impl ProfileScrape for LinkedInProxyClient {
    async fn scrape(&self, profile_url: &str) -> Result<LinkedInProfile, ProfileScrapeError> {
        let url = format!("{}/linkedin-profile", self.base_url);
        info!("Requesting LinkedIn scrape for {}", profile_url);

        let response = self
            .client
            .post(&url)
            .json(&json!({ "profileUrl": profile_url }))
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    ProfileScrapeError::Timeout
                } else {
                    ProfileScrapeError::ScrapeFailed(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let classified = classify_failure(status.as_u16(), &body);
            warn!("LinkedIn scrape failed: {}", classified);
            return Err(classified);
        }

        let raw: Value = response
            .json()
            .await
            .map_err(|err| ProfileScrapeError::ScrapeFailed(err.to_string()))?;

        parse_profile_envelope(raw)
    }
}
