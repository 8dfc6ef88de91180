use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::modules::portfolio::application::ports::outgoing::portfolio_api::{
    PortfolioApi, PortfolioApiError,
};
use crate::modules::portfolio::application::services::auth_token::AuthTokenStore;
use crate::modules::portfolio::domain::entities::{PortfolioRecord, ViewContext};

/// HTTP adapter for the portfolio persistence API.
#[derive(Clone)]
pub struct PortfolioHttpClient {
    client: reqwest::Client,
    base_url: String,
    tokens: AuthTokenStore,
}

impl PortfolioHttpClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        tokens: AuthTokenStore,
    ) -> Result<Self, PortfolioApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| PortfolioApiError::Network(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    fn bearer(&self) -> Result<String, PortfolioApiError> {
        self.tokens.get().ok_or(PortfolioApiError::Unauthorized)
    }

    fn map_status(status: StatusCode) -> PortfolioApiError {
        match status.as_u16() {
            401 | 403 => PortfolioApiError::Unauthorized,
            code => PortfolioApiError::Network(format!(
                "portfolio API responded with status {}",
                code
            )),
        }
    }
}

/// Accepts a bare record or the API's `{"success": ..., "data": {...}}`
/// envelope, nothing else.
pub fn parse_record_envelope(raw: Value) -> Result<PortfolioRecord, PortfolioApiError> {
    let payload = if let Value::Object(ref map) = raw {
        match map.get("data") {
            Some(data @ Value::Object(_)) => data.clone(),
            _ => raw,
        }
    } else {
        return Err(PortfolioApiError::BadPayload(
            "expected a portfolio record object".to_string(),
        ));
    };

    serde_json::from_value(payload).map_err(|err| PortfolioApiError::BadPayload(err.to_string()))
}

#[async_trait]
impl PortfolioApi for PortfolioHttpClient {
    async fn fetch(&self, ctx: &ViewContext) -> Result<Option<PortfolioRecord>, PortfolioApiError> {
        let request = match ctx {
            ViewContext::Owner => {
                let url = format!("{}/portfolio", self.base_url);
                debug!("Fetching owner portfolio record");
                self.client.get(&url).bearer_auth(self.bearer()?)
            }
            ViewContext::PublicVisitor { username } => {
                let url = format!("{}/profiles/username/{}", self.base_url, username);
                debug!("Fetching public portfolio record for {}", username);
                self.client.get(&url)
            }
        };

        let response = request
            .send()
            .await
            .map_err(|err| PortfolioApiError::Network(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Self::map_status(status));
        }

        let raw: Value = response
            .json()
            .await
            .map_err(|err| PortfolioApiError::BadPayload(err.to_string()))?;
        parse_record_envelope(raw).map(Some)
    }

    async fn update(&self, record: &PortfolioRecord) -> Result<PortfolioRecord, PortfolioApiError> {
        let url = format!("{}/portfolio", self.base_url);
        let response = self
            .client
            .put(&url)
            .bearer_auth(self.bearer()?)
            .json(record)
            .send()
            .await
            .map_err(|err| PortfolioApiError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::map_status(status));
        }

        let raw: Value = response
            .json()
            .await
            .map_err(|err| PortfolioApiError::BadPayload(err.to_string()))?;
        parse_record_envelope(raw)
    }

    async fn upload_profile_image(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, PortfolioApiError> {
        let part = multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|err| PortfolioApiError::BadPayload(err.to_string()))?;
        let form = multipart::Form::new().part("file", part);

        let url = format!("{}/portfolio/profile-image", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.bearer()?)
            .multipart(form)
            .send()
            .await
            .map_err(|err| PortfolioApiError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::map_status(status));
        }

        let raw: Value = response
            .json()
            .await
            .map_err(|err| PortfolioApiError::BadPayload(err.to_string()))?;
        raw.get("imageUrl")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                PortfolioApiError::BadPayload("upload response missing imageUrl".to_string())
            })
    }
}
