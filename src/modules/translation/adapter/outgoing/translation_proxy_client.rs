use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::modules::translation::application::ports::outgoing::translator::Translator;

/// HTTP adapter for the translation proxy (`POST /translate`).
pub struct TranslationProxyClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct TranslateResponse {
    translation: String,
}

impl TranslationProxyClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        // A builder failure here would mean a broken TLS backend; fall
        // back to the default client rather than refusing to start over
        // an optional feature.
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn request(&self, text: &str, source: &str, target: &str) -> Result<String, String> {
        let url = format!("{}/translate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&json!({ "text": text, "source": source, "target": target }))
            .send()
            .await
            .map_err(|err| err.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("translation proxy status {}", status.as_u16()));
        }

        let parsed: TranslateResponse = response.json().await.map_err(|err| err.to_string())?;
        if parsed.translation.trim().is_empty() {
            return Err("translation proxy returned an empty result".to_string());
        }
        Ok(parsed.translation)
    }
}

#[async_trait]
impl Translator for TranslationProxyClient {
    async fn translate(&self, text: &str, source: &str, target: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        match self.request(text, source, target).await {
            Ok(translation) => translation,
            Err(reason) => {
                warn!("Translation {}->{} failed, keeping source text: {}", source, target, reason);
                text.to_string()
            }
        }
    }
}
