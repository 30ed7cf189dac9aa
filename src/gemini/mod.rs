use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::{api::types::GenerationResult, config::RelayConfig, error::RelayError};

pub mod types;

use types::{GenerateContentRequest, GenerateContentResponse};

/// Thin client for the `generateContent` endpoint. Holds no credential; the
/// key is supplied per call from `RelayConfig`.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(config: &RelayConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &RelayConfig) -> Self {
        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.api_base, config.model
        );
        Self { client, endpoint }
    }

    /// Single attempt, no timeout, no retry.
    pub async fn generate_content(
        &self,
        api_key: &str,
        prompt: &str,
    ) -> Result<GenerateContentResponse, RelayError> {
        let payload = GenerateContentRequest::json_reply(prompt);

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", api_key)])
            .header(CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(RelayError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(RelayError::upstream_decode)
    }

    /// Calls upstream and decodes the first candidate's text as suggestions.
    pub async fn suggest(&self, api_key: &str, prompt: &str) -> Result<GenerationResult, RelayError> {
        let response = self.generate_content(api_key, prompt).await?;
        debug!(candidates = response.candidates.len(), "upstream replied");
        parse_suggestions(&response)
    }
}

pub fn parse_suggestions(response: &GenerateContentResponse) -> Result<GenerationResult, RelayError> {
    if response.candidates.is_empty() {
        return Err(RelayError::NoCandidates);
    }
    let text = response.first_text().ok_or(RelayError::MissingText)?;
    serde_json::from_str(text).map_err(RelayError::MalformedSuggestions)
}
