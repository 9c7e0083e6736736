use reqwest::{blocking::Client, Url};
use serde_json::json;
use std::time::Duration;

use super::error::ScoringError;
use super::response::GenerateContentResponse;
use super::ScoringOracle;
use crate::config::OracleConfig;

/// Thin blocking HTTP client for Gemini `generateContent`.
///
/// Requests JSON output constrained by a response schema; the reply text is
/// still run through the tiered parser by the caller.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Build a client, reading the API key from the environment variable
    /// named in `config.api_key_env`.
    pub fn from_config(config: &OracleConfig) -> Result<Self, ScoringError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ScoringError::MissingApiKey(config.api_key_env.clone()))?;
        Self::with_api_key(config, api_key)
    }

    pub fn with_api_key(config: &OracleConfig, api_key: String) -> Result<Self, ScoringError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    fn request_url(&self) -> Result<Url, ScoringError> {
        let base = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let mut url = Url::parse(&base).map_err(|err| {
            ScoringError::Unavailable(format!("failed to build oracle URL: {}", err))
        })?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

fn request_body(prompt: &str) -> serde_json::Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "profitabilityScore": { "type": "NUMBER" },
                        "trafficLevel": {
                            "type": "STRING",
                            "enum": ["Low", "Medium", "High", "Critical"]
                        },
                        "trafficDelayMin": { "type": "INTEGER" }
                    }
                }
            }
        }
    })
}

impl ScoringOracle for GeminiClient {
    fn complete(&self, prompt: &str) -> Result<String, ScoringError> {
        let response = self
            .client
            .post(self.request_url()?)
            .json(&request_body(prompt))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ScoringError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json()?;
        parsed.text().ok_or(ScoringError::EmptyResponse)
    }
}
