//! Ollama chat client for locally hosted models.

use crate::http::{DEFAULT_TIMEOUT_SECS, build_client, classify_send_error, non_empty, read_json};
use async_trait::async_trait;
use murmur_core::GenerateRequest;
use murmur_error::ProviderResult;
use murmur_interface::TextProvider;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Default Ollama server.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

#[derive(Debug, Serialize)]
struct OllamaMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaResponseMessage {
    #[serde(default)]
    content: String,
}

/// Client for an Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
    timeout_secs: u64,
}

impl OllamaClient {
    /// Creates a client against the default local server.
    pub fn new(model: impl Into<String>) -> ProviderResult<Self> {
        Self::with_base_url(model, DEFAULT_OLLAMA_URL, DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a client against a specific server.
    pub fn with_base_url(
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout_secs: u64,
    ) -> ProviderResult<Self> {
        Ok(Self {
            client: build_client(timeout_secs)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            timeout_secs,
        })
    }
}

#[async_trait]
impl TextProvider for OllamaClient {
    #[instrument(skip(self, request), fields(provider = "ollama", model = %self.model))]
    async fn generate(&self, request: &GenerateRequest) -> ProviderResult<String> {
        let options = match (request.temperature(), request.max_tokens()) {
            (None, None) => None,
            (temperature, num_predict) => Some(OllamaOptions {
                temperature: *temperature,
                num_predict: *num_predict,
            }),
        };
        let body = OllamaChatRequest {
            model: request.model().as_deref().unwrap_or(&self.model),
            messages: request
                .messages()
                .iter()
                .map(|m| OllamaMessage {
                    role: m.role.as_wire(),
                    content: &m.content,
                })
                .collect(),
            stream: false,
            options,
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_send_error(e, self.timeout_secs))?;
        let parsed: OllamaChatResponse = read_json(response, self.timeout_secs).await?;

        non_empty(parsed.message.content, "ollama")
    }

    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
