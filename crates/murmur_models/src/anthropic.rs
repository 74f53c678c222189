//! Anthropic Messages API client.

use crate::http::{DEFAULT_TIMEOUT_SECS, build_client, classify_send_error, non_empty, read_json};
use async_trait::async_trait;
use murmur_core::GenerateRequest;
use murmur_error::ProviderResult;
use murmur_interface::TextProvider;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Anthropic Messages endpoint.
pub const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<MessagesEntry<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct MessagesEntry<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Anthropic API client.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
    timeout_secs: u64,
}

impl AnthropicClient {
    /// Creates a new Anthropic client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Anthropic API key
    /// * `model` - Model identifier (e.g., "claude-3-5-haiku-latest")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> ProviderResult<Self> {
        Self::with_endpoint(api_key, model, ANTHROPIC_API_URL, DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a client against a different endpoint, e.g. a proxy.
    pub fn with_endpoint(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        timeout_secs: u64,
    ) -> ProviderResult<Self> {
        debug!("Creating new Anthropic client");
        Ok(Self {
            client: build_client(timeout_secs)?,
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.into(),
            timeout_secs,
        })
    }

    fn convert_request<'a>(&'a self, request: &'a GenerateRequest) -> MessagesRequest<'a> {
        MessagesRequest {
            model: request.model().as_deref().unwrap_or(&self.model),
            max_tokens: request.max_tokens().unwrap_or(DEFAULT_MAX_TOKENS),
            system: request.system_text(),
            messages: request
                .conversation()
                .map(|m| MessagesEntry {
                    role: m.role.as_wire(),
                    content: &m.content,
                })
                .collect(),
            temperature: *request.temperature(),
        }
    }
}

#[async_trait]
impl TextProvider for AnthropicClient {
    #[instrument(skip(self, request), fields(provider = "anthropic", model = %self.model))]
    async fn generate(&self, request: &GenerateRequest) -> ProviderResult<String> {
        let body = self.convert_request(request);

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_send_error(e, self.timeout_secs))?;
        let parsed: MessagesResponse = read_json(response, self.timeout_secs).await?;

        let text = parsed
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        non_empty(text, "anthropic")
    }

    fn provider_name(&self) -> &str {
        "anthropic"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
