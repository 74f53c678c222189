//! OpenAI-compatible chat completions client.
//!
//! OpenAI, Groq and most self-hosted inference servers speak the same
//! `/chat/completions` dialect, so one client covers all of them.

use crate::http::{DEFAULT_TIMEOUT_SECS, build_client, classify_send_error, non_empty, read_json};
use async_trait::async_trait;
use murmur_core::GenerateRequest;
use murmur_error::{ProviderError, ProviderErrorKind, ProviderResult};
use murmur_interface::TextProvider;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// OpenAI chat completions endpoint.
pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Groq chat completions endpoint.
pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for any OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
    provider: String,
    timeout_secs: u64,
}

impl OpenAICompatibleClient {
    /// Creates a client for an arbitrary endpoint.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Bearer token; may be empty for local servers
    /// * `model` - Model identifier
    /// * `endpoint` - Full URL of the chat completions route
    /// * `provider` - Name used in logs
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        provider: impl Into<String>,
    ) -> ProviderResult<Self> {
        Self::with_timeout(api_key, model, endpoint, provider, DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a client with an explicit request deadline.
    pub fn with_timeout(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        provider: impl Into<String>,
        timeout_secs: u64,
    ) -> ProviderResult<Self> {
        let provider = provider.into();
        debug!(provider = %provider, "Creating OpenAI-compatible client");
        Ok(Self {
            client: build_client(timeout_secs)?,
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.into(),
            provider,
            timeout_secs,
        })
    }

    /// Creates a client for api.openai.com.
    pub fn openai(api_key: impl Into<String>, model: impl Into<String>) -> ProviderResult<Self> {
        Self::new(api_key, model, OPENAI_API_URL, "openai")
    }

    /// Creates a client for Groq.
    pub fn groq(api_key: impl Into<String>, model: impl Into<String>) -> ProviderResult<Self> {
        Self::new(api_key, model, GROQ_API_URL, "groq")
    }

    fn to_chat_request<'a>(&'a self, request: &'a GenerateRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: request.model().as_deref().unwrap_or(&self.model),
            messages: request
                .messages()
                .iter()
                .map(|m| ChatMessage {
                    role: m.role.as_wire(),
                    content: &m.content,
                })
                .collect(),
            max_tokens: *request.max_tokens(),
            temperature: *request.temperature(),
        }
    }
}

#[async_trait]
impl TextProvider for OpenAICompatibleClient {
    #[instrument(skip(self, request), fields(provider = %self.provider, model = %self.model))]
    async fn generate(&self, request: &GenerateRequest) -> ProviderResult<String> {
        let body = self.to_chat_request(request);

        let mut builder = self.client.post(&self.endpoint).json(&body);
        if !self.api_key.is_empty() {
            builder = builder.bearer_auth(&self.api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| classify_send_error(e, self.timeout_secs))?;
        let parsed: ChatResponse = read_json(response, self.timeout_secs).await?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                ProviderError::new(ProviderErrorKind::MalformedResponse(
                    "Response contained no choices".to_string(),
                ))
            })?;

        non_empty(text, &self.provider)
    }

    fn provider_name(&self) -> &str {
        &self.provider
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
