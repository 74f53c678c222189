//! Request type shared by every provider adapter.

use crate::{Message, Role};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Generic chat generation request.
///
/// # Examples
///
/// ```
/// use murmur_core::{GenerateRequestBuilder, Message};
///
/// let request = GenerateRequestBuilder::default()
///     .messages(vec![Message::user("Hello!")])
///     .max_tokens(Some(100u32))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages().len(), 1);
/// assert_eq!(*request.max_tokens(), Some(100));
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Default, Getters, derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct GenerateRequest {
    /// The conversation messages to send
    messages: Vec<Message>,
    /// Maximum number of tokens to generate
    max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 1.0)
    temperature: Option<f32>,
    /// Model identifier override
    model: Option<String>,
}

impl GenerateRequest {
    /// Create a request with default sampling settings.
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    /// Set the token ceiling.
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Concatenated text of all system messages, if any.
    ///
    /// Anthropic takes the system prompt as a separate field rather than a
    /// message, so adapters use this to split it out.
    pub fn system_text(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .messages
            .iter()
            .filter(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n"))
        }
    }

    /// Messages excluding the system role.
    pub fn conversation(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.role != Role::System)
    }

    /// Flatten the request into a single prompt for completion-style APIs.
    pub fn to_prompt(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
