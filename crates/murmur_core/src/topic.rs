//! Topics and the style prompts that frame them.

use serde::{Deserialize, Serialize};

/// Placeholder substituted with the topic when a style prompt is rendered.
pub const TOPIC_PLACEHOLDER: &str = "{topic}";

/// A subject string the agent writes about.
///
/// Topics are compared by exact string equality.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct Topic(String);

impl Topic {
    /// Create a topic.
    pub fn new(topic: impl Into<String>) -> Self {
        Self(topic.into())
    }

    /// Borrow the topic text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Topic {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A prompt template with a `{topic}` placeholder.
///
/// # Examples
///
/// ```
/// use murmur_core::{StylePrompt, Topic};
///
/// let style = StylePrompt::new("Share a quick tip about {topic}.");
/// assert_eq!(style.render(&Topic::new("pandas")), "Share a quick tip about pandas.");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct StylePrompt(String);

impl StylePrompt {
    /// Create a style prompt.
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Raw template text.
    pub fn template(&self) -> &str {
        &self.0
    }

    /// Substitute every placeholder with the topic.
    pub fn render(&self, topic: &Topic) -> String {
        self.0.replace(TOPIC_PLACEHOLDER, topic.as_str())
    }
}

impl From<&str> for StylePrompt {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
