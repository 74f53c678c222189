//! Publishable text and platform identifiers.

use serde::{Deserialize, Serialize};

/// Text that has been through the sanitizer.
///
/// Only the sanitizer and fallback selection should construct these; the
/// publisher accepts nothing else.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct SanitizedTweet(String);

impl SanitizedTweet {
    /// Wrap already-sanitized text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Borrow the text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters, which is what platform limits count.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// Take the text back.
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Identifier the platform assigned to a published post.
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
pub struct ExternalId(String);

impl ExternalId {
    /// Create an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
