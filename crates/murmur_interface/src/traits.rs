//! Trait definitions for providers, publishers and logs.

use async_trait::async_trait;
use murmur_core::{ExternalId, GenerateRequest, LogRow, PublicationRecord, SanitizedTweet};
use murmur_error::{LogResult, ProviderResult, PublishResult};

/// A generative-text backend.
///
/// Implementations return the raw model output. Transport, timeout and
/// availability problems come back as a typed [`murmur_error::ProviderError`];
/// judging whether the text is usable is the pipeline's job.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate raw text for a request.
    async fn generate(&self, request: &GenerateRequest) -> ProviderResult<String>;

    /// Provider name (e.g., "openai", "anthropic", "ollama").
    fn provider_name(&self) -> &str;

    /// Model identifier.
    fn model_name(&self) -> &str;
}

/// A social platform that accepts finished posts.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Create a post.
    ///
    /// # Errors
    ///
    /// Any non-created status, timeout or transport failure. Implementations
    /// must not retry internally.
    async fn publish(&self, tweet: &SanitizedTweet) -> PublishResult<ExternalId>;

    /// Platform name (e.g., "twitter", "dry-run").
    fn platform_name(&self) -> &str;
}

/// Append-only record of what was published.
#[async_trait]
pub trait PublicationLog: Send + Sync {
    /// Append one record.
    async fn append(&self, record: &PublicationRecord) -> LogResult<()>;

    /// Return every stored row in storage order.
    ///
    /// Rows are returned raw so a single malformed row cannot fail the
    /// whole query; callers parse with [`PublicationRecord::try_from_row`].
    async fn query(&self) -> LogResult<Vec<LogRow>>;

    /// Backend name (e.g., "memory", "jsonl", "sheets").
    fn log_name(&self) -> &str;

    /// Parse every well-formed row, skipping the rest.
    async fn records(&self) -> LogResult<Vec<PublicationRecord>> {
        let rows = self.query().await?;
        Ok(rows
            .iter()
            .filter_map(|row| PublicationRecord::try_from_row(row).ok())
            .collect())
    }
}
