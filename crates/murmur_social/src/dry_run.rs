//! Publisher that posts nothing.

use async_trait::async_trait;
use murmur_core::{ExternalId, SanitizedTweet};
use murmur_error::PublishResult;
use murmur_interface::Publisher;
use tracing::info;

/// Logs the text and hands back a synthetic identifier.
///
/// Used for `--dry-run` so the whole cycle, log append included, can be
/// exercised without touching the platform.
#[derive(Debug, Clone, Default)]
pub struct DryRunPublisher;

impl DryRunPublisher {
    /// Create a dry-run publisher.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Publisher for DryRunPublisher {
    async fn publish(&self, tweet: &SanitizedTweet) -> PublishResult<ExternalId> {
        let id = ExternalId::new(format!("dry-run-{}", uuid::Uuid::new_v4()));
        info!(id = %id, chars = tweet.char_len(), text = %tweet, "Dry run: not publishing");
        Ok(id)
    }

    fn platform_name(&self) -> &str {
        "dry-run"
    }
}
