//! X/Twitter v2 create-post client.

use crate::{OAuthCredentials, OAuthSigner};
use async_trait::async_trait;
use murmur_core::{ExternalId, SanitizedTweet};
use murmur_error::{PublishError, PublishErrorKind, PublishResult};
use murmur_interface::Publisher;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Create-post endpoint.
pub const TWITTER_CREATE_URL: &str = "https://api.twitter.com/2/tweets";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize)]
struct CreateTweet<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateTweetResponse {
    data: CreatedTweet,
}

#[derive(Debug, Deserialize)]
struct CreatedTweet {
    id: String,
}

/// Publishes through `POST /2/tweets`.
///
/// Exactly one request per call; a failed publish is reported, never retried.
#[derive(Debug, Clone)]
pub struct TwitterPublisher {
    client: Client,
    signer: OAuthSigner,
    endpoint: String,
    timeout_secs: u64,
}

impl TwitterPublisher {
    /// Creates a publisher against the production endpoint with a 30s timeout.
    pub fn new(credentials: OAuthCredentials) -> PublishResult<Self> {
        Self::with_endpoint(credentials, TWITTER_CREATE_URL, DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a publisher against a specific endpoint.
    pub fn with_endpoint(
        credentials: OAuthCredentials,
        endpoint: impl Into<String>,
        timeout_secs: u64,
    ) -> PublishResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                PublishError::new(PublishErrorKind::Configuration(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;
        Ok(Self {
            client,
            signer: OAuthSigner::new(credentials),
            endpoint: endpoint.into(),
            timeout_secs,
        })
    }
}

#[async_trait]
impl Publisher for TwitterPublisher {
    #[instrument(skip(self, tweet), fields(platform = "twitter", chars = tweet.char_len()))]
    async fn publish(&self, tweet: &SanitizedTweet) -> PublishResult<ExternalId> {
        let authorization = self.signer.authorization("POST", &self.endpoint, &[])?;

        debug!("Sending create request");
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .json(&CreateTweet {
                text: tweet.as_str(),
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!(timeout_secs = self.timeout_secs, "Publish timed out");
                    PublishError::new(PublishErrorKind::Timeout(self.timeout_secs))
                } else {
                    error!(error = ?e, "Publish request failed");
                    PublishError::new(PublishErrorKind::Transport(e.to_string()))
                }
            })?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Platform rejected post");
            return Err(PublishError::new(PublishErrorKind::Status {
                status: status.as_u16(),
                body,
            }));
        }

        let created: CreateTweetResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse create response");
            PublishError::new(PublishErrorKind::MalformedResponse(e.to_string()))
        })?;

        info!(id = %created.data.id, "Post created");
        Ok(ExternalId::new(created.data.id))
    }

    fn platform_name(&self) -> &str {
        "twitter"
    }
}
