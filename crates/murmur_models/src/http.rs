//! Shared HTTP plumbing and failure classification.

use murmur_error::{ProviderError, ProviderErrorKind, ProviderResult};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Request deadline applied when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const MAX_ERROR_BODY: usize = 500;

pub(crate) fn build_client(timeout_secs: u64) -> ProviderResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| {
            ProviderError::new(ProviderErrorKind::Configuration(format!(
                "Failed to build HTTP client: {}",
                e
            )))
        })
}

/// Map a transport-level reqwest failure.
pub(crate) fn classify_send_error(e: reqwest::Error, timeout_secs: u64) -> ProviderError {
    if e.is_timeout() {
        warn!(timeout_secs, "Provider request timed out");
        ProviderError::new(ProviderErrorKind::Timeout(timeout_secs))
    } else if e.is_decode() {
        ProviderError::new(ProviderErrorKind::MalformedResponse(e.to_string()))
    } else {
        error!(error = ?e, "Provider request failed");
        ProviderError::new(ProviderErrorKind::Transport(e.to_string()))
    }
}

/// Map a non-success status to a failure kind.
pub(crate) fn classify_status(status: StatusCode, body: String) -> ProviderErrorKind {
    let body = truncate(body);
    match status.as_u16() {
        429 => ProviderErrorKind::RateLimited(body),
        502 | 503 | 504 | 529 => ProviderErrorKind::Unavailable(format!("{}: {}", status, body)),
        code => ProviderErrorKind::Api { status: code, body },
    }
}

/// Check the status and decode a JSON body.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: Response,
    timeout_secs: u64,
) -> ProviderResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %body, "Provider returned error status");
        return Err(ProviderError::new(classify_status(status, body)));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| classify_send_error(e, timeout_secs))?;
    debug!(bytes = bytes.len(), "Received provider response");
    serde_json::from_slice(&bytes).map_err(|e| {
        error!(error = %e, "Failed to parse provider response");
        ProviderError::new(ProviderErrorKind::MalformedResponse(format!(
            "Failed to parse response: {}",
            e
        )))
    })
}

/// Reject blank completions.
pub(crate) fn non_empty(text: String, provider: &str) -> ProviderResult<String> {
    if text.trim().is_empty() {
        Err(ProviderError::new(ProviderErrorKind::MalformedResponse(
            format!("{} returned an empty completion", provider),
        )))
    } else {
        Ok(text)
    }
}

fn truncate(body: String) -> String {
    if body.chars().count() <= MAX_ERROR_BODY {
        body
    } else {
        body.chars().take(MAX_ERROR_BODY).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_and_outage_are_not_retryable() {
        let kind = classify_status(StatusCode::TOO_MANY_REQUESTS, "slow down".into());
        assert!(matches!(kind, ProviderErrorKind::RateLimited(_)));
        assert!(!kind.is_retryable());

        let kind = classify_status(StatusCode::SERVICE_UNAVAILABLE, String::new());
        assert!(matches!(kind, ProviderErrorKind::Unavailable(_)));
        assert!(!kind.is_retryable());
    }

    #[test]
    fn test_server_error_is_retryable() {
        let kind = classify_status(StatusCode::INTERNAL_SERVER_ERROR, "oops".into());
        assert_eq!(
            kind,
            ProviderErrorKind::Api {
                status: 500,
                body: "oops".into()
            }
        );
        assert!(kind.is_retryable());
    }

    #[test]
    fn test_long_bodies_are_truncated() {
        let kind = classify_status(StatusCode::BAD_REQUEST, "x".repeat(2_000));
        match kind {
            ProviderErrorKind::Api { body, .. } => assert_eq!(body.len(), MAX_ERROR_BODY),
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_blank_completion_is_malformed() {
        let err = non_empty("  \n".into(), "openai").unwrap_err();
        assert!(matches!(err.kind(), ProviderErrorKind::MalformedResponse(_)));
    }
}
