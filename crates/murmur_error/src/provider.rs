//! Error types for text-generation provider adapters.

/// Failure reasons reported by a provider adapter.
///
/// These are transport-level signals, distinct from content-quality
/// rejections which the generation pipeline decides on its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProviderErrorKind {
    /// Network-level failure (connect, reset, TLS)
    #[display("Transport failure: {}", _0)]
    Transport(String),

    /// The request exceeded its deadline
    #[display("Request timed out after {}s", _0)]
    Timeout(u64),

    /// The provider signalled a rate limit (HTTP 429)
    #[display("Rate limited: {}", _0)]
    RateLimited(String),

    /// The provider is overloaded or down (HTTP 503 and friends)
    #[display("Provider unavailable: {}", _0)]
    Unavailable(String),

    /// Any other non-success status
    #[display("API error {}: {}", status, body)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// The response arrived but could not be understood
    #[display("Malformed response: {}", _0)]
    MalformedResponse(String),

    /// The adapter is missing credentials or settings
    #[display("Provider misconfigured: {}", _0)]
    Configuration(String),
}

impl ProviderErrorKind {
    /// Whether another attempt against the same adapter is worthwhile.
    ///
    /// Rate limits, outages and configuration problems will not clear up
    /// within a single generation, so the pipeline moves to the next adapter.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout(_) | Self::MalformedResponse(_) => true,
            Self::Api { status, .. } => *status >= 500,
            Self::RateLimited(_) | Self::Unavailable(_) | Self::Configuration(_) => false,
        }
    }
}

/// Provider error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The error kind
    pub kind: ProviderErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new ProviderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ProviderErrorKind {
        &self.kind
    }

    /// Shorthand for [`ProviderErrorKind::is_retryable`].
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

/// Result type for provider adapter calls.
pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_retryable_client_errors_are_not() {
        let server = ProviderErrorKind::Api {
            status: 502,
            body: String::new(),
        };
        let client = ProviderErrorKind::Api {
            status: 400,
            body: String::new(),
        };
        assert!(server.is_retryable());
        assert!(!client.is_retryable());
    }

    #[test]
    fn rate_limits_advance_to_next_adapter() {
        assert!(!ProviderErrorKind::RateLimited("slow down".into()).is_retryable());
        assert!(!ProviderErrorKind::Configuration("no key".into()).is_retryable());
        assert!(ProviderErrorKind::Timeout(30).is_retryable());
    }
}
