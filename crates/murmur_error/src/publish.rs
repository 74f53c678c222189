//! Error types for publishing to a social platform.

/// Specific publish failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PublishErrorKind {
    /// The platform answered with something other than "created"
    #[display("Platform returned {}: {}", status, body)]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// The request exceeded its deadline
    #[display("Publish timed out after {}s", _0)]
    Timeout(u64),

    /// Network-level failure
    #[display("Transport failure: {}", _0)]
    Transport(String),

    /// The "created" response did not carry an identifier
    #[display("Malformed response: {}", _0)]
    MalformedResponse(String),

    /// Missing credentials or endpoint
    #[display("Publisher misconfigured: {}", _0)]
    Configuration(String),
}

/// Publish error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Publish Error: {} at line {} in {}", kind, line, file)]
pub struct PublishError {
    /// The error kind
    pub kind: PublishErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl PublishError {
    /// Create a new PublishError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PublishErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PublishErrorKind {
        &self.kind
    }
}

/// Result type for publish operations.
pub type PublishResult<T> = Result<T, PublishError>;
