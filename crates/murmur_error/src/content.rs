//! Error types for content configuration.

/// Content configuration problems detected before any generation runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ContentErrorKind {
    /// No topics to choose from
    #[display("Topic collection is empty")]
    NoTopics,
    /// No style prompts to choose from
    #[display("Style prompt collection is empty")]
    NoStyles,
    /// No fallback templates to fall back on
    #[display("Fallback template collection is empty")]
    NoTemplates,
    /// A denylist pattern failed to compile
    #[display("Invalid denylist pattern '{}': {}", pattern, reason)]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Compiler message
        reason: String,
    },
    /// Length bounds cannot be satisfied
    #[display("Invalid length bounds: {}", _0)]
    InvalidBounds(String),
}

/// Content error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Content Error: {} at line {} in {}", kind, line, file)]
pub struct ContentError {
    /// The error kind
    pub kind: ContentErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl ContentError {
    /// Create a new ContentError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ContentErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ContentErrorKind {
        &self.kind
    }
}

/// Result type for content operations.
pub type ContentResult<T> = Result<T, ContentError>;
