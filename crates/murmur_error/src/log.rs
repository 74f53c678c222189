//! Error types for the publication log.

/// Specific publication log failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum LogErrorKind {
    /// The backing store could not be reached
    #[display("Log unavailable: {}", _0)]
    Unavailable(String),

    /// Local file I/O failed
    #[display("Log I/O error: {}", _0)]
    Io(String),

    /// A row could not be interpreted as a publication record
    #[display("Malformed log row: {}", _0)]
    Malformed(String),

    /// The remote store answered with a failure status
    #[display("Log API error {}: {}", status, body)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Missing credentials or location
    #[display("Log misconfigured: {}", _0)]
    Configuration(String),
}

/// Publication log error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Log Error: {} at line {} in {}", kind, line, file)]
pub struct LogError {
    /// The error kind
    pub kind: LogErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl LogError {
    /// Create a new LogError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: LogErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &LogErrorKind {
        &self.kind
    }
}

impl From<std::io::Error> for LogError {
    #[track_caller]
    fn from(e: std::io::Error) -> Self {
        Self::new(LogErrorKind::Io(e.to_string()))
    }
}

/// Result type for publication log operations.
pub type LogResult<T> = Result<T, LogError>;
