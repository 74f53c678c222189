//! Error types for schedule parsing.

/// Specific schedule error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ScheduleErrorKind {
    /// A time-of-day string did not parse as `HH:MM` or `HH:MM:SS`
    #[display("Invalid schedule time '{}'", _0)]
    InvalidTime(String),
}

/// Schedule error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Schedule Error: {} at line {} in {}", kind, line, file)]
pub struct ScheduleError {
    /// The error kind
    pub kind: ScheduleErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl ScheduleError {
    /// Create a new ScheduleError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ScheduleErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ScheduleErrorKind {
        &self.kind
    }
}
