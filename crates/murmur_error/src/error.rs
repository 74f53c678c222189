//! Top-level error wrapper types.

use crate::{ConfigError, ContentError, LogError, ProviderError, PublishError, ScheduleError};

/// Every failure a murmur crate can surface.
///
/// # Examples
///
/// ```
/// use murmur_error::{MurmurError, MurmurErrorKind, ConfigError};
///
/// let err: MurmurError = ConfigError::new("schedule.times is empty").into();
/// assert!(matches!(err.kind(), MurmurErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum MurmurErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Content configuration error
    #[from(ContentError)]
    Content(ContentError),
    /// Provider adapter error
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Publisher error
    #[from(PublishError)]
    Publish(PublishError),
    /// Publication log error
    #[from(LogError)]
    Log(LogError),
    /// Schedule error
    #[from(ScheduleError)]
    Schedule(ScheduleError),
}

/// Murmur error with kind discrimination.
///
/// # Examples
///
/// ```
/// use murmur_error::{MurmurResult, ConfigError};
///
/// fn might_fail() -> MurmurResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Murmur Error: {}", _0)]
pub struct MurmurError(Box<MurmurErrorKind>);

impl MurmurError {
    /// Create a new error from a kind.
    pub fn new(kind: MurmurErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MurmurErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to MurmurErrorKind
impl<T> From<T> for MurmurError
where
    T: Into<MurmurErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for murmur operations.
pub type MurmurResult<T> = std::result::Result<T, MurmurError>;
