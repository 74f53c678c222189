//! Error types for the murmur content agent.
//!
//! This crate provides the error types shared by every murmur crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use murmur_error::{MurmurResult, ConfigError};
//!
//! fn load() -> MurmurResult<String> {
//!     Err(ConfigError::new("schedule.times is empty"))?
//! }
//!
//! match load() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod content;
mod error;
mod log;
mod provider;
mod publish;
mod schedule;

pub use config::ConfigError;
pub use content::{ContentError, ContentErrorKind, ContentResult};
pub use error::{MurmurError, MurmurErrorKind, MurmurResult};
pub use log::{LogError, LogErrorKind, LogResult};
pub use provider::{ProviderError, ProviderErrorKind, ProviderResult};
pub use publish::{PublishError, PublishErrorKind, PublishResult};
pub use schedule::{ScheduleError, ScheduleErrorKind};
