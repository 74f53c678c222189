//! Trait seams for the murmur content agent.
//!
//! Each external collaborator (text provider, publishing platform,
//! publication log, wall clock) sits behind a trait here so the content
//! and scheduling logic can be driven by fakes in tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod clock;
mod traits;

pub use clock::{Clock, ManualClock, SystemClock};
pub use traits::{PublicationLog, Publisher, TextProvider};
