//! Core data types for the murmur content agent.
//!
//! This crate provides the values that flow between topic selection,
//! generation, publishing and the publication log.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod message;
mod record;
mod request;
mod role;
mod seen;
mod topic;
mod tweet;

pub use message::Message;
pub use record::{LogRow, PublicationRecord, RECORD_DATE_FORMAT};
pub use request::{GenerateRequest, GenerateRequestBuilder};
pub use role::Role;
pub use seen::SeenContentSet;
pub use topic::{StylePrompt, TOPIC_PLACEHOLDER, Topic};
pub use tweet::{ExternalId, SanitizedTweet};
