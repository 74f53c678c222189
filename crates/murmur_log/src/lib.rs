//! Publication log backends for murmur.
//!
//! All backends store rows as `[date, topic, content, external_id]` and
//! return them raw from `query`, leaving per-row parsing to the caller so one
//! bad row never hides the rest.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod jsonl;
mod memory;
mod sheets;

pub use jsonl::JsonlPublicationLog;
pub use memory::InMemoryPublicationLog;
pub use sheets::{SHEETS_API_URL, SheetsPublicationLog};
