//! Content creation for murmur.
//!
//! - [`Sanitizer`] turns raw model output into publishable text.
//! - [`Denylist`] rejects boilerplate and refusals.
//! - [`FallbackTemplates`] guarantee text exists even when every provider fails.
//! - [`GenerationPipeline`] composes providers, retries and the fallback.
//! - [`TopicSelector`] avoids topics published within the recency window.
//!
//! Every random choice draws from a caller-supplied [`rand::Rng`] so a
//! seeded generator reproduces a run exactly.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod defaults;
mod denylist;
mod fallback;
mod pipeline;
mod sanitizer;
mod selector;

pub use defaults::{
    DEFAULT_DENYLIST, DEFAULT_FALLBACK_TEMPLATES, DEFAULT_HASHTAGS, DEFAULT_PREAMBLES,
    DEFAULT_STYLES, DEFAULT_TOPICS,
};
pub use denylist::Denylist;
pub use fallback::FallbackTemplates;
pub use pipeline::{
    AttemptOutcome, ContentOrigin, GeneratedTweet, GenerationConfig, GenerationConfigBuilder,
    GenerationPipeline, RejectReason, build_prompt,
};
pub use sanitizer::{Sanitizer, SanitizerConfig, SanitizerConfigBuilder};
pub use selector::TopicSelector;
