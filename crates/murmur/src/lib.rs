//! Murmur - scheduled post generation and publishing.
//!
//! Each cycle picks a topic that has not been published recently, asks the
//! configured providers for a short post about it (falling back to built-in
//! templates when they all fail), publishes the result and records it in the
//! publication log. The [`murmur_schedule::Scheduler`] fires cycles at fixed
//! times of day for a bounded window.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use murmur::{AgentConfig, cli};
//!
//! #[tokio::main]
//! async fn main() -> murmur_error::MurmurResult<()> {
//!     let config = cli::load_config(None)?;
//!     let mut orchestrator = cli::assemble(&config, true).await?;
//!     if let Some(text) = orchestrator.generate_and_publish("manual").await {
//!         println!("{}", text);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Crates
//!
//! - `murmur_core` - topics, posts and publication records
//! - `murmur_interface` - provider, publisher, log and clock traits
//! - `murmur_models` - OpenAI-compatible, Anthropic and Ollama providers
//! - `murmur_content` - sanitizer, generation pipeline and topic selector
//! - `murmur_social` - Twitter and dry-run publishers
//! - `murmur_log` - in-memory, JSON-lines and spreadsheet logs
//! - `murmur_schedule` - daily triggers and the bounded loop

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
mod config;
mod observability;
mod orchestrator;
pub mod wiring;

pub use config::{
    AgentConfig, ContentConfig, LogBackend, LogConfig, ProviderConfig, ProviderKind,
    PublisherConfig, PublisherKind, SelectionConfig,
};
pub use observability::{ObservabilityConfig, init_observability};
pub use orchestrator::Orchestrator;
pub use wiring::UnavailablePublisher;
