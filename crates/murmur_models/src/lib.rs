//! Text provider adapters for murmur.
//!
//! Every adapter implements [`murmur_interface::TextProvider`] over plain
//! HTTP and reports failures as typed [`murmur_error::ProviderErrorKind`]
//! values so the generation pipeline can decide between retrying the same
//! backend and moving on to the next one.
//!
//! # Available Providers
//!
//! - **OpenAI-compatible** chat completions (OpenAI, Groq, local servers)
//! - **Anthropic** Messages API
//! - **Ollama** chat API
//!
//! ```no_run
//! use murmur_core::{GenerateRequestBuilder, Message};
//! use murmur_interface::TextProvider;
//! use murmur_models::OpenAICompatibleClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAICompatibleClient::openai("sk-...", "gpt-4o-mini")?;
//! let request = GenerateRequestBuilder::default()
//!     .messages(vec![Message::user("Write a tweet about SQL joins.")])
//!     .build()?;
//! let text = client.generate(&request).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod anthropic;
mod http;
mod ollama;
mod openai_compat;

pub use anthropic::{ANTHROPIC_API_URL, AnthropicClient};
pub use http::DEFAULT_TIMEOUT_SECS;
pub use ollama::{DEFAULT_OLLAMA_URL, OllamaClient};
pub use openai_compat::{GROQ_API_URL, OPENAI_API_URL, OpenAICompatibleClient};
