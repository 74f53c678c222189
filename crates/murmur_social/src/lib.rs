//! Publishers for murmur.
//!
//! [`TwitterPublisher`] creates posts through the X/Twitter v2 API with
//! OAuth 1.0a user-context signing. [`DryRunPublisher`] only logs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dry_run;
mod oauth;
mod twitter;

pub use dry_run::DryRunPublisher;
pub use oauth::{OAuthCredentials, OAuthSigner, percent_encode};
pub use twitter::{TWITTER_CREATE_URL, TwitterPublisher};
