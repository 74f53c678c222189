//! Provider retries, content checks and the fallback guarantee.

use crate::{Denylist, FallbackTemplates, Sanitizer};
use derive_getters::Getters;
use murmur_core::{GenerateRequest, Message, SanitizedTweet, SeenContentSet, StylePrompt, Topic};
use murmur_error::{ContentError, ContentErrorKind, ContentResult, ProviderError};
use murmur_interface::TextProvider;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Pipeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into), default)]
pub struct GenerationConfig {
    /// Attempts per provider before moving on.
    #[serde(default = "default_retry_budget")]
    retry_budget: u32,

    /// Texts of this many characters or fewer are rejected.
    #[serde(default = "default_min_length")]
    min_length: usize,

    /// Optional system prompt sent ahead of every request.
    #[serde(default)]
    system_prompt: Option<String>,

    /// Sampling temperature forwarded to providers.
    #[serde(default)]
    temperature: Option<f32>,

    /// Token ceiling forwarded to providers.
    #[serde(default = "default_max_tokens")]
    max_tokens: Option<u32>,
}

fn default_retry_budget() -> u32 {
    3
}

fn default_min_length() -> usize {
    10
}

fn default_max_tokens() -> Option<u32> {
    Some(200)
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            retry_budget: default_retry_budget(),
            min_length: default_min_length(),
            system_prompt: None,
            temperature: None,
            max_tokens: default_max_tokens(),
        }
    }
}

impl GenerationConfig {
    /// Replace the per-provider attempt budget.
    pub fn with_retry_budget(mut self, retry_budget: u32) -> Self {
        self.retry_budget = retry_budget;
        self
    }
}

/// Where accepted text came from.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ContentOrigin {
    /// A named provider produced it
    #[display("provider:{}", _0)]
    Provider(String),
    /// The fallback templates produced it
    #[display("fallback")]
    Fallback,
}

/// Why a sanitized candidate was turned down.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RejectReason {
    /// At or below the minimum length
    #[display("too short ({} chars)", _0)]
    TooShort(usize),
    /// Above the maximum length
    #[display("too long ({} chars)", _0)]
    TooLong(usize),
    /// Already published this run
    #[display("duplicate of earlier post")]
    Duplicate,
    /// Matched a denylist pattern
    #[display("matched denylist pattern '{}'", _0)]
    Denylisted(String),
}

/// Result of one provider attempt.
#[derive(Debug, Clone)]
pub enum AttemptOutcome {
    /// Usable text
    Accepted(SanitizedTweet),
    /// The provider answered but the text was unusable
    Rejected(RejectReason),
    /// The provider did not answer usefully
    Failed(ProviderError),
}

/// Text ready to publish and where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GeneratedTweet {
    /// The text
    tweet: SanitizedTweet,
    /// Its source
    origin: ContentOrigin,
}

impl GeneratedTweet {
    /// Take the text.
    pub fn into_tweet(self) -> SanitizedTweet {
        self.tweet
    }
}

/// Build the provider prompt for a rendered style.
///
/// # Examples
///
/// ```
/// let prompt = murmur_content::build_prompt("Post a quick tip about SQL.", 280);
/// assert!(prompt.starts_with("Post a quick tip about SQL. Make sure"));
/// assert!(prompt.contains("under 280 characters"));
/// ```
pub fn build_prompt(style: &str, max_length: usize) -> String {
    format!(
        "{} Make sure your response is under {} characters and contains only the tweet text with no additional explanations or quotes.",
        style, max_length
    )
}

/// Providers tried in order, then the fallback templates.
///
/// [`GenerationPipeline::generate`] never fails: provider errors and
/// unusable text only move it along to the next attempt.
pub struct GenerationPipeline {
    providers: Vec<Arc<dyn TextProvider>>,
    styles: Vec<StylePrompt>,
    sanitizer: Sanitizer,
    denylist: Denylist,
    fallback: FallbackTemplates,
    config: GenerationConfig,
}

impl std::fmt::Debug for GenerationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationPipeline")
            .field(
                "providers",
                &self
                    .providers
                    .iter()
                    .map(|p| p.provider_name().to_string())
                    .collect::<Vec<_>>(),
            )
            .field("styles", &self.styles.len())
            .field("fallback", &self.fallback.len())
            .field("config", &self.config)
            .finish()
    }
}

impl GenerationPipeline {
    /// Assemble a pipeline.
    ///
    /// # Errors
    ///
    /// Rejects an empty style list and a minimum length that leaves no room
    /// below the sanitizer's maximum.
    pub fn new(
        providers: Vec<Arc<dyn TextProvider>>,
        styles: Vec<StylePrompt>,
        sanitizer: Sanitizer,
        denylist: Denylist,
        fallback: FallbackTemplates,
        config: GenerationConfig,
    ) -> ContentResult<Self> {
        if styles.is_empty() {
            return Err(ContentError::new(ContentErrorKind::NoStyles));
        }
        let max_length = *sanitizer.config().max_length();
        if config.min_length >= max_length {
            return Err(ContentError::new(ContentErrorKind::InvalidBounds(format!(
                "min_length {} must be below max_length {}",
                config.min_length, max_length
            ))));
        }
        Ok(Self {
            providers,
            styles,
            sanitizer,
            denylist,
            fallback,
            config,
        })
    }

    /// Names of the configured providers, in order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.provider_name()).collect()
    }

    /// Produce publishable text for `topic`.
    #[instrument(skip(self, seen, rng), fields(topic = %topic))]
    pub async fn generate<R: Rng + Send>(
        &self,
        topic: &Topic,
        seen: &SeenContentSet,
        rng: &mut R,
    ) -> GeneratedTweet {
        for provider in &self.providers {
            let name = provider.provider_name();
            for attempt in 1..=self.config.retry_budget {
                match self.attempt(provider.as_ref(), topic, seen, rng).await {
                    AttemptOutcome::Accepted(tweet) => {
                        info!(provider = %name, attempt, chars = tweet.char_len(), "Generated text accepted");
                        return GeneratedTweet {
                            tweet,
                            origin: ContentOrigin::Provider(name.to_string()),
                        };
                    }
                    AttemptOutcome::Rejected(reason) => {
                        warn!(provider = %name, attempt, reason = %reason, "Generated text rejected");
                    }
                    AttemptOutcome::Failed(err) => {
                        warn!(provider = %name, attempt, error = %err.kind, "Provider attempt failed");
                        if !err.is_retryable() {
                            debug!(provider = %name, "Error is not retryable, advancing to next provider");
                            break;
                        }
                    }
                }
            }
        }

        warn!("All providers exhausted, using fallback template");
        GeneratedTweet {
            tweet: self.fallback_tweet(topic, seen, rng),
            origin: ContentOrigin::Fallback,
        }
    }

    /// One call to one provider, sanitized and checked.
    pub async fn attempt<R: Rng + Send>(
        &self,
        provider: &dyn TextProvider,
        topic: &Topic,
        seen: &SeenContentSet,
        rng: &mut R,
    ) -> AttemptOutcome {
        let request = self.request_for(topic, rng);
        match provider.generate(&request).await {
            Ok(raw) => {
                debug!(raw_chars = raw.chars().count(), "Provider returned text");
                let text = self.sanitizer.sanitize(&raw, rng);
                match self.check(text, seen) {
                    Ok(tweet) => AttemptOutcome::Accepted(tweet),
                    Err(reason) => AttemptOutcome::Rejected(reason),
                }
            }
            Err(err) => AttemptOutcome::Failed(err),
        }
    }

    /// Apply the length, duplicate and denylist rules.
    pub fn check(&self, text: String, seen: &SeenContentSet) -> Result<SanitizedTweet, RejectReason> {
        let len = text.chars().count();
        if len <= self.config.min_length {
            return Err(RejectReason::TooShort(len));
        }
        if len > *self.sanitizer.config().max_length() {
            return Err(RejectReason::TooLong(len));
        }
        if seen.contains(&text) {
            return Err(RejectReason::Duplicate);
        }
        if let Some(pattern) = self.denylist.matched(&text) {
            return Err(RejectReason::Denylisted(pattern.to_string()));
        }
        Ok(SanitizedTweet::new(text))
    }

    /// First acceptable template in random order.
    ///
    /// When every template is rejected, each candidate is retried with a
    /// vocabulary hashtag appended. Only if none of those pass either is the
    /// first shuffled candidate reused, so the caller always has something
    /// to publish.
    pub fn fallback_tweet<R: Rng>(
        &self,
        topic: &Topic,
        seen: &SeenContentSet,
        rng: &mut R,
    ) -> SanitizedTweet {
        let candidates: Vec<String> = self
            .fallback
            .candidates(topic, rng)
            .into_iter()
            .map(|raw| self.sanitizer.sanitize(&raw, rng))
            .collect();

        for text in &candidates {
            match self.check(text.clone(), seen) {
                Ok(tweet) => return tweet,
                Err(reason) => debug!(reason = %reason, "Fallback template rejected"),
            }
        }

        for text in &candidates {
            for variant in self.sanitizer.tagged_variants(text) {
                if let Ok(tweet) = self.check(variant, seen) {
                    debug!("Using tagged variant of a fallback template");
                    return tweet;
                }
            }
        }

        warn!("Every fallback template and variant was rejected, reusing one");
        let first = candidates.into_iter().next();
        SanitizedTweet::new(first.unwrap_or_else(|| topic.to_string()))
    }

    fn request_for<R: Rng>(&self, topic: &Topic, rng: &mut R) -> GenerateRequest {
        let style = self
            .styles
            .choose(rng)
            .map(|s| s.render(topic))
            .unwrap_or_else(|| topic.to_string());
        let prompt = build_prompt(&style, *self.sanitizer.config().max_length());

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.config.system_prompt {
            messages.push(Message::system(system.clone()));
        }
        messages.push(Message::user(prompt));

        GenerateRequest::new(messages)
            .with_max_tokens(self.config.max_tokens)
            .with_temperature(self.config.temperature)
    }
}
