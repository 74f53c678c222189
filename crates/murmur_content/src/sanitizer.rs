//! Cleanup of raw model output.

use crate::defaults::{DEFAULT_HASHTAGS, DEFAULT_PREAMBLES};
use derive_getters::Getters;
use murmur_error::{ContentError, ContentErrorKind, ContentResult};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::trace;

const ELLIPSIS: &str = "...";
const QUOTES: &[char] = &['"', '\'', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}', '`'];
const LEAD_IN_PUNCTUATION: &[char] = &[':', '-', '\u{2013}', '\u{2014}'];

/// Sanitizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into), default)]
pub struct SanitizerConfig {
    /// Maximum length in characters.
    #[serde(default = "default_max_length")]
    max_length: usize,

    /// A truncation only backs up to a word boundary past this many characters.
    #[serde(default = "default_min_retention")]
    min_retention: usize,

    /// Chance of appending a hashtag to untagged text.
    #[serde(default = "default_hashtag_probability")]
    hashtag_probability: f64,

    /// Tag vocabulary.
    #[serde(default = "default_hashtags")]
    hashtags: Vec<String>,

    /// Lead-in phrases stripped from the start of the text.
    #[serde(default = "default_preambles")]
    preambles: Vec<String>,
}

fn default_max_length() -> usize {
    280
}

fn default_min_retention() -> usize {
    200
}

fn default_hashtag_probability() -> f64 {
    0.3
}

fn default_hashtags() -> Vec<String> {
    DEFAULT_HASHTAGS.iter().map(|s| s.to_string()).collect()
}

fn default_preambles() -> Vec<String> {
    DEFAULT_PREAMBLES.iter().map(|s| s.to_string()).collect()
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
            min_retention: default_min_retention(),
            hashtag_probability: default_hashtag_probability(),
            hashtags: default_hashtags(),
            preambles: default_preambles(),
        }
    }
}

impl SanitizerConfig {
    /// Replace the maximum length.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }
}

/// Turns raw model output into publishable text.
///
/// Sanitizing is pure apart from the random draws, which come from the
/// caller's generator.
///
/// # Examples
///
/// ```
/// use murmur_content::{Sanitizer, SanitizerConfigBuilder};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let config = SanitizerConfigBuilder::default()
///     .hashtag_probability(0.0)
///     .build()
///     .unwrap();
/// let sanitizer = Sanitizer::new(config).unwrap();
/// let mut rng = StdRng::seed_from_u64(7);
///
/// let text = sanitizer.sanitize("Tweet:  \"Index   your joins.\"", &mut rng);
/// assert_eq!(text, "Index your joins.");
/// ```
#[derive(Debug, Clone)]
pub struct Sanitizer {
    config: SanitizerConfig,
    preambles: Vec<String>,
}

impl Sanitizer {
    /// Create a sanitizer.
    ///
    /// # Errors
    ///
    /// Rejects a maximum length with no room for the ellipsis and a
    /// probability outside `[0, 1]`.
    pub fn new(config: SanitizerConfig) -> ContentResult<Self> {
        if config.max_length <= ELLIPSIS.len() {
            return Err(ContentError::new(ContentErrorKind::InvalidBounds(format!(
                "max_length {} leaves no room for an ellipsis",
                config.max_length
            ))));
        }
        if !(0.0..=1.0).contains(&config.hashtag_probability) {
            return Err(ContentError::new(ContentErrorKind::InvalidBounds(format!(
                "hashtag_probability {} is outside [0, 1]",
                config.hashtag_probability
            ))));
        }

        let mut preambles: Vec<String> = config
            .preambles
            .iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        // Longest first so "Here's a tweet:" wins over "Here's".
        preambles.sort_by_key(|p| std::cmp::Reverse(p.chars().count()));

        Ok(Self { config, preambles })
    }

    /// Settings in use.
    pub fn config(&self) -> &SanitizerConfig {
        &self.config
    }

    /// Full cleanup: strip and collapse, then either truncate or maybe tag.
    ///
    /// Truncated text is never tagged, and neither is text that already ends
    /// in an ellipsis, so a second pass returns its input unchanged.
    pub fn sanitize<R: Rng>(&self, raw: &str, rng: &mut R) -> String {
        let cleaned = self.clean(raw);
        if cleaned.chars().count() > self.config.max_length {
            return self.enforce_length(&cleaned);
        }
        self.maybe_tag(cleaned, rng)
    }

    /// Deterministic part of sanitizing: whitespace, quotes and lead-ins.
    pub fn clean(&self, raw: &str) -> String {
        let mut text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        loop {
            let before = text.clone();
            text = text
                .trim_matches(|c: char| c.is_whitespace() || QUOTES.contains(&c))
                .to_string();
            if let Some(rest) = self.strip_preamble(&text) {
                text = rest
                    .trim_start_matches(|c: char| {
                        c.is_whitespace() || LEAD_IN_PUNCTUATION.contains(&c)
                    })
                    .to_string();
            }
            if text == before {
                return text;
            }
        }
    }

    fn strip_preamble<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.preambles.iter().find_map(|p| {
            strip_prefix_ignore_case(text, p).filter(|rest| !continues_word(p, rest))
        })
    }

    fn maybe_tag<R: Rng>(&self, text: String, rng: &mut R) -> String {
        if text.is_empty() || text.contains('#') || text.ends_with(ELLIPSIS) {
            return text;
        }
        let fitting: Vec<&String> = self
            .config
            .hashtags
            .iter()
            .filter(|tag| self.fits_with(&text, tag))
            .collect();
        if fitting.is_empty() || !rng.gen_bool(self.config.hashtag_probability) {
            return text;
        }
        match fitting.choose(rng) {
            Some(tag) => {
                trace!(tag = %tag, "Appended hashtag");
                format!("{} {}", text, tag)
            }
            None => text,
        }
    }

    fn fits_with(&self, text: &str, tag: &str) -> bool {
        text.chars().count() + 1 + tag.chars().count() <= self.config.max_length
    }

    /// `text` with each vocabulary tag appended, in vocabulary order,
    /// skipping tags that would overflow the maximum length.
    pub fn tagged_variants<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        self.config
            .hashtags
            .iter()
            .filter(move |tag| !text.is_empty() && self.fits_with(text, tag))
            .map(move |tag| format!("{} {}", text, tag))
    }

    /// Truncate to the maximum length, preferring a word boundary.
    pub fn enforce_length(&self, text: &str) -> String {
        if text.chars().count() <= self.config.max_length {
            return text.to_string();
        }

        let keep = self.config.max_length - ELLIPSIS.len();
        let cut: String = text.chars().take(keep).collect();
        let cut = match cut.rfind(' ') {
            Some(idx) if cut[..idx].chars().count() > self.config.min_retention => &cut[..idx],
            _ => cut.as_str(),
        };
        format!("{}{}", cut.trim_end(), ELLIPSIS)
    }
}

/// True when a lead-in ending in a letter or digit would split a word of `rest`.
fn continues_word(prefix: &str, rest: &str) -> bool {
    let ends_in_word = prefix.chars().last().is_some_and(char::is_alphanumeric);
    let next_in_word = rest
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '\'' || c == '\u{2019}');
    ends_in_word && next_in_word
}

/// Case-insensitive `strip_prefix`, returning the remainder of `text`.
fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let mut rest = text.char_indices();
    for expected in prefix.chars() {
        let (_, actual) = rest.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    let offset = rest.next().map(|(i, _)| i).unwrap_or(text.len());
    Some(&text[offset..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_prefix_ignore_case() {
        assert_eq!(strip_prefix_ignore_case("TWEET: hi", "tweet:"), Some(" hi"));
        assert_eq!(strip_prefix_ignore_case("Tweet", "tweet:"), None);
        assert_eq!(strip_prefix_ignore_case("Here’s it", "here’s"), Some(" it"));
        assert_eq!(strip_prefix_ignore_case("abc", "abc"), Some(""));
    }

    #[test]
    fn test_continues_word() {
        assert!(continues_word("Here is", "n't a silver bullet"));
        assert!(continues_word("Sure", "ly not"));
        assert!(!continues_word("Here is", " a tip"));
        assert!(!continues_word("Here is", ""));
        assert!(!continues_word("Tweet:", "Index your joins"));
    }

    #[test]
    fn test_preambles_sorted_longest_first() {
        let sanitizer = Sanitizer::new(SanitizerConfig::default()).unwrap();
        let lengths: Vec<usize> = sanitizer.preambles.iter().map(|p| p.chars().count()).collect();
        assert!(lengths.windows(2).all(|w| w[0] >= w[1]));
    }
}
