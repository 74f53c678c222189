//! Patterns that mark generated text as unusable.

use crate::defaults::DEFAULT_DENYLIST;
use murmur_error::{ContentError, ContentErrorKind, ContentResult};
use regex::Regex;

/// Compiled set of rejection patterns.
#[derive(Debug, Clone)]
pub struct Denylist {
    patterns: Vec<Regex>,
}

impl Denylist {
    /// Compile a list of regular expressions.
    ///
    /// # Errors
    ///
    /// Returns [`ContentErrorKind::InvalidPattern`] for the first pattern
    /// that fails to compile.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> ContentResult<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p.as_ref()).map_err(|e| {
                    ContentError::new(ContentErrorKind::InvalidPattern {
                        pattern: p.as_ref().to_string(),
                        reason: e.to_string(),
                    })
                })
            })
            .collect::<ContentResult<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// The first pattern matching `text`, if any.
    pub fn matched(&self, text: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|re| re.is_match(text))
            .map(|re| re.as_str())
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the list accepts everything.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for Denylist {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_DENYLIST
                .iter()
                .filter_map(|p| Regex::new(p).ok())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_patterns_all_compile() {
        assert_eq!(Denylist::default().len(), DEFAULT_DENYLIST.len());
    }

    #[test]
    fn test_refusals_and_placeholders_match() {
        let denylist = Denylist::default();
        assert!(denylist.matched("I cannot write that tweet.").is_some());
        assert!(denylist.matched("I'm sorry, but no.").is_some());
        assert!(denylist.matched("As an AI, I think SQL is neat").is_some());
        assert!(denylist.matched("Try [insert tool here] today").is_some());
        assert!(denylist.matched("Normalize your tables before joining.").is_none());
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = Denylist::new(&["(unclosed"]).unwrap_err();
        assert!(matches!(err.kind(), ContentErrorKind::InvalidPattern { .. }));
    }
}
