//! Exact-match duplicate tracking for published text.

use std::collections::HashSet;

/// Texts published (or restored from the log) during this process.
///
/// Only the orchestrator adds to the set, and only after a confirmed
/// publish. Membership is exact string equality after sanitization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenContentSet {
    texts: HashSet<String>,
}

impl SeenContentSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a text. Returns `false` if it was already present.
    pub fn insert(&mut self, text: impl Into<String>) -> bool {
        self.texts.insert(text.into())
    }

    /// Whether the exact text has been seen.
    pub fn contains(&self, text: &str) -> bool {
        self.texts.contains(text)
    }

    /// Number of distinct texts.
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Whether nothing has been seen yet.
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

impl<S: Into<String>> Extend<S> for SeenContentSet {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        self.texts.extend(iter.into_iter().map(Into::into));
    }
}

impl<S: Into<String>> FromIterator<S> for SeenContentSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
