//! Deterministic, non-AI text used when every provider fails.

use crate::defaults::DEFAULT_FALLBACK_TEMPLATES;
use murmur_core::{StylePrompt, TOPIC_PLACEHOLDER, Topic};
use murmur_error::{ContentError, ContentErrorKind, ContentResult};
use rand::Rng;
use rand::seq::SliceRandom;

/// A non-empty set of topic-parameterized templates.
#[derive(Debug, Clone)]
pub struct FallbackTemplates {
    templates: Vec<StylePrompt>,
}

impl FallbackTemplates {
    /// Build from template strings.
    ///
    /// # Errors
    ///
    /// Returns [`ContentErrorKind::NoTemplates`] when no non-blank template
    /// remains.
    pub fn new<S: AsRef<str>>(templates: &[S]) -> ContentResult<Self> {
        let templates: Vec<StylePrompt> = templates
            .iter()
            .map(|t| t.as_ref().trim())
            .filter(|t| !t.is_empty())
            .map(StylePrompt::from)
            .collect();
        if templates.is_empty() {
            return Err(ContentError::new(ContentErrorKind::NoTemplates));
        }
        Ok(Self { templates })
    }

    /// Every template rendered for `topic`, in random order.
    pub fn candidates<R: Rng>(&self, topic: &Topic, rng: &mut R) -> Vec<String> {
        let mut order: Vec<&StylePrompt> = self.templates.iter().collect();
        order.shuffle(rng);
        order.into_iter().map(|t| t.render(topic)).collect()
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Always false; construction rejects an empty set.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Whether every template mentions the topic.
    pub fn all_mention_topic(&self) -> bool {
        self.templates
            .iter()
            .all(|t| t.template().contains(TOPIC_PLACEHOLDER))
    }
}

impl Default for FallbackTemplates {
    fn default() -> Self {
        Self {
            templates: DEFAULT_FALLBACK_TEMPLATES
                .iter()
                .map(|t| StylePrompt::from(*t))
                .collect(),
        }
    }
}
