//! Topic choice with recency avoidance.

use chrono::NaiveDate;
use murmur_core::{PublicationRecord, Topic};
use murmur_error::{ContentError, ContentErrorKind, ContentResult};
use murmur_interface::PublicationLog;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

/// Picks a topic not published within the recency window.
#[derive(Debug, Clone)]
pub struct TopicSelector {
    topics: Vec<Topic>,
    recency_window_days: i64,
}

impl TopicSelector {
    /// Create a selector.
    ///
    /// Duplicate topics are kept; they simply weigh more in the draw.
    ///
    /// # Errors
    ///
    /// Returns [`ContentErrorKind::NoTopics`] for an empty collection.
    pub fn new(topics: Vec<Topic>, recency_window_days: u32) -> ContentResult<Self> {
        if topics.is_empty() {
            return Err(ContentError::new(ContentErrorKind::NoTopics));
        }
        Ok(Self {
            topics,
            recency_window_days: i64::from(recency_window_days),
        })
    }

    /// Configured topics.
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Whether a record dated `date` is inside the window as of `today`.
    ///
    /// Dates in the future count as recent.
    pub fn is_recent(&self, date: NaiveDate, today: NaiveDate) -> bool {
        (today - date).num_days() < self.recency_window_days
    }

    /// Choose a topic, consulting the log if one is available.
    ///
    /// A failing or missing log is treated as empty and malformed rows are
    /// skipped, so this never fails.
    #[instrument(skip(self, log, rng), fields(candidates = self.topics.len()))]
    pub async fn select<R: Rng + Send>(
        &self,
        log: Option<&dyn PublicationLog>,
        today: NaiveDate,
        rng: &mut R,
    ) -> Topic {
        let records = match log {
            Some(log) => match log.query().await {
                Ok(rows) => rows
                    .iter()
                    .filter_map(|row| match PublicationRecord::try_from_row(row) {
                        Ok(record) => Some(record),
                        Err(e) => {
                            debug!(log = log.log_name(), error = %e.kind, "Skipping malformed log row");
                            None
                        }
                    })
                    .collect(),
                Err(e) => {
                    warn!(log = log.log_name(), error = %e, "Publication log query failed, treating as empty");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        self.select_from_records(&records, today, rng)
    }

    /// Choose a topic given already-loaded records.
    pub fn select_from_records<R: Rng>(
        &self,
        records: &[PublicationRecord],
        today: NaiveDate,
        rng: &mut R,
    ) -> Topic {
        let recent: HashSet<&Topic> = records
            .iter()
            .filter(|r| self.is_recent(*r.date(), today))
            .map(|r| r.topic())
            .collect();

        let mut order: Vec<&Topic> = self.topics.iter().collect();
        order.shuffle(rng);

        if let Some(topic) = order.iter().find(|t| !recent.contains(*t)) {
            debug!(topic = %topic, "Selected topic");
            return (*topic).clone();
        }

        warn!(
            window_days = self.recency_window_days,
            "Every topic was published recently, relaxing recency"
        );
        // `topics` is non-empty by construction.
        self.topics
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| order[0].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_recency_window_edges() {
        let selector = TopicSelector::new(vec![Topic::new("A")], 2).unwrap();
        let today = date(2024, 5, 10);
        assert!(selector.is_recent(today, today));
        assert!(selector.is_recent(date(2024, 5, 9), today));
        assert!(!selector.is_recent(date(2024, 5, 8), today));
        assert!(selector.is_recent(date(2024, 5, 11), today));
    }

    #[test]
    fn test_zero_window_makes_nothing_recent() {
        let selector = TopicSelector::new(vec![Topic::new("A")], 0).unwrap();
        let today = date(2024, 5, 10);
        assert!(!selector.is_recent(today, today));
    }

    #[test]
    fn test_empty_topics_rejected() {
        let err = TopicSelector::new(vec![], 2).unwrap_err();
        assert_eq!(err.kind(), &ContentErrorKind::NoTopics);
    }
}
