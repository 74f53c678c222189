use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use murmur_content::TopicSelector;
use murmur_core::{ExternalId, LogRow, PublicationRecord, Topic};
use murmur_error::{LogError, LogErrorKind, LogResult};
use murmur_interface::PublicationLog;
use rand::SeedableRng;
use rand::rngs::StdRng;

struct FixedLog {
    rows: Option<Vec<LogRow>>,
}

#[async_trait]
impl PublicationLog for FixedLog {
    async fn append(&self, _record: &PublicationRecord) -> LogResult<()> {
        Ok(())
    }

    async fn query(&self) -> LogResult<Vec<LogRow>> {
        self.rows.clone().ok_or_else(|| {
            LogError::new(LogErrorKind::Unavailable("spreadsheet offline".into()))
        })
    }

    fn log_name(&self) -> &str {
        "fixed"
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn row(date: NaiveDate, topic: &str) -> LogRow {
    PublicationRecord::new(date, Topic::new(topic), "text", ExternalId::new("1")).to_row()
}

fn topics(names: &[&str]) -> Vec<Topic> {
    names.iter().map(|n| Topic::new(*n)).collect()
}

#[tokio::test]
async fn test_recent_topic_is_avoided() {
    let log = FixedLog {
        rows: Some(vec![row(today(), "T")]),
    };
    let selector = TopicSelector::new(topics(&["T", "U"]), 2).unwrap();

    for seed in 0..25 {
        let mut rng = StdRng::seed_from_u64(seed);
        let topic = selector.select(Some(&log), today(), &mut rng).await;
        assert_eq!(topic.as_str(), "U");
    }
}

#[tokio::test]
async fn test_topic_outside_window_is_eligible_again() {
    let log = FixedLog {
        rows: Some(vec![row(today() - Duration::days(5), "T"), row(today(), "U")]),
    };
    let selector = TopicSelector::new(topics(&["T", "U"]), 2).unwrap();

    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let topic = selector.select(Some(&log), today(), &mut rng).await;
        assert_eq!(topic.as_str(), "T");
    }
}

#[tokio::test]
async fn test_all_recent_relaxes_to_a_configured_topic() {
    let log = FixedLog {
        rows: Some(vec![row(today(), "A")]),
    };
    let selector = TopicSelector::new(topics(&["A"]), 2).unwrap();
    let mut rng = StdRng::seed_from_u64(4);

    let topic = selector.select(Some(&log), today(), &mut rng).await;
    assert_eq!(topic.as_str(), "A");
}

#[tokio::test]
async fn test_malformed_rows_do_not_block_selection() {
    let log = FixedLog {
        rows: Some(vec![
            vec!["Date".into(), "Topic".into(), "Tweet".into(), "Tweet ID".into()],
            vec!["garbage".into()],
            vec![],
            row(today(), "T"),
        ]),
    };
    let selector = TopicSelector::new(topics(&["T", "U"]), 2).unwrap();

    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let topic = selector.select(Some(&log), today(), &mut rng).await;
        assert_eq!(topic.as_str(), "U");
    }
}

#[tokio::test]
async fn test_query_failure_is_treated_as_empty_log() {
    let log = FixedLog { rows: None };
    let selector = TopicSelector::new(topics(&["A", "B"]), 2).unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    let topic = selector.select(Some(&log), today(), &mut rng).await;
    assert!(["A", "B"].contains(&topic.as_str()));
}

#[tokio::test]
async fn test_without_a_log_any_topic_may_be_chosen() {
    let selector = TopicSelector::new(topics(&["A", "B", "C"]), 2).unwrap();
    let mut chosen = std::collections::HashSet::new();

    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        chosen.insert(selector.select(None, today(), &mut rng).await);
    }

    assert_eq!(chosen.len(), 3);
}
