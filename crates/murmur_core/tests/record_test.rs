use chrono::NaiveDate;
use murmur_core::{ExternalId, PublicationRecord, SeenContentSet, StylePrompt, Topic};
use murmur_error::LogErrorKind;

fn row(cols: &[&str]) -> Vec<String> {
    cols.iter().map(|c| c.to_string()).collect()
}

#[test]
fn test_record_round_trips_through_row() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let record = PublicationRecord::new(
        date,
        Topic::new("Feature Engineering"),
        "Scale your features before fitting a distance-based model.",
        ExternalId::new("1746000000000000000"),
    );

    let parsed = PublicationRecord::try_from_row(&record.to_row()).unwrap();
    assert_eq!(parsed, record);
}

#[test]
fn test_header_row_is_malformed() {
    let err = PublicationRecord::try_from_row(&row(&["Date", "Topic", "Tweet", "Tweet ID"]))
        .unwrap_err();
    assert!(matches!(err.kind(), LogErrorKind::Malformed(_)));
}

#[test]
fn test_short_row_is_malformed() {
    let err = PublicationRecord::try_from_row(&row(&["2024-01-15", "SQL"])).unwrap_err();
    assert!(matches!(err.kind(), LogErrorKind::Malformed(_)));
}

#[test]
fn test_row_without_identifier_is_accepted() {
    let parsed =
        PublicationRecord::try_from_row(&row(&["2024-01-15", "SQL", "Index your joins."])).unwrap();
    assert_eq!(parsed.topic().as_str(), "SQL");
    assert_eq!(parsed.external_id().as_str(), "");
}

#[test]
fn test_datetime_cell_is_reduced_to_date() {
    let parsed =
        PublicationRecord::try_from_row(&row(&["2024-01-15 09:30:00", "SQL", "x", "1"])).unwrap();
    assert_eq!(*parsed.date(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
}

#[test]
fn test_style_prompt_replaces_every_placeholder() {
    let style = StylePrompt::new("{topic}? Explain {topic} simply.");
    assert_eq!(style.render(&Topic::new("Bias")), "Bias? Explain Bias simply.");
}

#[test]
fn test_seen_set_is_exact_match() {
    let mut seen: SeenContentSet = ["Hello world"].into_iter().collect();
    assert!(seen.contains("Hello world"));
    assert!(!seen.contains("hello world"));
    assert!(!seen.insert("Hello world"));
    assert!(seen.insert("hello world"));
    assert_eq!(seen.len(), 2);
}
