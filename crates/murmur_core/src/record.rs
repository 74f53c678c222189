//! Rows written to and read back from the publication log.

use crate::{ExternalId, Topic};
use chrono::{NaiveDate, NaiveDateTime};
use derive_getters::Getters;
use murmur_error::{LogError, LogErrorKind, LogResult};
use serde::{Deserialize, Serialize};

/// Date format used in the first column of every log row.
pub const RECORD_DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw row as stored by a log backend: `[date, topic, content, external_id]`.
pub type LogRow = Vec<String>;

/// One successful publication.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use murmur_core::{ExternalId, PublicationRecord, Topic};
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
/// let record = PublicationRecord::new(date, Topic::new("SQL"), "Use CTEs.", ExternalId::new("42"));
/// let row = record.to_row();
/// assert_eq!(row[0], "2024-03-09");
/// assert_eq!(PublicationRecord::try_from_row(&row).unwrap(), record);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PublicationRecord {
    /// Calendar date of publication
    date: NaiveDate,
    /// Topic the post was about
    topic: Topic,
    /// Published text
    content: String,
    /// Identifier assigned by the platform
    external_id: ExternalId,
}

impl PublicationRecord {
    /// Create a record.
    pub fn new(
        date: NaiveDate,
        topic: Topic,
        content: impl Into<String>,
        external_id: ExternalId,
    ) -> Self {
        Self {
            date,
            topic,
            content: content.into(),
            external_id,
        }
    }

    /// Serialize to the four-column row layout.
    pub fn to_row(&self) -> LogRow {
        vec![
            self.date.format(RECORD_DATE_FORMAT).to_string(),
            self.topic.to_string(),
            self.content.clone(),
            self.external_id.to_string(),
        ]
    }

    /// Parse a row produced by [`PublicationRecord::to_row`].
    ///
    /// A header row, a short row, or an unparseable date yields
    /// [`LogErrorKind::Malformed`]. Extra trailing columns are ignored, and a
    /// missing identifier column is tolerated since older logs omitted it.
    #[track_caller]
    pub fn try_from_row(row: &[String]) -> LogResult<Self> {
        if row.len() < 3 {
            return Err(LogError::new(LogErrorKind::Malformed(format!(
                "expected at least 3 columns, got {}",
                row.len()
            ))));
        }
        let date = parse_date(row[0].trim()).ok_or_else(|| {
            LogError::new(LogErrorKind::Malformed(format!(
                "unparseable date '{}'",
                row[0]
            )))
        })?;
        let external_id = row.get(3).cloned().unwrap_or_default();
        Ok(Self {
            date,
            topic: Topic::new(row[1].clone()),
            content: row[2].clone(),
            external_id: ExternalId::new(external_id),
        })
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, RECORD_DATE_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}
