//! Process-local log, mostly for tests and previews.

use async_trait::async_trait;
use murmur_core::{LogRow, PublicationRecord};
use murmur_error::LogResult;
use murmur_interface::PublicationLog;
use std::sync::Mutex;

/// Log held in memory; lost at exit.
#[derive(Debug, Default)]
pub struct InMemoryPublicationLog {
    rows: Mutex<Vec<LogRow>>,
}

impl InMemoryPublicationLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log pre-filled with raw rows.
    pub fn with_rows(rows: Vec<LogRow>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }

    /// Snapshot of the stored rows.
    pub fn rows(&self) -> Vec<LogRow> {
        self.rows
            .lock()
            .map(|rows| rows.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

#[async_trait]
impl PublicationLog for InMemoryPublicationLog {
    async fn append(&self, record: &PublicationRecord) -> LogResult<()> {
        let mut rows = self
            .rows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        rows.push(record.to_row());
        Ok(())
    }

    async fn query(&self) -> LogResult<Vec<LogRow>> {
        Ok(self.rows())
    }

    fn log_name(&self) -> &str {
        "memory"
    }
}
