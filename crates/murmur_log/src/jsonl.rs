//! Append-only JSON-lines file.

use async_trait::async_trait;
use murmur_core::{LogRow, PublicationRecord};
use murmur_error::{LogError, LogErrorKind, LogResult};
use murmur_interface::PublicationLog;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

/// One JSON array per line: `["2024-01-15","SQL","...","1790..."]`.
#[derive(Debug, Clone)]
pub struct JsonlPublicationLog {
    path: PathBuf,
}

impl JsonlPublicationLog {
    /// Log stored at `path`. The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File location.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Flatten a JSON cell to text; strings lose their quotes.
pub(crate) fn cell_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl PublicationLog for JsonlPublicationLog {
    #[instrument(skip(self, record), fields(path = %self.path.display()))]
    async fn append(&self, record: &PublicationRecord) -> LogResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut line = serde_json::to_string(&record.to_row())
            .map_err(|e| LogError::new(LogErrorKind::Malformed(e.to_string())))?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        debug!("Appended publication record");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn query(&self) -> LogResult<Vec<LogRow>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let rows = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(number, line)| match serde_json::from_str::<Vec<Value>>(line) {
                Ok(cells) => Some(cells.iter().map(cell_to_string).collect()),
                Err(e) => {
                    debug!(line = number + 1, error = %e, "Skipping unreadable log line");
                    None
                }
            })
            .collect();
        Ok(rows)
    }

    fn log_name(&self) -> &str {
        "jsonl"
    }
}
