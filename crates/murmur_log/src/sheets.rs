//! Google Sheets values API backend.

use crate::jsonl::cell_to_string;
use async_trait::async_trait;
use murmur_core::{LogRow, PublicationRecord};
use murmur_error::{LogError, LogErrorKind, LogResult};
use murmur_interface::PublicationLog;
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Sheets API base URL.
pub const SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

const TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize)]
struct AppendBody<'a> {
    values: [&'a LogRow; 1],
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// Rows kept in a spreadsheet range, one publication per row.
#[derive(Debug, Clone)]
pub struct SheetsPublicationLog {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    range: String,
    access_token: String,
}

impl SheetsPublicationLog {
    /// Log in `range` (e.g. `Sheet1!A:D`) of a spreadsheet.
    pub fn new(
        spreadsheet_id: impl Into<String>,
        range: impl Into<String>,
        access_token: impl Into<String>,
    ) -> LogResult<Self> {
        Self::with_base_url(SHEETS_API_URL, spreadsheet_id, range, access_token)
    }

    /// Same as [`SheetsPublicationLog::new`] against another API root.
    pub fn with_base_url(
        base_url: impl Into<String>,
        spreadsheet_id: impl Into<String>,
        range: impl Into<String>,
        access_token: impl Into<String>,
    ) -> LogResult<Self> {
        let access_token = access_token.into();
        if access_token.trim().is_empty() {
            return Err(LogError::new(LogErrorKind::Configuration(
                "spreadsheet access token is empty".to_string(),
            )));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .map_err(|e| LogError::new(LogErrorKind::Configuration(e.to_string())))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            range: range.into(),
            access_token,
        })
    }

    fn values_url(&self, suffix: &str) -> LogResult<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            LogError::new(LogErrorKind::Configuration(format!(
                "invalid base url '{}': {}",
                self.base_url, e
            )))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                LogError::new(LogErrorKind::Configuration(format!(
                    "base url '{}' cannot carry a path",
                    self.base_url
                )))
            })?
            .pop_if_empty()
            .push(&self.spreadsheet_id)
            .push("values")
            .push(&format!("{}{}", self.range, suffix));
        Ok(url)
    }

    async fn check(response: Response) -> LogResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %body, "Spreadsheet API returned error");
        Err(LogError::new(LogErrorKind::Api {
            status: status.as_u16(),
            body,
        }))
    }
}

fn unavailable(e: reqwest::Error) -> LogError {
    LogError::new(LogErrorKind::Unavailable(e.to_string()))
}

#[async_trait]
impl PublicationLog for SheetsPublicationLog {
    #[instrument(skip(self, record), fields(spreadsheet = %self.spreadsheet_id))]
    async fn append(&self, record: &PublicationRecord) -> LogResult<()> {
        let row = record.to_row();
        let url = self.values_url(":append")?;

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("valueInputOption", "RAW"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&AppendBody { values: [&row] })
            .send()
            .await
            .map_err(unavailable)?;
        Self::check(response).await?;
        debug!("Appended row to spreadsheet");
        Ok(())
    }

    #[instrument(skip(self), fields(spreadsheet = %self.spreadsheet_id))]
    async fn query(&self) -> LogResult<Vec<LogRow>> {
        let url = self.values_url("")?;

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(unavailable)?;
        let range: ValueRange = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| LogError::new(LogErrorKind::Malformed(e.to_string())))?;

        debug!(rows = range.values.len(), "Fetched spreadsheet rows");
        Ok(range
            .values
            .iter()
            .map(|cells| cells.iter().map(cell_to_string).collect())
            .collect())
    }

    fn log_name(&self) -> &str {
        "sheets"
    }
}
