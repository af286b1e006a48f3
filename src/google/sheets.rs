//! Google Sheets as the working document for report exports.

use super::drive::DriveClient;
use super::{describe_failure, query, GoogleApi};
use crate::error::{Error, Result};
use crate::model::FileRef;
use crate::report::PDF_MIME_TYPE;
use crate::services::{FileStore, ReportWorkspace};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Spreadsheet {
    spreadsheet_id: String,
    #[serde(default)]
    properties: Option<SpreadsheetProperties>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SpreadsheetProperties {
    title: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange<'a> {
    range: &'a str,
    major_dimension: &'a str,
    values: &'a [Vec<String>],
}

/// Creates spreadsheets through the Sheets API and exports or trashes them
/// through Drive.
pub struct SheetsWorkspace {
    api: GoogleApi,
    drive: DriveClient,
    base_url: String,
}

impl SheetsWorkspace {
    pub fn new(api: GoogleApi) -> Self {
        Self {
            drive: DriveClient::new(api.clone()),
            api,
            base_url: SHEETS_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, sheets_url: &str, drive_url: &str) -> Self {
        self.base_url = sheets_url.trim_end_matches('/').to_string();
        self.drive = self.drive.with_base_url(drive_url);
        self
    }
}

#[async_trait]
impl ReportWorkspace for SheetsWorkspace {
    async fn create_document(&self, title: &str) -> Result<FileRef> {
        let url = format!("{}/spreadsheets", self.base_url);
        let body = serde_json::json!({
            "properties": SpreadsheetProperties { title: title.to_string() },
        });

        let resp = self
            .api
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::write("working spreadsheet", e))?;
        if !resp.status().is_success() {
            return Err(Error::write("working spreadsheet", describe_failure(resp).await));
        }

        let sheet: Spreadsheet = resp
            .json()
            .await
            .map_err(|e| Error::write("working spreadsheet", e))?;
        log::debug!("Created working spreadsheet {}", sheet.spreadsheet_id);
        Ok(FileRef {
            name: sheet
                .properties
                .map(|p| p.title)
                .unwrap_or_else(|| title.to_string()),
            id: sheet.spreadsheet_id,
        })
    }

    async fn write_rows(&self, doc: &FileRef, rows: &[Vec<String>]) -> Result<()> {
        let range = "A1";
        let url = format!(
            "{}/spreadsheets/{}/values/{}?{}",
            self.base_url,
            urlencoding::encode(&doc.id),
            range,
            query(&[("valueInputOption", "RAW")])
        );
        let body = ValueRange {
            range,
            major_dimension: "ROWS",
            values: rows,
        };

        let resp = self
            .api
            .put(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::write("report rows", e))?;
        if !resp.status().is_success() {
            return Err(Error::write("report rows", describe_failure(resp).await));
        }
        Ok(())
    }

    async fn export_pdf(&self, doc: &FileRef) -> Result<Vec<u8>> {
        self.drive.export(&doc.id, PDF_MIME_TYPE).await
    }

    async fn discard(&self, doc: &FileRef) -> Result<()> {
        self.drive.trash_file(doc).await
    }
}
