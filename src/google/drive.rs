//! Google Drive client.

use super::{describe_failure, query, GoogleApi, PAGE_SIZE};
use crate::error::{Error, Result};
use crate::model::FileRef;
use crate::services::FileStore;
use async_trait::async_trait;
use serde::Deserialize;

pub const DRIVE_BASE_URL: &str = "https://www.googleapis.com/drive/v3";
pub const DRIVE_UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3";
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

const UPLOAD_BOUNDARY: &str = "taskbridge_upload_boundary";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFile {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    mime_type: Option<String>,
    #[serde(default)]
    trashed: bool,
}

impl From<DriveFile> for FileRef {
    fn from(f: DriveFile) -> Self {
        FileRef {
            id: f.id,
            name: f.name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
    #[serde(default)]
    next_page_token: Option<String>,
}

pub struct DriveClient {
    api: GoogleApi,
    base_url: String,
    upload_url: String,
}

impl DriveClient {
    pub fn new(api: GoogleApi) -> Self {
        Self {
            api,
            base_url: DRIVE_BASE_URL.to_string(),
            upload_url: DRIVE_UPLOAD_URL.to_string(),
        }
    }

    /// Point both metadata and upload requests at `base_url`.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        self.base_url = base_url.to_string();
        self.upload_url = format!("{}/upload", base_url);
        self
    }

    fn file_url(&self, file_id: &str) -> String {
        format!("{}/files/{}", self.base_url, urlencoding::encode(file_id))
    }

    /// Download `file_id` converted to `mime_type`.
    pub async fn export(&self, file_id: &str, mime_type: &str) -> Result<Vec<u8>> {
        let url = format!(
            "{}/export?{}",
            self.file_url(file_id),
            query(&[("mimeType", mime_type)])
        );
        let resp = self
            .api
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::write("report export", e))?;

        if !resp.status().is_success() {
            return Err(Error::write("report export", describe_failure(resp).await));
        }
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| Error::write("report export", e))?;
        Ok(bytes.to_vec())
    }

    async fn set_trashed(&self, file_id: &str) -> Result<()> {
        let resp = self
            .api
            .patch(&self.file_url(file_id))
            .json(&serde_json::json!({ "trashed": true }))
            .send()
            .await
            .map_err(|e| Error::cleanup(file_id, e))?;

        if !resp.status().is_success() {
            return Err(Error::cleanup(file_id, describe_failure(resp).await));
        }
        Ok(())
    }
}

/// Single quotes and backslashes must be escaped inside Drive query strings.
fn escape_query_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// `multipart/related` body carrying JSON metadata followed by the file content.
fn multipart_body(metadata: &serde_json::Value, mime_type: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(content.len() + 256);
    body.extend_from_slice(format!("--{}\r\n", UPLOAD_BOUNDARY).as_bytes());
    body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
    body.extend_from_slice(metadata.to_string().as_bytes());
    body.extend_from_slice(format!("\r\n--{}\r\n", UPLOAD_BOUNDARY).as_bytes());
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", mime_type).as_bytes());
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", UPLOAD_BOUNDARY).as_bytes());
    body
}

#[async_trait]
impl FileStore for DriveClient {
    async fn find_folder(&self, folder_id: &str) -> Result<Option<FileRef>> {
        let url = format!(
            "{}?{}",
            self.file_url(folder_id),
            query(&[("fields", "id,name,mimeType,trashed")])
        );
        let resp = self
            .api
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::fetch("report folder", e))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(Error::fetch("report folder", describe_failure(resp).await));
        }

        let file: DriveFile = resp
            .json()
            .await
            .map_err(|e| Error::fetch("report folder", e))?;
        if file.trashed || file.mime_type.as_deref() != Some(FOLDER_MIME_TYPE) {
            log::warn!("{} is not an active folder", folder_id);
            return Ok(None);
        }
        Ok(Some(file.into()))
    }

    async fn find_files_by_name(&self, folder: &FileRef, name: &str) -> Result<Vec<FileRef>> {
        let q = format!(
            "name = '{}' and '{}' in parents and trashed = false",
            escape_query_value(name),
            escape_query_value(&folder.id)
        );
        let page_size = PAGE_SIZE.to_string();
        let mut files = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut params = vec![
                ("q", q.as_str()),
                ("fields", "nextPageToken,files(id,name)"),
                ("pageSize", page_size.as_str()),
            ];
            if let Some(token) = &page_token {
                params.push(("pageToken", token.as_str()));
            }
            let url = format!("{}/files?{}", self.base_url, query(&params));

            let resp = self
                .api
                .get(&url)
                .send()
                .await
                .map_err(|e| Error::fetch("file listing", e))?;
            if !resp.status().is_success() {
                return Err(Error::fetch("file listing", describe_failure(resp).await));
            }
            let list: FileList = resp
                .json()
                .await
                .map_err(|e| Error::fetch("file listing", e))?;

            files.extend(list.files.into_iter().map(FileRef::from));
            match list.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(files)
    }

    async fn create_file(
        &self,
        folder: &FileRef,
        name: &str,
        mime_type: &str,
        content: Vec<u8>,
    ) -> Result<FileRef> {
        let metadata = serde_json::json!({
            "name": name,
            "mimeType": mime_type,
            "parents": [folder.id],
        });
        let url = format!(
            "{}/files?{}",
            self.upload_url,
            query(&[("uploadType", "multipart"), ("fields", "id,name")])
        );

        let resp = self
            .api
            .post(&url)
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={}", UPLOAD_BOUNDARY),
            )
            .body(multipart_body(&metadata, mime_type, &content))
            .send()
            .await
            .map_err(|e| Error::write(name, e))?;

        if !resp.status().is_success() {
            return Err(Error::write(name, describe_failure(resp).await));
        }
        let file: DriveFile = resp.json().await.map_err(|e| Error::write(name, e))?;
        Ok(file.into())
    }

    async fn trash_file(&self, file: &FileRef) -> Result<()> {
        self.set_trashed(&file.id).await
    }
}
