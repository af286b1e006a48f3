//! Google Workspace clients: Tasks, Drive and Sheets.
//!
//! All clients authenticate with a bearer access token obtained outside of
//! taskbridge.

mod drive;
mod sheets;
mod tasks;

pub use drive::{DriveClient, DRIVE_BASE_URL, DRIVE_UPLOAD_URL, FOLDER_MIME_TYPE};
pub use sheets::{SheetsWorkspace, SHEETS_BASE_URL};
pub use tasks::{TasksClient, TASKS_BASE_URL};

/// Page size requested from listing endpoints.
const PAGE_SIZE: u32 = 100;

/// HTTP client plus the access token, shared by the service clients.
#[derive(Clone)]
pub struct GoogleApi {
    client: reqwest::Client,
    token: String,
}

impl GoogleApi {
    pub fn new(access_token: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: access_token.to_string(),
        }
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client.get(url).bearer_auth(&self.token)
    }

    fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.client.post(url).bearer_auth(&self.token)
    }

    fn put(&self, url: &str) -> reqwest::RequestBuilder {
        self.client.put(url).bearer_auth(&self.token)
    }

    fn patch(&self, url: &str) -> reqwest::RequestBuilder {
        self.client.patch(url).bearer_auth(&self.token)
    }

    fn delete(&self, url: &str) -> reqwest::RequestBuilder {
        self.client.delete(url).bearer_auth(&self.token)
    }
}

/// Status line and body of a failed response.
async fn describe_failure(resp: reqwest::Response) -> String {
    let status = resp.status();
    let error_text = resp.text().await.unwrap_or_default();
    format!("{}: {}", status, error_text)
}

/// Query string from key/value pairs.
fn query(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
