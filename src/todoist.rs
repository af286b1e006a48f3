//! Todoist REST client.

use crate::error::{Error, Result};
use crate::model::{CreateStatus, NewTask, Project, Task};
use crate::services::TaskTracker;
use async_trait::async_trait;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.todoist.com/rest/v2";

#[derive(Debug, Deserialize)]
struct TodoistProject {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct TodoistTask {
    id: String,
    content: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    project_id: Option<String>,
    #[serde(default)]
    due: Option<TodoistDue>,
}

#[derive(Debug, Deserialize)]
struct TodoistDue {
    /// Human-readable form, e.g. "every monday".
    #[serde(default)]
    string: Option<String>,
    #[serde(default)]
    date: Option<String>,
}

impl From<TodoistTask> for Task {
    fn from(t: TodoistTask) -> Self {
        let due = t.due.and_then(|d| d.string.filter(|s| !s.is_empty()).or(d.date));
        Task {
            id: t.id,
            title: t.content,
            notes: Some(t.description).filter(|d| !d.is_empty()),
            due,
            links: Vec::new(),
            project_id: t.project_id,
        }
    }
}

pub struct TodoistClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl TodoistClient {
    pub fn new(token: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str, what: &str) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| Error::fetch(what, e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();
            return Err(Error::fetch(what, format!("{}: {}", status, error_text)));
        }

        resp.json().await.map_err(|e| Error::fetch(what, e))
    }
}

#[async_trait]
impl TaskTracker for TodoistClient {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        let projects: Vec<TodoistProject> = self.get_json("projects", "todoist projects").await?;
        Ok(projects
            .into_iter()
            .map(|p| Project {
                id: p.id,
                name: p.name,
            })
            .collect())
    }

    async fn list_open_tasks(&self) -> Result<Vec<Task>> {
        // The tasks endpoint only ever returns uncompleted tasks.
        let tasks: Vec<TodoistTask> = self.get_json("tasks", "todoist tasks").await?;
        Ok(tasks.into_iter().map(Task::from).collect())
    }

    async fn create_task(&self, task: &NewTask) -> Result<CreateStatus> {
        let url = format!("{}/tasks", self.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(task)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Ok(create_status(status.is_success(), status.as_str(), &body))
    }
}

/// A creation is confirmed only by a success status and a task id in the body.
fn create_status(success: bool, status: &str, body: &str) -> CreateStatus {
    if !success {
        return CreateStatus::Rejected {
            reason: format!("{}: {}", status, body),
        };
    }

    let id = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| match v.get("id") {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            _ => None,
        });

    match id {
        Some(id) => CreateStatus::Created { id },
        None => CreateStatus::Rejected {
            reason: format!("{}: response carried no task id", status),
        },
    }
}
