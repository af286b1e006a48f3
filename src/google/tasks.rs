//! Google Tasks client.

use super::{describe_failure, query, GoogleApi, PAGE_SIZE};
use crate::error::{Error, Result};
use crate::model::{Task, TaskLink, TaskListRef};
use crate::services::TaskListSource;
use async_trait::async_trait;
use serde::Deserialize;

pub const TASKS_BASE_URL: &str = "https://tasks.googleapis.com/tasks/v1";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Page<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireTaskList {
    id: String,
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct WireTask {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    due: Option<String>,
    #[serde(default)]
    links: Vec<TaskLink>,
}

impl From<WireTask> for Task {
    fn from(t: WireTask) -> Self {
        Task {
            id: t.id,
            title: t.title,
            notes: t.notes,
            due: t.due,
            links: t.links,
            project_id: None,
        }
    }
}

pub struct TasksClient {
    api: GoogleApi,
    base_url: String,
}

impl TasksClient {
    pub fn new(api: GoogleApi) -> Self {
        Self {
            api,
            base_url: TASKS_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Follow `nextPageToken` until every item of a listing has been read.
    async fn get_all<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        what: &str,
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;
        let page_size = PAGE_SIZE.to_string();

        loop {
            let mut all_params = params.to_vec();
            all_params.push(("maxResults", page_size.as_str()));
            if let Some(token) = &page_token {
                all_params.push(("pageToken", token.as_str()));
            }
            let url = format!("{}/{}?{}", self.base_url, path, query(&all_params));

            let resp = self
                .api
                .get(&url)
                .send()
                .await
                .map_err(|e| Error::fetch(what, e))?;
            if !resp.status().is_success() {
                return Err(Error::fetch(what, describe_failure(resp).await));
            }
            let page: Page<T> = resp.json().await.map_err(|e| Error::fetch(what, e))?;

            items.extend(page.items);
            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl TaskListSource for TasksClient {
    async fn find_list(&self, name: &str) -> Result<Option<TaskListRef>> {
        let lists: Vec<WireTaskList> = self.get_all("users/@me/lists", &[], "task lists").await?;
        Ok(lists.into_iter().find(|l| l.title == name).map(|l| TaskListRef {
            id: l.id,
            title: l.title,
        }))
    }

    async fn list_tasks(&self, list_id: &str) -> Result<Vec<Task>> {
        let path = format!("lists/{}/tasks", urlencoding::encode(list_id));
        let tasks: Vec<WireTask> = self
            .get_all(
                &path,
                &[("showCompleted", "false"), ("showHidden", "false")],
                "tasks",
            )
            .await?;
        Ok(tasks.into_iter().map(Task::from).collect())
    }

    async fn delete_task(&self, list_id: &str, task_id: &str) -> Result<()> {
        let url = format!(
            "{}/lists/{}/tasks/{}",
            self.base_url,
            urlencoding::encode(list_id),
            urlencoding::encode(task_id)
        );
        let resp = self
            .api
            .delete(&url)
            .send()
            .await
            .map_err(|e| Error::cleanup("source task", e))?;

        if !resp.status().is_success() {
            return Err(Error::cleanup("source task", describe_failure(resp).await));
        }
        Ok(())
    }
}
