//! Moves tasks from a Google Tasks list into Todoist.

use super::transformer::to_new_task;
use crate::config::SyncConfig;
use crate::error::{Error, Result};
use crate::model::{CreateStatus, Task};
use crate::services::{TaskListSource, TaskTracker};

/// Sync statistics
#[derive(Debug, Default)]
pub struct SyncStats {
    pub created: usize,
    pub deleted: usize,
    pub skipped: usize,
    pub errors: Vec<SyncFailure>,
}

impl SyncStats {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// A task that could not be moved in full.
#[derive(Debug)]
pub struct SyncFailure {
    pub task_id: String,
    pub title: String,
    pub error: Error,
}

impl std::fmt::Display for SyncFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' ({}): {}", self.title, self.task_id, self.error)
    }
}

pub struct SyncPipeline<'a> {
    source: &'a dyn TaskListSource,
    tracker: &'a dyn TaskTracker,
    list_name: String,
}

impl<'a> SyncPipeline<'a> {
    pub fn new(
        config: &SyncConfig,
        source: &'a dyn TaskListSource,
        tracker: &'a dyn TaskTracker,
    ) -> Self {
        Self {
            source,
            tracker,
            list_name: config.task_list_name.clone(),
        }
    }

    /// Move every open task of the configured list.
    ///
    /// Listing failures abort the run. Per-task failures are collected in
    /// [`SyncStats::errors`] and the remaining tasks are still attempted.
    pub async fn sync(&self, dry_run: bool) -> Result<SyncStats> {
        let list = self
            .source
            .find_list(&self.list_name)
            .await?
            .ok_or_else(|| Error::lookup_miss("task list", self.list_name.as_str()))?;

        let tasks = self.source.list_tasks(&list.id).await?;
        log::info!("Found {} open tasks in \"{}\"", tasks.len(), list.title);

        let mut stats = SyncStats::default();
        for task in &tasks {
            self.transfer(&list.id, task, dry_run, &mut stats).await;
        }
        Ok(stats)
    }

    /// Create `task` in Todoist, then delete it from the source list only if
    /// the creation was confirmed.
    async fn transfer(&self, list_id: &str, task: &Task, dry_run: bool, stats: &mut SyncStats) {
        let Some(payload) = to_new_task(task) else {
            log::debug!("Skipping task {} without a title", task.id);
            stats.skipped += 1;
            return;
        };

        if dry_run {
            println!(
                "Would create: \"{}\"{}",
                payload.content,
                payload
                    .due_date
                    .as_deref()
                    .map(|d| format!(" (due {})", d))
                    .unwrap_or_default()
            );
            stats.created += 1;
            stats.deleted += 1;
            return;
        }

        let created_id = match self.tracker.create_task(&payload).await {
            Ok(CreateStatus::Created { id }) => id,
            Ok(CreateStatus::Rejected { reason }) => {
                log::error!("Todoist did not confirm '{}': {}", task.title, reason);
                self.record(stats, task, Error::write("todoist task", reason));
                return;
            }
            Err(e) => {
                log::error!("Failed to create '{}': {}", task.title, e);
                self.record(stats, task, e);
                return;
            }
        };
        log::info!("Created Todoist task {} for '{}'", created_id, task.title);
        stats.created += 1;

        match self.source.delete_task(list_id, &task.id).await {
            Ok(()) => {
                log::debug!("Deleted source task {}", task.id);
                stats.deleted += 1;
            }
            Err(e) => {
                log::error!(
                    "Created '{}' but could not delete it from the source list: {}",
                    task.title,
                    e
                );
                self.record(stats, task, e.into_cleanup("source task"));
            }
        }
    }

    fn record(&self, stats: &mut SyncStats, task: &Task, error: Error) {
        stats.errors.push(SyncFailure {
            task_id: task.id.clone(),
            title: task.title.clone(),
            error,
        });
    }
}
