//! Interfaces to the hosted services the pipelines talk to.
//!
//! Every call maps to exactly one remote request (or one paginated listing)
//! and is attempted once; callers decide whether a failure is fatal.

use crate::error::Result;
use crate::model::{CreateStatus, FileRef, NewTask, Project, Task, TaskListRef};
use async_trait::async_trait;

/// Task-tracking service (Todoist).
#[async_trait]
pub trait TaskTracker: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<Project>>;

    /// All uncompleted tasks, in the order the service returns them.
    async fn list_open_tasks(&self) -> Result<Vec<Task>>;

    /// Create a task. `Ok(CreateStatus::Rejected)` means the service answered
    /// but did not confirm the creation.
    async fn create_task(&self, task: &NewTask) -> Result<CreateStatus>;
}

/// Source task lists (Google Tasks).
#[async_trait]
pub trait TaskListSource: Send + Sync {
    /// Look up a task list by its display name.
    async fn find_list(&self, name: &str) -> Result<Option<TaskListRef>>;

    /// Open tasks of a list; completed and hidden tasks are excluded.
    async fn list_tasks(&self, list_id: &str) -> Result<Vec<Task>>;

    async fn delete_task(&self, list_id: &str, task_id: &str) -> Result<()>;
}

/// Tabular working document that can be exported to PDF (Google Sheets).
#[async_trait]
pub trait ReportWorkspace: Send + Sync {
    async fn create_document(&self, title: &str) -> Result<FileRef>;

    /// Write `rows` starting at the top-left cell.
    async fn write_rows(&self, doc: &FileRef, rows: &[Vec<String>]) -> Result<()>;

    async fn export_pdf(&self, doc: &FileRef) -> Result<Vec<u8>>;

    async fn discard(&self, doc: &FileRef) -> Result<()>;
}

/// Folder-based file storage (Google Drive).
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn find_folder(&self, folder_id: &str) -> Result<Option<FileRef>>;

    /// Files in `folder` whose name equals `name` exactly, trashed ones excluded.
    async fn find_files_by_name(&self, folder: &FileRef, name: &str) -> Result<Vec<FileRef>>;

    async fn create_file(
        &self,
        folder: &FileRef,
        name: &str,
        mime_type: &str,
        content: Vec<u8>,
    ) -> Result<FileRef>;

    /// Move a file to the trash.
    async fn trash_file(&self, file: &FileRef) -> Result<()>;
}
