//! In-memory stand-ins for the hosted services.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;
use taskbridge::error::{Error, Result};
use taskbridge::model::{CreateStatus, FileRef, NewTask, Project, Task, TaskListRef};
use taskbridge::services::{FileStore, ReportWorkspace, TaskListSource, TaskTracker};

#[derive(Default)]
pub struct FakeTracker {
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub fail_listing: bool,
    /// Titles whose creation is answered with a rejection.
    pub reject_titles: HashSet<String>,
    /// Titles whose creation fails at the transport level.
    pub error_titles: HashSet<String>,
    pub created: Mutex<Vec<NewTask>>,
}

impl FakeTracker {
    pub fn with_tasks(projects: Vec<Project>, tasks: Vec<Task>) -> Self {
        Self {
            projects,
            tasks,
            ..Default::default()
        }
    }

    pub fn created(&self) -> Vec<NewTask> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskTracker for FakeTracker {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        if self.fail_listing {
            return Err(Error::fetch("todoist projects", "503 Service Unavailable"));
        }
        Ok(self.projects.clone())
    }

    async fn list_open_tasks(&self) -> Result<Vec<Task>> {
        if self.fail_listing {
            return Err(Error::fetch("todoist tasks", "503 Service Unavailable"));
        }
        Ok(self.tasks.clone())
    }

    async fn create_task(&self, task: &NewTask) -> Result<CreateStatus> {
        if self.error_titles.contains(&task.content) {
            return Err(Error::write("todoist task", "connection reset"));
        }
        if self.reject_titles.contains(&task.content) {
            return Ok(CreateStatus::Rejected {
                reason: "400 Bad Request".to_string(),
            });
        }
        let mut created = self.created.lock().unwrap();
        created.push(task.clone());
        Ok(CreateStatus::Created {
            id: format!("todo-{}", created.len()),
        })
    }
}

#[derive(Default)]
pub struct FakeTaskLists {
    pub lists: Vec<TaskListRef>,
    pub tasks: Mutex<Vec<Task>>,
    pub fail_listing: bool,
    pub undeletable: HashSet<String>,
    pub deleted: Mutex<Vec<String>>,
}

impl FakeTaskLists {
    pub fn single(name: &str, tasks: Vec<Task>) -> Self {
        Self {
            lists: vec![TaskListRef {
                id: "list-1".to_string(),
                title: name.to_string(),
            }],
            tasks: Mutex::new(tasks),
            ..Default::default()
        }
    }

    pub fn remaining_ids(&self) -> Vec<String> {
        self.tasks.lock().unwrap().iter().map(|t| t.id.clone()).collect()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskListSource for FakeTaskLists {
    async fn find_list(&self, name: &str) -> Result<Option<TaskListRef>> {
        Ok(self.lists.iter().find(|l| l.title == name).cloned())
    }

    async fn list_tasks(&self, _list_id: &str) -> Result<Vec<Task>> {
        if self.fail_listing {
            return Err(Error::fetch("tasks", "500 Internal Server Error"));
        }
        Ok(self.tasks.lock().unwrap().clone())
    }

    async fn delete_task(&self, _list_id: &str, task_id: &str) -> Result<()> {
        if self.undeletable.contains(task_id) {
            return Err(Error::cleanup("source task", "403 Forbidden"));
        }
        self.tasks.lock().unwrap().retain(|t| t.id != task_id);
        self.deleted.lock().unwrap().push(task_id.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeWorkspace {
    pub fail_export: bool,
    pub fail_discard: bool,
    pub documents: Mutex<Vec<FileRef>>,
    pub written: Mutex<Vec<Vec<String>>>,
    pub discarded: Mutex<Vec<String>>,
}

impl FakeWorkspace {
    pub fn documents(&self) -> Vec<FileRef> {
        self.documents.lock().unwrap().clone()
    }

    pub fn written(&self) -> Vec<Vec<String>> {
        self.written.lock().unwrap().clone()
    }

    pub fn discarded(&self) -> Vec<String> {
        self.discarded.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportWorkspace for FakeWorkspace {
    async fn create_document(&self, title: &str) -> Result<FileRef> {
        let mut documents = self.documents.lock().unwrap();
        let doc = FileRef {
            id: format!("sheet-{}", documents.len() + 1),
            name: title.to_string(),
        };
        documents.push(doc.clone());
        Ok(doc)
    }

    async fn write_rows(&self, _doc: &FileRef, rows: &[Vec<String>]) -> Result<()> {
        self.written.lock().unwrap().extend(rows.iter().cloned());
        Ok(())
    }

    async fn export_pdf(&self, doc: &FileRef) -> Result<Vec<u8>> {
        if self.fail_export {
            return Err(Error::write("report export", "500 Internal Server Error"));
        }
        Ok(format!("%PDF {}", doc.name).into_bytes())
    }

    async fn discard(&self, doc: &FileRef) -> Result<()> {
        if self.fail_discard {
            return Err(Error::cleanup(doc.id.as_str(), "403 Forbidden"));
        }
        self.discarded.lock().unwrap().push(doc.id.clone());
        Ok(())
    }
}

pub struct StoredFile {
    pub file: FileRef,
    pub mime_type: String,
    pub content: Vec<u8>,
    pub trashed: bool,
}

pub struct FakeDrive {
    pub folder: FileRef,
    pub files: Mutex<Vec<StoredFile>>,
    pub fail_trash: bool,
}

impl FakeDrive {
    pub fn new(folder_id: &str) -> Self {
        Self {
            folder: FileRef {
                id: folder_id.to_string(),
                name: "Reports".to_string(),
            },
            files: Mutex::new(Vec::new()),
            fail_trash: false,
        }
    }

    pub fn with_file(self, id: &str, name: &str) -> Self {
        self.files.lock().unwrap().push(StoredFile {
            file: FileRef {
                id: id.to_string(),
                name: name.to_string(),
            },
            mime_type: "application/pdf".to_string(),
            content: Vec::new(),
            trashed: false,
        });
        self
    }

    /// Names of files that are not in the trash.
    pub fn active_names(&self) -> Vec<String> {
        self.files
            .lock()
            .unwrap()
            .iter()
            .filter(|f| !f.trashed)
            .map(|f| f.file.name.clone())
            .collect()
    }

    pub fn is_trashed(&self, id: &str) -> bool {
        self.files
            .lock()
            .unwrap()
            .iter()
            .any(|f| f.file.id == id && f.trashed)
    }
}

#[async_trait]
impl FileStore for FakeDrive {
    async fn find_folder(&self, folder_id: &str) -> Result<Option<FileRef>> {
        Ok(Some(self.folder.clone()).filter(|f| f.id == folder_id))
    }

    async fn find_files_by_name(&self, _folder: &FileRef, name: &str) -> Result<Vec<FileRef>> {
        Ok(self
            .files
            .lock()
            .unwrap()
            .iter()
            .filter(|f| !f.trashed && f.file.name == name)
            .map(|f| f.file.clone())
            .collect())
    }

    async fn create_file(
        &self,
        _folder: &FileRef,
        name: &str,
        mime_type: &str,
        content: Vec<u8>,
    ) -> Result<FileRef> {
        let mut files = self.files.lock().unwrap();
        let file = FileRef {
            id: format!("file-{}", files.len() + 1),
            name: name.to_string(),
        };
        files.push(StoredFile {
            file: file.clone(),
            mime_type: mime_type.to_string(),
            content,
            trashed: false,
        });
        Ok(file)
    }

    async fn trash_file(&self, file: &FileRef) -> Result<()> {
        if self.fail_trash {
            return Err(Error::cleanup(file.name.as_str(), "403 Forbidden"));
        }
        for stored in self.files.lock().unwrap().iter_mut() {
            if stored.file.id == file.id {
                stored.trashed = true;
            }
        }
        Ok(())
    }
}
