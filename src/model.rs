//! Service-neutral task records.
//!
//! The Todoist and Google Tasks clients both translate their wire formats into
//! these types, so grouping and transformation never see a raw API payload.

use serde::{Deserialize, Serialize};

/// A task as read from a source service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub notes: Option<String>,
    /// Due value exactly as the source delivered it.
    pub due: Option<String>,
    pub links: Vec<TaskLink>,
    pub project_id: Option<String>,
}

impl Task {
    pub fn new<I: Into<String>, T: Into<String>>(id: I, title: T) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    pub fn with_due(mut self, due: &str) -> Self {
        self.due = Some(due.to_string());
        self
    }

    pub fn with_project(mut self, project_id: &str) -> Self {
        self.project_id = Some(project_id.to_string());
        self
    }

    pub fn with_link(mut self, kind: &str, link: &str) -> Self {
        self.links.push(TaskLink {
            kind: kind.to_string(),
            link: link.to_string(),
            description: None,
        });
        self
    }

    /// First link of the given type.
    pub fn link_of_kind(&self, kind: &str) -> Option<&TaskLink> {
        self.links.iter().find(|l| l.kind == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskLink {
    #[serde(rename = "type")]
    pub kind: String,
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

impl Project {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

/// Payload for creating a task in Todoist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    pub content: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Outcome of a create call. Only `Created` counts as confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateStatus {
    Created { id: String },
    Rejected { reason: String },
}

impl CreateStatus {
    pub fn is_created(&self) -> bool {
        matches!(self, CreateStatus::Created { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListRef {
    pub id: String,
    pub title: String,
}

/// A file or folder in remote storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub id: String,
    pub name: String,
}
