//! Groups open tasks under their project names.

use crate::model::{Project, Task};
use serde::Serialize;
use std::collections::HashMap;

pub const INBOX: &str = "Inbox";
pub const NO_DUE_DATE: &str = "No due date";

/// One line of a project's task table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRow {
    pub content: String,
    pub due: String,
}

/// Project name to task rows, iterated in the order projects were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectGroups {
    groups: Vec<(String, Vec<TaskRow>)>,
    index: HashMap<String, usize>,
}

impl ProjectGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row to `project`, opening the group on first use.
    pub fn push(&mut self, project: &str, row: TaskRow) {
        let slot = match self.index.get(project) {
            Some(&i) => i,
            None => {
                self.groups.push((project.to_string(), Vec::new()));
                self.index.insert(project.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[slot].1.push(row);
    }

    pub fn get(&self, project: &str) -> Option<&[TaskRow]> {
        self.index.get(project).map(|&i| self.groups[i].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TaskRow])> {
        self.groups
            .iter()
            .map(|(name, rows)| (name.as_str(), rows.as_slice()))
    }

    pub fn project_names(&self) -> Vec<&str> {
        self.groups.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of projects.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn task_count(&self) -> usize {
        self.groups.iter().map(|(_, rows)| rows.len()).sum()
    }
}

/// Group `tasks` by project name, keeping input order within and across groups.
///
/// Tasks whose project is unknown land in [`INBOX`]. Nothing is filtered,
/// so tasks with an empty title are kept as well.
pub fn group_by_project(tasks: &[Task], projects: &[Project]) -> ProjectGroups {
    let names: HashMap<&str, &str> = projects
        .iter()
        .map(|p| (p.id.as_str(), p.name.as_str()))
        .collect();

    let mut groups = ProjectGroups::new();
    for task in tasks {
        let project = task
            .project_id
            .as_deref()
            .and_then(|id| names.get(id).copied())
            .unwrap_or(INBOX);
        groups.push(
            project,
            TaskRow {
                content: task.title.clone(),
                due: task.due.clone().unwrap_or_else(|| NO_DUE_DATE.to_string()),
            },
        );
    }
    groups
}
