//! Lays grouped tasks out as report rows.

use super::grouper::{ProjectGroups, TaskRow};

pub const TASK_HEADER: &str = "Task";
pub const DUE_HEADER: &str = "Due Date";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportRow {
    Title(String),
    Project(String),
    ColumnHeader,
    Task(TaskRow),
    Blank,
}

impl ReportRow {
    /// Cell values of this row, two columns wide.
    pub fn cells(&self) -> Vec<String> {
        match self {
            ReportRow::Title(title) => vec![title.clone(), String::new()],
            ReportRow::Project(name) => vec![name.clone(), String::new()],
            ReportRow::ColumnHeader => vec![TASK_HEADER.to_string(), DUE_HEADER.to_string()],
            ReportRow::Task(row) => vec![row.content.clone(), row.due.clone()],
            ReportRow::Blank => vec![String::new(), String::new()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    pub title: String,
    pub rows: Vec<ReportRow>,
}

impl ReportDocument {
    pub fn to_values(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(ReportRow::cells).collect()
    }
}

/// Title row, then for each project: its name, the column header, its tasks
/// and a blank separator.
pub fn render_report(title: &str, groups: &ProjectGroups) -> ReportDocument {
    let mut rows = vec![ReportRow::Title(title.to_string())];
    for (project, tasks) in groups.iter() {
        rows.push(ReportRow::Project(project.to_string()));
        rows.push(ReportRow::ColumnHeader);
        rows.extend(tasks.iter().cloned().map(ReportRow::Task));
        rows.push(ReportRow::Blank);
    }
    ReportDocument {
        title: title.to_string(),
        rows,
    }
}
