//! The daily report run: clean up yesterday, fetch, group, render, export.

use super::grouper::group_by_project;
use super::renderer::render_report;
use crate::config::ReportConfig;
use crate::error::{Error, Result};
use crate::model::FileRef;
use crate::services::{FileStore, ReportWorkspace, TaskTracker};
use chrono::{Datelike, NaiveDate};

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Name of the report for `date`, e.g. `Todoist Report - 3-7-2024`.
pub fn report_name(date: NaiveDate) -> String {
    format!(
        "Todoist Report - {}-{}-{}",
        date.month(),
        date.day(),
        date.year()
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// No open tasks; nothing was created.
    NothingToReport,
    Published(PublishedReport),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedReport {
    pub file: FileRef,
    pub project_count: usize,
    pub task_count: usize,
    /// Reports from earlier runs that were moved to the trash.
    pub removed: Vec<FileRef>,
    /// Non-fatal cleanup failures.
    pub warnings: Vec<String>,
}

pub struct ReportPipeline<'a> {
    tracker: &'a dyn TaskTracker,
    workspace: &'a dyn ReportWorkspace,
    store: &'a dyn FileStore,
    folder_id: String,
}

impl<'a> ReportPipeline<'a> {
    pub fn new(
        config: &ReportConfig,
        tracker: &'a dyn TaskTracker,
        workspace: &'a dyn ReportWorkspace,
        store: &'a dyn FileStore,
    ) -> Self {
        Self {
            tracker,
            workspace,
            store,
            folder_id: config.folder_id.clone(),
        }
    }

    pub async fn run(&self, today: NaiveDate) -> Result<ReportOutcome> {
        let folder = self
            .store
            .find_folder(&self.folder_id)
            .await?
            .ok_or_else(|| Error::lookup_miss("report folder", self.folder_id.as_str()))?;
        log::debug!("Using report folder {} ({})", folder.name, folder.id);

        let mut warnings = Vec::new();
        let removed = self.remove_previous_report(&folder, today, &mut warnings).await;

        let projects = self.tracker.list_projects().await?;
        let tasks = self.tracker.list_open_tasks().await?;
        log::info!(
            "Fetched {} open tasks across {} projects",
            tasks.len(),
            projects.len()
        );
        if tasks.is_empty() {
            log::info!("No uncompleted tasks, skipping report");
            return Ok(ReportOutcome::NothingToReport);
        }

        let groups = group_by_project(&tasks, &projects);
        let name = report_name(today);
        let document = render_report(&name, &groups);

        let working = self.workspace.create_document(&name).await?;
        self.workspace
            .write_rows(&working, &document.to_values())
            .await?;
        let pdf = self.workspace.export_pdf(&working).await?;
        let file = self
            .store
            .create_file(&folder, &name, PDF_MIME_TYPE, pdf)
            .await?;
        log::info!("Saved report {} ({})", file.name, file.id);

        if let Err(e) = self.workspace.discard(&working).await {
            log::warn!("Could not discard working document {}: {}", working.id, e);
            warnings.push(e.into_cleanup(working.name.as_str()).to_string());
        }

        Ok(ReportOutcome::Published(PublishedReport {
            file,
            project_count: groups.len(),
            task_count: groups.task_count(),
            removed,
            warnings,
        }))
    }

    /// Trash every report carrying yesterday's name. Failures are logged and collected.
    async fn remove_previous_report(
        &self,
        folder: &FileRef,
        today: NaiveDate,
        warnings: &mut Vec<String>,
    ) -> Vec<FileRef> {
        let mut removed = Vec::new();
        let Some(yesterday) = today.pred_opt() else {
            return removed;
        };
        let name = report_name(yesterday);

        let previous = match self.store.find_files_by_name(folder, &name).await {
            Ok(files) => files,
            Err(e) => {
                log::warn!("Could not look up previous report \"{}\": {}", name, e);
                warnings.push(e.into_cleanup(name.as_str()).to_string());
                return removed;
            }
        };
        if previous.is_empty() {
            log::debug!("No previous report named \"{}\"", name);
        }

        for file in previous {
            match self.store.trash_file(&file).await {
                Ok(()) => {
                    log::info!("Removed previous report {} ({})", file.name, file.id);
                    removed.push(file);
                }
                Err(e) => {
                    log::warn!("Could not remove previous report {}: {}", file.id, e);
                    warnings.push(e.into_cleanup(file.name.as_str()).to_string());
                }
            }
        }
        removed
    }
}
