//! Daily Todoist report
//!
//! Groups every open Todoist task under its project, lays the groups out as a
//! two-column table, exports it as a PDF into a storage folder, and removes
//! the report left behind by the previous day's run.

mod grouper;
mod pipeline;
mod renderer;

pub use grouper::{group_by_project, ProjectGroups, TaskRow, INBOX, NO_DUE_DATE};
pub use pipeline::{report_name, PublishedReport, ReportOutcome, ReportPipeline, PDF_MIME_TYPE};
pub use renderer::{render_report, ReportDocument, ReportRow, DUE_HEADER, TASK_HEADER};
