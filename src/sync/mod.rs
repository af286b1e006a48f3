//! Google Tasks to Todoist sync
//!
//! Each open task of a named Google Tasks list is recreated in Todoist and
//! deleted from the list once Todoist confirms the creation.

mod pipeline;
mod transformer;

pub use pipeline::{SyncFailure, SyncPipeline, SyncStats};
pub use transformer::{to_new_task, EMAIL_LINK_KIND, LINK_SEPARATOR};
