//! Converts Google Tasks entries into Todoist task payloads.

use crate::model::{NewTask, Task};

pub const EMAIL_LINK_KIND: &str = "email";
pub const LINK_SEPARATOR: &str = "\n\n---\n";
const DUE_DATE_LEN: usize = 10;

/// Build the Todoist payload for `task`, or `None` if it has no title.
pub fn to_new_task(task: &Task) -> Option<NewTask> {
    if task.title.is_empty() {
        return None;
    }

    Some(NewTask {
        content: task.title.clone(),
        description: build_description(task),
        due_date: task.due.as_deref().map(truncate_due),
    })
}

/// Notes followed by the first email link, if any.
fn build_description(task: &Task) -> String {
    let mut description = task.notes.clone().unwrap_or_default();

    // Only the first email link is carried over.
    if let Some(email) = task.link_of_kind(EMAIL_LINK_KIND) {
        description.push_str(LINK_SEPARATOR);
        description.push_str(&format!("Linked Email: {}", email.link));
    }

    description.trim().to_string()
}

/// `2024-05-01T00:00:00.000Z` becomes `2024-05-01`. Other formats are cut
/// at the same length without validation.
fn truncate_due(due: &str) -> String {
    match due.char_indices().nth(DUE_DATE_LEN) {
        Some((end, _)) => due[..end].to_string(),
        None => due.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_payload() {
        let task = Task::new("t1", "Call Bob")
            .with_notes("re: contract")
            .with_due("2024-05-01T00:00:00Z")
            .with_link("email", "https://mail.example/x");

        let payload = to_new_task(&task).unwrap();

        assert_eq!(
            payload,
            NewTask {
                content: "Call Bob".to_string(),
                description: "re: contract\n\n---\nLinked Email: https://mail.example/x".to_string(),
                due_date: Some("2024-05-01".to_string()),
            }
        );
    }

    #[test]
    fn test_missing_title_is_skipped() {
        assert_eq!(to_new_task(&Task::new("t1", "")), None);
        assert_eq!(to_new_task(&Task::new("t2", "").with_notes("n")), None);
    }

    #[test]
    fn test_whitespace_title_is_kept() {
        let payload = to_new_task(&Task::new("t1", " ").with_notes("n")).unwrap();
        assert_eq!(payload.content, " ");
        assert_eq!(payload.description, "n");
    }

    #[test]
    fn test_email_link_without_notes_is_trimmed() {
        let task = Task::new("t1", "Reply").with_link("email", "https://mail.example/y");
        let payload = to_new_task(&task).unwrap();
        assert_eq!(payload.description, "---\nLinked Email: https://mail.example/y");
    }

    #[test]
    fn test_first_email_link_wins() {
        let task = Task::new("t1", "Reply")
            .with_notes("notes")
            .with_link("generic", "https://example.com")
            .with_link("email", "https://mail.example/first")
            .with_link("email", "https://mail.example/second");

        let payload = to_new_task(&task).unwrap();

        assert!(payload.description.ends_with("Linked Email: https://mail.example/first"));
        assert!(!payload.description.contains("second"));
        assert!(!payload.description.contains("example.com"));
    }

    #[test]
    fn test_notes_only() {
        let task = Task::new("t1", "Plain").with_notes("  keep this  \n");
        let payload = to_new_task(&task).unwrap();
        assert_eq!(payload.description, "keep this");
        assert_eq!(payload.due_date, None);
    }

    #[test]
    fn test_due_truncation() {
        assert_eq!(truncate_due("2024-05-01T00:00:00.000Z"), "2024-05-01");
        assert_eq!(truncate_due("2024-05-01"), "2024-05-01");
        assert_eq!(truncate_due("tomorrow"), "tomorrow");
        assert_eq!(truncate_due("next monday at 9"), "next monda");
    }
}
