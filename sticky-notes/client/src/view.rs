//! Plain-text rendering of tasks for the terminal.

use sticky_notes_core::Task;

const EMPTY_LIST: &str = "No tasks yet. Add one with `sticky-notes add <title>`.";

/// One line per task: checkbox, title and full id, then the description indented below.
pub fn render_task(task: &Task) -> String {
    let checkbox = if task.is_completed { "[x]" } else { "[ ]" };
    let mut line = format!("{} {} ({})", checkbox, task.title, task.id);
    if let Some(description) = task.description.as_deref().filter(|d| !d.is_empty()) {
        for description_line in description.lines() {
            line.push_str("\n    ");
            line.push_str(description_line);
        }
    }
    line
}

/// Detailed view with timestamps.
pub fn render_task_details(task: &Task) -> String {
    let status = if task.is_completed { "done" } else { "open" };
    format!(
        "{}\nstatus:  {}\ncreated: {}\nupdated: {}",
        render_task(task),
        status,
        task.created_at.to_rfc3339(),
        task.updated_at.to_rfc3339()
    )
}

pub fn render_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return EMPTY_LIST.to_string();
    }
    tasks.iter().map(render_task).collect::<Vec<_>>().join("\n")
}
