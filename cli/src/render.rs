//! Text and JSON views of tasks and stats. Everything returns a `String`;
//! printing is left to the caller.
use serde::Serialize;
use taskflow_core::api::{format_timestamp, StatusFilter, Task, TaskStats};

use crate::commands::cli::OutputFormat;

#[derive(Debug, Serialize)]
struct StatusCounts {
    all: usize,
    pending: usize,
    completed: usize,
}

impl StatusCounts {
    fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            all: tasks.len(),
            pending: tasks.len() - completed,
            completed,
        }
    }
}

pub fn task_line(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    let mut line = format!(
        "[{mark}] {id}  {priority:<6}  {title}",
        id = task.id,
        priority = task.priority.as_str().to_uppercase(),
        title = task.title
    );
    if let Some(due) = task.due_date {
        line.push_str(&format!("  (due {})", due.format("%Y-%m-%d %H:%M")));
    }
    line
}

/// Task list with the per-status counts shown above it.
pub fn task_list(
    all: &[Task],
    shown: &[Task],
    filter: StatusFilter,
    format: OutputFormat,
) -> String {
    let counts = StatusCounts::of(all);
    match format {
        OutputFormat::Json => to_json(&serde_json::json!({
            "filter": filter,
            "counts": counts,
            "tasks": shown,
        })),
        OutputFormat::Text => {
            let mut out = format!(
                "all ({}) | pending ({}) | completed ({})\n",
                counts.all, counts.pending, counts.completed
            );
            if shown.is_empty() {
                out.push_str(match filter {
                    StatusFilter::Completed => "No completed tasks",
                    StatusFilter::Pending => "No pending tasks",
                    StatusFilter::All => "No tasks yet",
                });
            } else {
                let lines: Vec<String> = shown.iter().map(task_line).collect();
                out.push_str(&lines.join("\n"));
            }
            out
        }
    }
}

pub fn task_detail(task: &Task, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(task),
        OutputFormat::Text => {
            let mut out = vec![
                format!("id:          {}", task.id),
                format!("title:       {}", task.title),
                format!("priority:    {}", task.priority),
                format!(
                    "status:      {}",
                    if task.completed { "completed" } else { "pending" }
                ),
                format!("created:     {}", format_timestamp(&task.created_at)),
            ];
            if let Some(due) = &task.due_date {
                out.push(format!("due:         {}", format_timestamp(due)));
            }
            if !task.description.is_empty() {
                out.push(format!("description: {}", task.description));
            }
            out.join("\n")
        }
    }
}

pub fn stats(stats: &TaskStats, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(stats),
        OutputFormat::Text => format!(
            "total:     {}\ncompleted: {}\npending:   {}\noverdue:   {}",
            stats.total, stats.completed, stats.pending, stats.overdue
        ),
    }
}

/// Outcome of a mutating command: a message plus the reloaded collection size.
pub fn mutation(message: &str, task: Option<&Task>, total: usize, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(&serde_json::json!({
            "message": message,
            "task": task,
            "total": total,
        })),
        OutputFormat::Text => format!("{message} ({total} tasks)"),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}
