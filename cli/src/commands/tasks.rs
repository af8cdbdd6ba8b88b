//! Task list commands: list, show, add, edit, toggle, delete.
use chrono::Utc;
use taskflow_core::api as core_api;

use crate::app::AppContext;
use crate::commands::cli::{AddArgs, EditArgs, IdArgs, ListArgs, OutputFormat};
use crate::render;

pub async fn handle_list(
    args: ListArgs,
    format: OutputFormat,
    ctx: &AppContext,
) -> Result<String, core_api::CliError> {
    let all = ctx.store().load().await;
    let shown: Vec<core_api::Task> = all
        .iter()
        .filter(|t| args.status.matches(t))
        .filter(|t| args.priority.map_or(true, |p| t.priority == p))
        .cloned()
        .collect();
    Ok(render::task_list(&all, &shown, args.status, format))
}

pub async fn handle_show(
    args: IdArgs,
    format: OutputFormat,
    ctx: &AppContext,
) -> Result<String, core_api::CliError> {
    let task = ctx
        .store()
        .get_by_id(&args.id)
        .await
        .ok_or_else(|| core_api::StoreError::not_found(&args.id))?;
    Ok(render::task_detail(&task, format))
}

pub async fn handle_add(
    args: AddArgs,
    format: OutputFormat,
    ctx: &AppContext,
) -> Result<String, core_api::CliError> {
    let title = args.title.trim();
    if title.is_empty() {
        return Err(core_api::CliError::Command(
            "task title must not be empty".to_string(),
        ));
    }

    let mut task = core_api::Task::new(core_api::generate_task_id(), title, Utc::now())
        .with_description(args.description)
        .with_priority(args.priority);
    if let Some(due) = args.due {
        task = task.with_due_date(due);
    }

    let tasks = ctx.store().insert(task.clone()).await?;
    Ok(render::mutation(
        &format!("Added task {}", task.id),
        Some(&task),
        tasks.len(),
        format,
    ))
}

/// Builds a full replacement record; `id`, `createdAt` and `completed` carry
/// over from the stored task.
pub async fn handle_edit(
    args: EditArgs,
    format: OutputFormat,
    ctx: &AppContext,
) -> Result<String, core_api::CliError> {
    let current = ctx
        .store()
        .get_by_id(&args.id)
        .await
        .ok_or_else(|| core_api::StoreError::not_found(&args.id))?;

    let title = match args.title {
        Some(t) if t.trim().is_empty() => {
            return Err(core_api::CliError::Command(
                "task title must not be empty".to_string(),
            ))
        }
        Some(t) => t.trim().to_string(),
        None => current.title.clone(),
    };

    let mut replacement = core_api::Task::new(current.id.clone(), title, current.created_at)
        .with_description(args.description.unwrap_or_else(|| current.description.clone()))
        .with_priority(args.priority.unwrap_or(current.priority))
        .with_completed(current.completed);
    let due = if args.clear_due {
        None
    } else {
        args.due.or(current.due_date)
    };
    if let Some(due) = due {
        replacement = replacement.with_due_date(due);
    }

    let tasks = ctx.store().update_by_id(&args.id, replacement.clone()).await?;
    Ok(render::mutation(
        &format!("Updated task {}", replacement.id),
        Some(&replacement),
        tasks.len(),
        format,
    ))
}

pub async fn handle_toggle(
    args: IdArgs,
    format: OutputFormat,
    ctx: &AppContext,
) -> Result<String, core_api::CliError> {
    let tasks = ctx.store().toggle_completed(&args.id).await?;
    let task = tasks.iter().find(|t| t.id == args.id);
    let state = match task {
        Some(t) if t.completed => "completed",
        _ => "pending",
    };
    Ok(render::mutation(
        &format!("Marked task {} {state}", args.id),
        task,
        tasks.len(),
        format,
    ))
}

pub async fn handle_delete(
    args: IdArgs,
    format: OutputFormat,
    ctx: &AppContext,
) -> Result<String, core_api::CliError> {
    let tasks = ctx.store().delete_by_id(&args.id).await?;
    Ok(render::mutation(
        &format!("Deleted task {}", args.id),
        None,
        tasks.len(),
        format,
    ))
}
