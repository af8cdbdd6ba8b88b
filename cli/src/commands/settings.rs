//! Settings commands: clear, export, import.
use taskflow_core::api as core_api;

use crate::app::AppContext;
use crate::commands::cli::{ClearArgs, ExportArgs, ImportArgs, OutputFormat};
use crate::render;

pub async fn handle_clear(
    args: ClearArgs,
    format: OutputFormat,
    ctx: &AppContext,
) -> Result<String, core_api::CliError> {
    if !args.yes {
        return Err(core_api::CliError::Command(
            "this permanently deletes every task; re-run with --yes to confirm".to_string(),
        ));
    }
    let tasks = ctx.store().clear_all().await?;
    Ok(render::mutation(
        "All tasks have been cleared",
        None,
        tasks.len(),
        format,
    ))
}

pub async fn handle_export(
    args: ExportArgs,
    format: OutputFormat,
    ctx: &AppContext,
) -> Result<String, core_api::CliError> {
    let json = ctx.store().export_json().await?;
    let Some(path) = args.output else {
        return Ok(json);
    };

    tokio::fs::write(&path, &json).await?;
    let total = ctx.store().load().await.len();
    Ok(render::mutation(
        &format!("Exported tasks to {}", path.display()),
        None,
        total,
        format,
    ))
}

pub async fn handle_import(
    args: ImportArgs,
    format: OutputFormat,
    ctx: &AppContext,
) -> Result<String, core_api::CliError> {
    let blob = tokio::fs::read_to_string(&args.input).await?;
    let tasks = ctx.store().import_json(&blob).await?;
    Ok(render::mutation(
        &format!("Imported tasks from {}", args.input.display()),
        None,
        tasks.len(),
        format,
    ))
}
