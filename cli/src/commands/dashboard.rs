//! Dashboard view.
use crate::app::AppContext;
use crate::commands::cli::{OutputFormat, StatsArgs};
use crate::render;
use taskflow_core::api as core_api;

pub async fn handle_stats(
    args: StatsArgs,
    format: OutputFormat,
    ctx: &AppContext,
) -> Result<String, core_api::CliError> {
    let stats = match args.now {
        Some(now) => ctx.store().stats(now).await,
        None => ctx.store().stats_now().await,
    };
    Ok(render::stats(&stats, format))
}
