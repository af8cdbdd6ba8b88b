use clap::Parser;
use taskflow_cli::app::AppContext;
use taskflow_cli::commands::cli::{self, Commands};
use taskflow_cli::commands::{dashboard, settings, tasks};
use taskflow_cli::logging;
use taskflow_core::api as core_api;

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, core_api::CliError> {
    let args = cli::Args::parse();
    let cfg = match args.config.as_deref() {
        Some(path) => core_api::load_from_path(path),
        None => core_api::load_default(),
    }
    .map_err(|e| core_api::CliError::Config(e.to_string()))?;
    logging::init(&cfg)?;

    let ctx = AppContext::from_config(cfg)?;
    tracing::debug!(
        backend = ctx.store().backend_name(),
        key = ctx.store().key(),
        "taskflow started"
    );

    let output = dispatch(args.command, args.format, &ctx).await?;
    println!("{output}");
    Ok(0)
}

fn exit_code_for_error(e: &core_api::CliError) -> i32 {
    // 0: success
    // 11: config error
    // 20: storage / IO error
    // 30: task not found
    // 50: internal/uncategorized
    match e {
        core_api::CliError::Config(_) => 11,
        core_api::CliError::Store(se) => match se {
            core_api::StoreError::NotFound { .. } => 30,
            core_api::StoreError::StorageUnavailable { .. } => 20,
            core_api::StoreError::MalformedData(_) => 20,
            core_api::StoreError::Serialize(_) => 50,
        },
        core_api::CliError::Io(_) => 20,
        core_api::CliError::Command(_) => 50,
        core_api::CliError::Anyhow(_) => 50,
    }
}

async fn dispatch(
    cmd: Commands,
    format: cli::OutputFormat,
    ctx: &AppContext,
) -> Result<String, core_api::CliError> {
    match cmd {
        Commands::Stats(a) => dashboard::handle_stats(a, format, ctx).await,
        Commands::List(a) => tasks::handle_list(a, format, ctx).await,
        Commands::Show(a) => tasks::handle_show(a, format, ctx).await,
        Commands::Add(a) => tasks::handle_add(a, format, ctx).await,
        Commands::Edit(a) => tasks::handle_edit(a, format, ctx).await,
        Commands::Toggle(a) => tasks::handle_toggle(a, format, ctx).await,
        Commands::Delete(a) => tasks::handle_delete(a, format, ctx).await,
        Commands::Clear(a) => settings::handle_clear(a, format, ctx).await,
        Commands::Export(a) => settings::handle_export(a, format, ctx).await,
        Commands::Import(a) => settings::handle_import(a, format, ctx).await,
    }
}
