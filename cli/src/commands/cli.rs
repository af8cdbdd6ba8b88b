use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args as ClapArgs, Parser, Subcommand};
use taskflow_core::api::{parse_timestamp, Priority, StatusFilter};

#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "taskflow", version, about = "Personal task list backed by a local store")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of ~/.taskflow/config.toml or ./config.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
}

/// Accepts RFC 3339 (`2024-05-01T09:00:00Z`) or a plain date (`2024-05-01`).
pub fn parse_when(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(raw)
}

#[derive(ClapArgs, Debug, Clone)]
pub struct StatsArgs {
    /// Evaluate overdue tasks at this instant instead of now.
    #[arg(long, value_parser = parse_when)]
    pub now: Option<DateTime<Utc>>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ListArgs {
    #[arg(long, default_value = "all")]
    pub status: StatusFilter,

    #[arg(long)]
    pub priority: Option<Priority>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct IdArgs {
    pub id: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct AddArgs {
    pub title: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long, default_value = "medium")]
    pub priority: Priority,

    #[arg(long, value_parser = parse_when)]
    pub due: Option<DateTime<Utc>>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct EditArgs {
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub priority: Option<Priority>,

    #[arg(long, value_parser = parse_when, conflicts_with = "clear_due")]
    pub due: Option<DateTime<Utc>>,

    /// Remove the due date.
    #[arg(long)]
    pub clear_due: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ClearArgs {
    /// Confirm permanent deletion of every task.
    #[arg(long)]
    pub yes: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ExportArgs {
    /// Write to this file instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ImportArgs {
    pub input: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dashboard counts: total, completed, pending, overdue.
    Stats(StatsArgs),
    List(ListArgs),
    Show(IdArgs),
    Add(AddArgs),
    Edit(EditArgs),
    /// Flip a task between pending and completed.
    Toggle(IdArgs),
    Delete(IdArgs),
    /// Delete every task.
    Clear(ClearArgs),
    Export(ExportArgs),
    /// Replace all tasks with the contents of an exported file.
    Import(ImportArgs),
}
