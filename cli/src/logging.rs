//! Log output for the `taskflow` binary.
//!
//! Command output owns stdout, so logs only ever go to stderr and, when
//! `logging.file` is set, to a daily file.

use std::path::PathBuf;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use taskflow_core::api::{AppConfig, CliError, LoggingConfig};

const LOG_FILE_PREFIX: &str = "taskflow.log";

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Filter directive: a non-blank `RUST_LOG` beats `logging.level`.
pub fn filter_directive(logging: &LoggingConfig, rust_log: Option<String>) -> String {
    rust_log
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| logging.level.clone())
}

/// `logging.directory` if set, otherwise `logs/` beside the task data.
pub fn log_dir(logging: &LoggingConfig, data_dir: &str) -> PathBuf {
    logging
        .directory
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(data_dir).join("logs"))
}

pub fn init(cfg: &AppConfig) -> Result<(), CliError> {
    let logging = &cfg.logging;
    if !logging.enabled {
        return Ok(());
    }
    if !logging.console && !logging.file {
        return Err(CliError::Config(
            "logging is enabled but both console and file output are off".to_string(),
        ));
    }

    let directive = filter_directive(logging, std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| CliError::Config(format!("invalid log filter {directive:?}: {e}")))?;

    let file_layer = if logging.file {
        let dir = log_dir(logging, &cfg.storage.data_dir);
        std::fs::create_dir_all(&dir)
            .map_err(|e| CliError::Config(format!("create log dir {}: {e}", dir.display())))?;
        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX));
        let _ = FILE_GUARD.set(guard);
        Some(fmt::layer().with_writer(writer).with_ansi(false))
    } else {
        None
    };

    let console_layer = logging.console.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| CliError::Config(format!("install log subscriber: {e}")))
}
