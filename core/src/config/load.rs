use std::path::{Path, PathBuf};

use anyhow::Context;

use super::types::AppConfig;

/// Get the default taskflow data directory: ~/.taskflow
pub fn get_taskflow_data_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".taskflow"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.taskflow/config.toml (highest), skipped without a home directory
    let user_config = match get_taskflow_data_dir() {
        Ok(dir) => Some(dir.join("config.toml")),
        Err(e) => {
            tracing::warn!(error = %e, "skipping user config");
            None
        }
    };

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let cfg = match pick_config(user_config.as_deref(), local_config) {
        Some(path) => read_config(path)?,
        None => AppConfig::default(),
    };

    finalize(cfg)
}

fn pick_config<'a>(user: Option<&'a Path>, local: &'a Path) -> Option<&'a Path> {
    user.filter(|p| p.exists())
        .or_else(|| Some(local).filter(|p| p.exists()))
}

/// Load an explicit config file (`--config`). Environment overrides still apply.
pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    finalize(read_config(path)?)
}

fn read_config(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str::<AppConfig>(&s)
        .with_context(|| format!("failed to parse config {}", path.display()))
}

fn finalize(mut cfg: AppConfig) -> anyhow::Result<AppConfig> {
    apply_env_overrides(&mut cfg, |name| std::env::var(name).ok())?;

    let data_dir = expand_home(&cfg.storage.data_dir);
    cfg.storage.data_dir = data_dir;
    cfg.logging.directory = cfg.logging.directory.as_deref().map(expand_home);

    Ok(cfg)
}

fn expand_home(path: &str) -> String {
    shellexpand::tilde(path).into_owned()
}

// Environment variable overrides (Priority 0: highest). Empty values are ignored.
fn apply_env_overrides<F>(cfg: &mut AppConfig, var: F) -> anyhow::Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| var(name).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_empty("TASKFLOW_DATA_DIR") {
        cfg.storage.data_dir = v;
    }
    if let Some(v) = non_empty("TASKFLOW_STORAGE_BACKEND") {
        cfg.storage.backend = v
            .parse()
            .map_err(|e: String| anyhow::anyhow!("TASKFLOW_STORAGE_BACKEND: {e}"))?;
    }
    if let Some(v) = non_empty("TASKFLOW_STORAGE_KEY") {
        cfg.storage.key = v;
    }

    Ok(())
}
