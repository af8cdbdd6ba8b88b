//! Wiring between configuration and the task store.
use taskflow_core::api as core_api;

#[derive(Clone)]
pub struct AppContext {
    cfg: core_api::AppConfig,
    store: core_api::TaskStore,
}

impl AppContext {
    pub fn new(cfg: core_api::AppConfig, store: core_api::TaskStore) -> Self {
        Self { cfg, store }
    }

    #[tracing::instrument(name = "cli.build_context", skip(cfg))]
    pub fn from_config(cfg: core_api::AppConfig) -> Result<Self, core_api::CliError> {
        let store = taskflow_plugins::factory::build_task_store(&cfg)
            .map_err(|e| core_api::CliError::Config(e.to_string()))?;
        Ok(Self::new(cfg, store))
    }

    pub fn cfg(&self) -> &core_api::AppConfig {
        &self.cfg
    }

    pub fn store(&self) -> &core_api::TaskStore {
        &self.store
    }
}
