//! Configuration manager

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use qahelper_core::{
    models::Config,
    storage::{init_config_dir, ConfigStorage},
    Result as CoreResult,
};

/// Config manager error
#[derive(Debug, thiserror::Error)]
pub enum ConfigManagerError {
    #[error("Storage error: {0}")]
    Storage(#[from] qahelper_core::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigManagerError>;

/// Manages application configuration
pub struct ConfigManager {
    storage: ConfigStorage,
    config: Arc<RwLock<Config>>,
}

impl ConfigManager {
    /// Load from `path`, or from the default config directory when `None`
    pub fn new(path: Option<PathBuf>) -> CoreResult<Self> {
        let storage = match path {
            Some(path) => ConfigStorage::at_path(path),
            None => ConfigStorage::new(init_config_dir()?),
        };

        // Load or create default config
        let config = storage.load()?;

        Ok(Self {
            storage,
            config: Arc::new(RwLock::new(config)),
        })
    }

    pub async fn get(&self) -> Config {
        self.config.read().await.clone()
    }

    pub async fn update(&self, config: Config) -> Result<Config> {
        config
            .validate()
            .map_err(|e| ConfigManagerError::Invalid(e.to_string()))?;

        self.storage.save(&config)?;

        {
            let mut current = self.config.write().await;
            *current = config.clone();
        }

        Ok(config)
    }

    pub async fn update_jira_config(
        &self,
        base_url: Option<String>,
        username: Option<String>,
    ) -> Result<Config> {
        let mut config = self.get().await;

        if let Some(url) = base_url {
            config.jira.base_url = Some(url);
        }

        if let Some(name) = username {
            config.jira.username = Some(name);
        }

        self.update(config).await
    }

}
