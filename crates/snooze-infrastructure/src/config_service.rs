//! Configuration service.
//!
//! Loads `ClientConfig` from `config.toml` (~/.config/snooze/config.toml) and
//! layers environment overrides on top.

use snooze_core::config::ClientConfig;
use snooze_core::error::Result;
use std::path::{Path, PathBuf};

use crate::paths::SnoozePaths;
use crate::storage::AtomicTomlFile;

/// Overrides `base_url`.
pub const ENV_BASE_URL: &str = "SNOOZE_BASE_URL";
/// Overrides `log_level`.
pub const ENV_LOG_LEVEL: &str = "SNOOZE_LOG_LEVEL";

/// Reads the client configuration.
///
/// Precedence, lowest first: built-in defaults, `config.toml`, environment.
/// Command-line flags are applied by the caller on the returned value.
#[derive(Debug, Clone)]
pub struct ConfigService {
    config_path: PathBuf,
}

impl ConfigService {
    pub fn new(paths: &SnoozePaths) -> Result<Self> {
        Ok(Self::with_path(paths.config_file()?))
    }

    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads the file (defaults when missing) and applies process environment overrides.
    pub fn load(&self) -> Result<ClientConfig> {
        self.load_with_env(|key| std::env::var(key).ok())
    }

    /// Same as `load`, reading overrides through `env`.
    pub fn load_with_env<F>(&self, env: F) -> Result<ClientConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = AtomicTomlFile::<ClientConfig>::new(self.config_path.clone());
        let config = match file.load()? {
            Some(config) => {
                tracing::debug!("[ConfigService] Loaded {}", self.config_path.display());
                config
            }
            None => ClientConfig::default(),
        };

        Ok(apply_env_overrides(config, env))
    }

}

fn apply_env_overrides<F>(mut config: ClientConfig, env: F) -> ClientConfig
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| env(key).filter(|value| !value.trim().is_empty());

    if let Some(base_url) = non_empty(ENV_BASE_URL) {
        config.base_url = base_url;
    }
    if let Some(log_level) = non_empty(ENV_LOG_LEVEL) {
        config.log_level = log_level;
    }
    config.normalized()
}
