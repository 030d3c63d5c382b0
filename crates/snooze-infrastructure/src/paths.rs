//! Unified path management for snooze files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/snooze/            # Config directory (platform default)
//! ├── config.toml              # Client configuration
//! └── credentials.toml         # Remembered token and username (mode 600)
//! ```

use std::path::{Path, PathBuf};

use snooze_core::error::SnoozeError;

const APP_DIR_NAME: &str = "snooze";
const CONFIG_FILE: &str = "config.toml";
const CREDENTIALS_FILE: &str = "credentials.toml";

/// Errors that can occur during path resolution.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// Platform config directory could not be determined.
    #[error("Cannot find config directory")]
    ConfigDirNotFound,
}

impl From<PathError> for SnoozeError {
    fn from(err: PathError) -> Self {
        SnoozeError::config(err.to_string())
    }
}

/// Resolves the files snooze reads and writes.
///
/// With a base path every file lives directly under it (tests, `--config-dir`);
/// otherwise the platform config directory plus `snooze/` is used.
#[derive(Debug, Clone)]
pub struct SnoozePaths {
    base: Option<PathBuf>,
}

impl SnoozePaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the snooze configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    /// Returns the path to `config.toml`.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(CONFIG_FILE))
    }

    /// Returns the path to `credentials.toml`.
    ///
    /// The file holds a login token; it is written with mode 600 on Unix.
    pub fn credentials_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(CREDENTIALS_FILE))
    }
}

impl Default for SnoozePaths {
    fn default() -> Self {
        Self::new(None)
    }
}
