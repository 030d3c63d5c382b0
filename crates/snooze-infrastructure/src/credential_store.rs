//! File-backed credential store.
//!
//! Keeps the login token and username in `credentials.toml` so a later run
//! can restore the session without asking for a password again.

use async_trait::async_trait;
use snooze_core::credentials::{CredentialStore, StoredCredentials};
use snooze_core::error::{Result, SnoozeError};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::paths::SnoozePaths;
use crate::storage::AtomicTomlFile;

const CREDENTIALS_FILE_MODE: u32 = 0o600;

/// `CredentialStore` persisted as a TOML file readable by the owner only.
#[derive(Clone)]
pub struct FileCredentialStore {
    file: Arc<AtomicTomlFile<StoredCredentials>>,
}

impl FileCredentialStore {
    /// Uses `credentials.toml` inside the snooze config directory.
    pub fn new(paths: &SnoozePaths) -> Result<Self> {
        Ok(Self::with_path(paths.credentials_file()?))
    }

    /// Uses an explicit file path.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path).with_mode(CREDENTIALS_FILE_MODE)),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Runs a blocking file operation off the async executor.
    async fn blocking<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&AtomicTomlFile<StoredCredentials>) -> Result<T> + Send + 'static,
    {
        let file = Arc::clone(&self.file);
        tokio::task::spawn_blocking(move || op(file.as_ref()))
            .await
            .map_err(|e| SnoozeError::internal(format!("Credential file task failed: {}", e)))?
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<StoredCredentials>> {
        let loaded = self.blocking(|file| Ok(file.load()?)).await?;
        if let Some(ref credentials) = loaded {
            tracing::debug!("[FileCredentialStore] Loaded {}", credentials);
        }
        Ok(loaded)
    }

    async fn save(&self, credentials: &StoredCredentials) -> Result<()> {
        let credentials = credentials.clone();
        tracing::debug!("[FileCredentialStore] Saving {}", credentials);
        self.blocking(move |file| Ok(file.save(&credentials)?)).await
    }

    async fn clear(&self) -> Result<()> {
        tracing::debug!("[FileCredentialStore] Clearing {}", self.path().display());
        self.blocking(|file| Ok(file.remove()?)).await
    }
}
