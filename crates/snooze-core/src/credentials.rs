//! Remembered login credentials.
//!
//! Defines the persisted `token` / `username` pair and the storage trait used
//! to restore a session on startup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::Result;

/// The two values remembered between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub token: String,
    pub username: String,
}

impl StoredCredentials {
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
        }
    }

    /// Both values must be non-empty for a restore to be attempted.
    pub fn is_complete(&self) -> bool {
        !self.token.is_empty() && !self.username.is_empty()
    }
}

impl std::fmt::Display for StoredCredentials {
    // Never print the token itself.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "credentials for {}", self.username)
    }
}

/// Storage for remembered credentials.
///
/// # Security Note
///
/// Implementations should ensure that:
/// - Files holding tokens are readable by the owner only (600 on Unix)
/// - Tokens are never logged or exposed in error messages
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Loads remembered credentials, `None` when nothing is stored.
    async fn load(&self) -> Result<Option<StoredCredentials>>;

    /// Remembers credentials, replacing any previous ones.
    async fn save(&self, credentials: &StoredCredentials) -> Result<()>;

    /// Forgets everything that was stored.
    async fn clear(&self) -> Result<()>;
}

/// A credential store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    credentials: Mutex<Option<StoredCredentials>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: StoredCredentials) -> Self {
        Self {
            credentials: Mutex::new(Some(credentials)),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn load(&self) -> Result<Option<StoredCredentials>> {
        Ok(self.credentials.lock().await.clone())
    }

    async fn save(&self, credentials: &StoredCredentials) -> Result<()> {
        *self.credentials.lock().await = Some(credentials.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.credentials.lock().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_complete() {
        assert!(StoredCredentials::new("tok", "alice").is_complete());
        assert!(!StoredCredentials::new("", "alice").is_complete());
        assert!(!StoredCredentials::new("tok", "").is_complete());
    }

    #[test]
    fn test_display_hides_token() {
        let creds = StoredCredentials::new("secret-token", "alice");
        let shown = creds.to_string();
        assert!(shown.contains("alice"));
        assert!(!shown.contains("secret-token"));
    }

    #[tokio::test]
    async fn test_in_memory_store_roundtrip() {
        let store = InMemoryCredentialStore::new();
        assert!(store.load().await.unwrap().is_none());

        store
            .save(&StoredCredentials::new("tok", "alice"))
            .await
            .unwrap();
        assert_eq!(store.load().await.unwrap().unwrap().username, "alice");

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }
}
