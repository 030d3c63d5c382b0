use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_BASE_URL;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Client configuration, stored as `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the story API, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            log_level: default_log_level(),
        }
    }
}

impl ClientConfig {
    /// Replaces the base URL, trimming trailing slashes.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self.normalized()
    }

    /// Returns a copy with trailing slashes removed from `base_url`.
    pub fn normalized(mut self) -> Self {
        let trimmed_len = self.base_url.trim_end_matches('/').len();
        self.base_url.truncate(trimmed_len);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://hack-or-snooze-v3.herokuapp.com");
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ClientConfig = toml::from_str(r#"log_level = "debug""#).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_with_base_url_trims_slashes() {
        let config = ClientConfig::default().with_base_url("http://localhost:5000//");
        assert_eq!(config.base_url, "http://localhost:5000");
    }
}
