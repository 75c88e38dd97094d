//! Client configuration model.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://api.barakah.app/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_locale() -> String {
    "en".to_string()
}

/// Client-side configuration, loaded from `config.toml` under the app config
/// directory. Every field has a default so a missing file is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the remote backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Total per-request ceiling in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Locale applied before the settings store restores a persisted choice.
    #[serde(default = "default_locale")]
    pub default_locale: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            default_locale: default_locale(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: ClientConfig = toml::from_str("base_url = \"http://localhost:9000\"").unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.default_locale, "en");
    }

    #[test]
    fn empty_document_is_the_default_config() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
    }
}
