//! Client configuration loading.
//!
//! Reads `config.toml` from the app config directory. A missing file yields
//! the default configuration; a malformed file is an error, since silently
//! ignoring a user-edited config hides typos.

use std::path::PathBuf;

use barakah_core::config::ClientConfig;
use barakah_core::error::Result;

/// Loader for the client configuration file.
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Creates a loader for the given config file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the configuration, falling back to defaults when the file does
    /// not exist.
    pub async fn load(&self) -> Result<ClientConfig> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => {
                let config = toml::from_str(&raw)?;
                tracing::info!("loaded client config from {}", self.path.display());
                Ok(config)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("no config file, using defaults");
                Ok(ClientConfig::default())
            }
            Err(err) => Err(err.into()),
        }
    }
}
