//! Unified path management for Barakah on-device data.
//!
//! All persisted snapshots, the client configuration, and the hardened token
//! file resolve through [`BarakahPaths`] so every storage mechanism agrees on
//! the directory layout across platforms.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for the Barakah client.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/barakah/           # Config directory
/// ├── config.toml              # Client configuration
/// ├── secure/
/// │   └── token                # Bearer token (mode 600)
/// └── state/                   # Persisted store snapshots (JSON per key)
///     ├── auth.user.json
///     ├── settings.json
///     ├── product.scan_history.json
///     ├── restaurant.favorites.json
///     └── stream.preferences.json
/// ```
#[derive(Debug, Clone)]
pub struct BarakahPaths {
    config_dir: PathBuf,
}

impl BarakahPaths {
    /// Resolves the platform config directory for the app.
    pub fn new() -> Result<Self, PathError> {
        let base = dirs::config_dir().ok_or(PathError::HomeDirNotFound)?;
        Ok(Self {
            config_dir: base.join("barakah"),
        })
    }

    /// Creates paths rooted at a custom directory (for testing).
    pub fn with_root(root: PathBuf) -> Self {
        Self { config_dir: root }
    }

    /// Returns the app config directory (e.g. `~/.config/barakah/`).
    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    /// Returns the path to the client configuration file.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Returns the directory holding persisted store snapshots.
    pub fn state_dir(&self) -> PathBuf {
        self.config_dir.join("state")
    }

    /// Returns the path to the hardened token file.
    ///
    /// Kept under its own subdirectory, never inside the general-purpose
    /// state namespace.
    pub fn token_file(&self) -> PathBuf {
        self.config_dir.join("secure").join("token")
    }
}
