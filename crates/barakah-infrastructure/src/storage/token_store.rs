//! Hardened bearer-token storage.
//!
//! The token lives in its own file outside the general-purpose state
//! namespace, created with user-only permissions on Unix. A corrupted or
//! unreadable entry is deleted and reported as absent rather than surfaced
//! as an error, so a damaged token file degrades to "logged out".

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use barakah_core::error::{BarakahError, Result};
use barakah_core::storage::SecureTokenStore;
use tokio::io::AsyncWriteExt;

/// File-backed implementation of [`SecureTokenStore`].
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a token store backed by `path`.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn remove_quietly(&self) {
        if let Err(err) = tokio::fs::remove_file(&self.path).await {
            if err.kind() != io::ErrorKind::NotFound {
                tracing::warn!("failed to remove damaged token file: {err}");
            }
        }
    }

    #[cfg(unix)]
    async fn harden(&self) -> io::Result<()> {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        tokio::fs::set_permissions(&self.path, perms).await
    }

    #[cfg(not(unix))]
    async fn harden(&self) -> io::Result<()> {
        Ok(())
    }
}

#[async_trait]
impl SecureTokenStore for FileTokenStore {
    async fn token(&self) -> Option<String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => {
                let token = raw.trim().to_string();
                if token.is_empty() || !token.is_ascii() {
                    // Damaged entry: drop it and report absent.
                    tracing::warn!("token file is corrupt, deleting it");
                    self.remove_quietly().await;
                    return None;
                }
                Some(token)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!("token file unreadable, deleting it: {err}");
                self.remove_quietly().await;
                None
            }
        }
    }

    async fn store_token(&self, token: &str) -> Result<()> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| BarakahError::storage("token path has no parent directory"))?;
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|err| BarakahError::storage(format!("failed to create secure dir: {err}")))?;

        let mut file = tokio::fs::File::create(&self.path)
            .await
            .map_err(|err| BarakahError::storage(format!("failed to create token file: {err}")))?;
        file.write_all(token.as_bytes())
            .await
            .map_err(|err| BarakahError::storage(format!("failed to write token: {err}")))?;
        file.sync_all()
            .await
            .map_err(|err| BarakahError::storage(format!("failed to sync token file: {err}")))?;
        drop(file);

        self.harden()
            .await
            .map_err(|err| BarakahError::storage(format!("failed to set permissions: {err}")))
    }

    async fn clear_token(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(BarakahError::storage(format!(
                "failed to clear token: {err}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> FileTokenStore {
        FileTokenStore::new(dir.path().join("secure").join("token"))
    }

    #[tokio::test]
    async fn store_then_read_round_trips() {
        let dir = TempDir::new().unwrap();
        let tokens = store(&dir);

        tokens.store_token("bearer-abc123").await.unwrap();
        assert_eq!(tokens.token().await.as_deref(), Some("bearer-abc123"));
    }

    #[tokio::test]
    async fn absent_token_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(store(&dir).token().await.is_none());
    }

    #[tokio::test]
    async fn corrupt_entry_is_deleted_and_absent() {
        let dir = TempDir::new().unwrap();
        let tokens = store(&dir);
        let path = dir.path().join("secure").join("token");

        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        assert!(tokens.token().await.is_none());
        assert!(!path.exists(), "damaged token file must be removed");
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let tokens = store(&dir);

        tokens.store_token("t").await.unwrap();
        tokens.clear_token().await.unwrap();
        tokens.clear_token().await.unwrap();
        assert!(tokens.token().await.is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn token_file_has_user_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let tokens = store(&dir);
        tokens.store_token("t").await.unwrap();

        let mode = std::fs::metadata(dir.path().join("secure").join("token"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
