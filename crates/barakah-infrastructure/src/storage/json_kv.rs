//! File-backed key-value storage with atomic writes.
//!
//! Each namespaced key is one JSON document in the state directory. Writes go
//! through a temporary file, an explicit fsync, and an atomic rename, so a
//! crash mid-write can never leave a half-written snapshot behind. Reads fail
//! open: any unreadable or missing entry is reported as absent.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use barakah_core::error::{BarakahError, Result};
use barakah_core::storage::KeyValueStorage;
use tokio::io::AsyncWriteExt;

/// On-device key-value storage backed by one file per key.
pub struct FileKeyValueStorage {
    dir: PathBuf,
}

impl FileKeyValueStorage {
    /// Creates storage rooted at `dir`. The directory is created lazily on
    /// the first write.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Maps a key to its backing file.
    ///
    /// Path separators are rejected up front so a key can never escape the
    /// state directory.
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains('/') || key.contains('\\') || key.contains("..") {
            return Err(BarakahError::storage(format!("invalid storage key: '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    async fn write_atomic(path: &Path, value: &str) -> io::Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "key path has no parent"))?;
        tokio::fs::create_dir_all(parent).await?;

        let tmp = path.with_extension("json.tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(value.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await
    }
}

#[async_trait]
impl KeyValueStorage for FileKeyValueStorage {
    async fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key).ok()?;
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Some(value),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!("unreadable entry for '{key}', treating as absent: {err}");
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        Self::write_atomic(&path, value)
            .await
            .map_err(|err| BarakahError::storage(format!("failed to write '{key}': {err}")))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(BarakahError::storage(format!(
                "failed to delete '{key}': {err}"
            ))),
        }
    }
}
