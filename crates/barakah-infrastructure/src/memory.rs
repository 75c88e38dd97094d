//! In-memory storage doubles.
//!
//! Used by store tests and available to downstream integration tests; they
//! honor the same contracts as the file-backed implementations, including a
//! switchable write-failure mode for exercising error paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use barakah_core::error::{BarakahError, Result};
use barakah_core::storage::{KeyValueStorage, SecureTokenStore};

/// In-memory [`KeyValueStorage`].
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail, leaving reads untouched.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BarakahError::storage("simulated write failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_writable()?;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.check_writable()?;
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

/// In-memory [`SecureTokenStore`].
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SecureTokenStore for MemoryTokenStore {
    async fn token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    async fn store_token(&self, token: &str) -> Result<()> {
        *self.token.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    async fn clear_token(&self) -> Result<()> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_storage_honors_the_contract() {
        let kv = MemoryStorage::new();
        assert!(kv.get("k").await.is_none());

        kv.set("k", "v").await.unwrap();
        assert_eq!(kv.get("k").await.as_deref(), Some("v"));

        kv.delete("k").await.unwrap();
        assert!(kv.get("k").await.is_none());
    }

    #[tokio::test]
    async fn write_failure_mode_rejects_sets_but_keeps_reads() {
        let kv = MemoryStorage::new();
        kv.set("k", "v").await.unwrap();

        kv.fail_writes(true);
        assert!(kv.set("k", "other").await.is_err());
        assert_eq!(kv.get("k").await.as_deref(), Some("v"));
    }
}
