//! Storage trait seams.
//!
//! These traits decouple the stores from the concrete on-device storage
//! mechanism (JSON files in production, in-memory maps in tests).

use crate::error::Result;
use async_trait::async_trait;

/// An abstract namespaced key-value store used as the durability backend for
/// every persisted container snapshot.
///
/// # Failure semantics
///
/// Read failures of any kind (missing key, unreadable file, corrupt payload)
/// must degrade to `Ok(None)` so callers fall open to their defaults. Write
/// failures propagate as errors; implementations must never leave a key in a
/// half-written state.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Returns the stored value for `key`, or `None` if absent/unreadable.
    async fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}

/// A hardened store for the authentication bearer token.
///
/// Same contract as [`KeyValueStorage`] but for a single logical value, kept
/// in an OS-protected location outside the general-purpose namespace. A
/// corrupted or unreadable entry is deleted and reported as absent, never
/// surfaced as an error.
#[async_trait]
pub trait SecureTokenStore: Send + Sync {
    /// Returns the stored token, or `None` if absent or unreadable.
    async fn token(&self) -> Option<String>;

    /// Stores the token.
    async fn store_token(&self, token: &str) -> Result<()>;

    /// Removes the token. Removing an absent token is not an error.
    async fn clear_token(&self) -> Result<()>;
}

/// Serializes a value and writes it under `key`.
///
/// Shared helper for stores persisting whole snapshots as JSON documents.
pub async fn persist_json<T: serde::Serialize + Sync>(
    storage: &dyn KeyValueStorage,
    key: &str,
    value: &T,
) -> Result<()> {
    let payload = serde_json::to_string(value)?;
    storage.set(key, &payload).await
}

/// Loads and deserializes the value under `key`, degrading to `None` on any
/// read or parse failure.
pub async fn load_json<T: serde::de::DeserializeOwned>(
    storage: &dyn KeyValueStorage,
    key: &str,
) -> Option<T> {
    let payload = storage.get(key).await?;
    match serde_json::from_str(&payload) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!("discarding corrupt snapshot under '{key}': {err}");
            None
        }
    }
}
