//! Settings store.
//!
//! Pure local toggles, no remote calls. Each action flips or sets one flag,
//! persists the whole settings document, and only then applies the change to
//! the in-memory snapshot, so a failed write leaves the visible state
//! untouched.

use std::sync::Arc;

use barakah_core::error::{BarakahError, Result};
use barakah_core::settings::Settings;
use barakah_core::storage::{self, KeyValueStorage};
use tokio::sync::RwLock;

use crate::snapshot::ActionStatus;

const SETTINGS_KEY: &str = "settings";

/// The settings store's snapshot.
#[derive(Debug, Clone, Default)]
pub struct SettingsSnapshot {
    pub settings: Settings,
    pub status: ActionStatus,
}

/// Store owning process-wide configuration toggles.
pub struct SettingsStore {
    state: Arc<RwLock<SettingsSnapshot>>,
    storage: Arc<dyn KeyValueStorage>,
}

impl SettingsStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            state: Arc::new(RwLock::new(SettingsSnapshot::default())),
            storage,
        }
    }

    pub async fn snapshot(&self) -> SettingsSnapshot {
        self.state.read().await.clone()
    }

    /// Restores persisted settings; absent or corrupt data keeps defaults.
    pub async fn restore(&self) {
        if let Some(settings) =
            storage::load_json::<Settings>(self.storage.as_ref(), SETTINGS_KEY).await
        {
            self.state.write().await.settings = settings;
        }
    }

    /// Persist-then-apply used by every toggle.
    async fn commit<F>(&self, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut Settings),
    {
        self.state.write().await.status.begin();

        let mut updated = self.state.read().await.settings.clone();
        mutate(&mut updated);

        if let Err(err) = storage::persist_json(self.storage.as_ref(), SETTINGS_KEY, &updated).await
        {
            self.state.write().await.status.fail(&err);
            return Err(err);
        }

        let mut state = self.state.write().await;
        state.settings = updated;
        state.status.succeed();
        Ok(())
    }

    pub async fn toggle_dark_mode(&self) -> Result<()> {
        self.commit(|s| s.dark_mode = !s.dark_mode).await
    }

    pub async fn toggle_prayer_notifications(&self) -> Result<()> {
        self.commit(|s| s.prayer_notifications = !s.prayer_notifications)
            .await
    }

    pub async fn toggle_stream_notifications(&self) -> Result<()> {
        self.commit(|s| s.stream_notifications = !s.stream_notifications)
            .await
    }

    pub async fn toggle_product_alerts(&self) -> Result<()> {
        self.commit(|s| s.product_alerts = !s.product_alerts).await
    }

    pub async fn toggle_auto_download(&self) -> Result<()> {
        self.commit(|s| s.auto_download = !s.auto_download).await
    }

    pub async fn set_location_permission(&self, granted: bool) -> Result<()> {
        self.commit(|s| s.location_permission = granted).await
    }

    pub async fn set_locale(&self, locale: &str) -> Result<()> {
        if locale.trim().is_empty() {
            let err = BarakahError::validation("locale", "must not be empty");
            self.state.write().await.status.fail(&err);
            return Err(err);
        }
        let locale = locale.to_string();
        self.commit(move |s| s.locale = locale).await
    }
}
