//! Application bootstrap.
//!
//! Builds every service exactly once at startup and hands them out as
//! explicit `Arc` handles. Nothing here is a process-wide global; the UI
//! shell owns the returned [`AppServices`] and passes stores down, and tests
//! construct their own instances with in-memory doubles.

use std::sync::Arc;

use barakah_api::HttpBackend;
use barakah_core::api::BackendApi;
use barakah_core::config::ClientConfig;
use barakah_core::error::Result;
use barakah_core::storage::{KeyValueStorage, SecureTokenStore};
use barakah_infrastructure::{BarakahPaths, ConfigLoader, FileKeyValueStorage, FileTokenStore};

use crate::analytics_store::AnalyticsStore;
use crate::auth_store::AuthStore;
use crate::chat_store::ChatStore;
use crate::content_store::ContentStore;
use crate::product_store::ProductStore;
use crate::restaurant_store::RestaurantStore;
use crate::settings_store::SettingsStore;
use crate::stream_store::StreamStore;

/// Installs the process-wide log subscriber. `RUST_LOG` controls the filter,
/// defaulting to `info`. Safe to call more than once; only the first call
/// installs anything, so embedding shells that bring their own subscriber can
/// skip it.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Every store plus the shared backend handle, built once at startup.
pub struct AppServices {
    pub auth: Arc<AuthStore>,
    pub settings: Arc<SettingsStore>,
    pub products: Arc<ProductStore>,
    pub restaurants: Arc<RestaurantStore>,
    pub streams: Arc<StreamStore>,
    pub chat: Arc<ChatStore>,
    pub analytics: Arc<AnalyticsStore>,
    pub content: Arc<ContentStore>,
    pub api: Arc<dyn BackendApi>,
}

impl AppServices {
    /// Production bootstrap: platform paths, config file, file-backed
    /// storage, HTTP backend, then persisted snapshots restored.
    pub async fn bootstrap() -> Result<Self> {
        let paths = BarakahPaths::new()
            .map_err(|err| barakah_core::BarakahError::config(err.to_string()))?;
        Self::bootstrap_at(paths).await
    }

    /// Bootstrap rooted at explicit paths (used by tests and tooling).
    pub async fn bootstrap_at(paths: BarakahPaths) -> Result<Self> {
        let config = ConfigLoader::new(paths.config_file()).load().await?;
        tracing::info!("bootstrapping against {}", config.base_url);

        let storage: Arc<dyn KeyValueStorage> =
            Arc::new(FileKeyValueStorage::new(paths.state_dir()));
        let tokens: Arc<dyn SecureTokenStore> = Arc::new(FileTokenStore::new(paths.token_file()));
        let api: Arc<dyn BackendApi> = Arc::new(HttpBackend::new(&config, tokens.clone())?);

        let services = Self::with_components(api, storage, tokens, &config);
        services.restore().await;
        Ok(services)
    }

    /// Pure dependency-injection constructor; performs no I/O.
    pub fn with_components(
        api: Arc<dyn BackendApi>,
        storage: Arc<dyn KeyValueStorage>,
        tokens: Arc<dyn SecureTokenStore>,
        _config: &ClientConfig,
    ) -> Self {
        Self {
            auth: Arc::new(AuthStore::new(api.clone(), storage.clone(), tokens)),
            settings: Arc::new(SettingsStore::new(storage.clone())),
            products: Arc::new(ProductStore::new(api.clone(), storage.clone())),
            restaurants: Arc::new(RestaurantStore::new(api.clone(), storage.clone())),
            streams: Arc::new(StreamStore::new(api.clone(), storage)),
            chat: Arc::new(ChatStore::new(api.clone())),
            analytics: Arc::new(AnalyticsStore::new(api.clone())),
            content: Arc::new(ContentStore::new(api.clone())),
            api,
        }
    }

    /// Restores every persisted snapshot. Failures degrade to defaults by
    /// contract, so this never errors.
    pub async fn restore(&self) {
        self.auth.restore().await;
        self.settings.restore().await;
        self.products.restore().await;
        self.restaurants.restore().await;
        self.streams.restore().await;
    }
}
