//! Product store: barcode scanning, history, search, reporting.
//!
//! Scan resolution order: remote catalog, then the built-in catalog if the
//! backend is unreachable, then a synthesized "Unknown Product" placeholder.
//! History deduplicates by product id and is position-stable: rescanning a
//! known product moves the `current` pointer but never the history entry.

use std::sync::Arc;

use barakah_core::api::BackendApi;
use barakah_core::error::{BarakahError, Result};
use barakah_core::product::{self, catalog, Product, ProductReport};
use barakah_core::storage::{self, KeyValueStorage};
use tokio::sync::RwLock;

use crate::snapshot::ActionStatus;

const HISTORY_KEY: &str = "product.scan_history";

/// The product store's snapshot.
#[derive(Debug, Clone, Default)]
pub struct ProductSnapshot {
    /// Scan history, most recent first, one entry per product id.
    pub history: Vec<Product>,
    /// Id of the most recently scanned product.
    pub current: Option<String>,
    pub status: ActionStatus,
}

/// Store owning the product/scanner slice.
pub struct ProductStore {
    state: Arc<RwLock<ProductSnapshot>>,
    api: Arc<dyn BackendApi>,
    storage: Arc<dyn KeyValueStorage>,
}

impl ProductStore {
    pub fn new(api: Arc<dyn BackendApi>, storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            state: Arc::new(RwLock::new(ProductSnapshot::default())),
            api,
            storage,
        }
    }

    pub async fn snapshot(&self) -> ProductSnapshot {
        self.state.read().await.clone()
    }

    /// Restores the persisted scan history; absent or corrupt data means an
    /// empty history.
    pub async fn restore(&self) {
        if let Some(history) =
            storage::load_json::<Vec<Product>>(self.storage.as_ref(), HISTORY_KEY).await
        {
            self.state.write().await.history = history;
        }
    }

    /// Resolves a barcode and records the scan.
    pub async fn scan_product(&self, barcode: &str) -> Result<Product> {
        self.state.write().await.status.begin();

        let resolved = match self.api.lookup_product(barcode).await {
            Ok(found) => found,
            Err(err) if err.is_transport() => {
                tracing::warn!("backend unreachable, falling back to built-in catalog: {err}");
                catalog::lookup(barcode)
            }
            Err(err) => {
                self.state.write().await.status.fail(&err);
                return Err(err);
            }
        };
        let product = resolved.unwrap_or_else(|| Product::unknown(barcode));

        // Prepend only a first-seen identity; a repeat scan is position-stable
        // and just retargets `current`. Persist first so a failed write leaves
        // the snapshot untouched.
        let mut history = self.state.read().await.history.clone();
        if !history.iter().any(|p| p.id == product.id) {
            history.insert(0, product.clone());
        }

        if let Err(err) = storage::persist_json(self.storage.as_ref(), HISTORY_KEY, &history).await
        {
            self.state.write().await.status.fail(&err);
            return Err(err);
        }

        let mut state = self.state.write().await;
        state.history = history;
        state.current = Some(product.id.clone());
        state.status.succeed();
        Ok(product)
    }

    /// Looks a product up by id: history first, then the built-in catalog.
    pub async fn product_by_id(&self, id: &str) -> Option<Product> {
        let state = self.state.read().await;
        state
            .history
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .or_else(|| catalog::builtin().into_iter().find(|p| p.id == id))
    }

    /// Case-insensitive search over the built-in catalog and the scanned
    /// history, deduplicated by id. Empty/whitespace queries return nothing.
    pub async fn search_products(&self, query: &str) -> Vec<Product> {
        let mut pool = catalog::builtin();
        let state = self.state.read().await;
        for scanned in &state.history {
            if !pool.iter().any(|p| p.id == scanned.id) {
                pool.push(scanned.clone());
            }
        }
        product::search(&pool, query).into_iter().cloned().collect()
    }

    /// Submits a product report to the backend.
    pub async fn report_product(&self, report: ProductReport) -> Result<()> {
        if report.reason.trim().is_empty() {
            let err = BarakahError::validation("reason", "must not be empty");
            self.state.write().await.status.fail(&err);
            return Err(err);
        }

        self.state.write().await.status.begin();
        match self.api.report_product(&report).await {
            Ok(()) => {
                self.state.write().await.status.succeed();
                Ok(())
            }
            Err(err) => {
                self.state.write().await.status.fail(&err);
                Err(err)
            }
        }
    }
}
