//! Analytics store: a read-only aggregate, replaced wholesale on fetch.

use std::sync::Arc;

use barakah_core::analytics::AnalyticsSnapshot;
use barakah_core::api::BackendApi;
use barakah_core::error::Result;
use tokio::sync::RwLock;

use crate::snapshot::ActionStatus;

/// The analytics store's snapshot.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsState {
    pub data: AnalyticsSnapshot,
    pub status: ActionStatus,
}

/// Store owning the analytics slice. No local mutation, no persistence.
pub struct AnalyticsStore {
    state: Arc<RwLock<AnalyticsState>>,
    api: Arc<dyn BackendApi>,
}

impl AnalyticsStore {
    pub fn new(api: Arc<dyn BackendApi>) -> Self {
        Self {
            state: Arc::new(RwLock::new(AnalyticsState::default())),
            api,
        }
    }

    pub async fn snapshot(&self) -> AnalyticsState {
        self.state.read().await.clone()
    }

    /// Replaces the aggregate from the backend.
    pub async fn fetch(&self) -> Result<()> {
        self.state.write().await.status.begin();
        match self.api.fetch_analytics().await {
            Ok(data) => {
                let mut state = self.state.write().await;
                state.data = data;
                state.status.succeed();
                Ok(())
            }
            Err(err) => {
                self.state.write().await.status.fail(&err);
                Err(err)
            }
        }
    }
}
