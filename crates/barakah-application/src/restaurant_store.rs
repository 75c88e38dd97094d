//! Restaurant store.
//!
//! The favorites id set is the single source of truth; whether a given
//! restaurant is a favorite is always derived by lookup, so there is no
//! denormalized flag to keep in sync.

use std::collections::BTreeSet;
use std::sync::Arc;

use barakah_core::api::BackendApi;
use barakah_core::error::Result;
use barakah_core::restaurant::{nearest, GeoPoint, Restaurant};
use barakah_core::storage::{self, KeyValueStorage};
use tokio::sync::RwLock;

use crate::snapshot::ActionStatus;

const FAVORITES_KEY: &str = "restaurant.favorites";

/// The restaurant store's snapshot.
#[derive(Debug, Clone, Default)]
pub struct RestaurantSnapshot {
    pub restaurants: Vec<Restaurant>,
    pub favorites: BTreeSet<String>,
    pub status: ActionStatus,
}

impl RestaurantSnapshot {
    /// Derived favorite flag; the set is the only representation.
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }
}

/// Store owning the restaurant discovery slice.
pub struct RestaurantStore {
    state: Arc<RwLock<RestaurantSnapshot>>,
    api: Arc<dyn BackendApi>,
    storage: Arc<dyn KeyValueStorage>,
}

impl RestaurantStore {
    pub fn new(api: Arc<dyn BackendApi>, storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            state: Arc::new(RwLock::new(RestaurantSnapshot::default())),
            api,
            storage,
        }
    }

    pub async fn snapshot(&self) -> RestaurantSnapshot {
        self.state.read().await.clone()
    }

    /// Restores the persisted favorites set.
    pub async fn restore(&self) {
        if let Some(favorites) =
            storage::load_json::<BTreeSet<String>>(self.storage.as_ref(), FAVORITES_KEY).await
        {
            self.state.write().await.favorites = favorites;
        }
    }

    /// Replaces the listing from the backend.
    pub async fn refresh(&self) -> Result<()> {
        self.state.write().await.status.begin();
        match self.api.list_restaurants().await {
            Ok(restaurants) => {
                let mut state = self.state.write().await;
                state.restaurants = restaurants;
                state.status.succeed();
                Ok(())
            }
            Err(err) => {
                self.state.write().await.status.fail(&err);
                Err(err)
            }
        }
    }

    /// Adds or removes `id` from the favorites set and persists the result.
    pub async fn toggle_favorite(&self, id: &str) -> Result<bool> {
        self.state.write().await.status.begin();

        let mut updated = self.state.read().await.favorites.clone();
        let now_favorite = if updated.contains(id) {
            updated.remove(id);
            false
        } else {
            updated.insert(id.to_string());
            true
        };

        if let Err(err) =
            storage::persist_json(self.storage.as_ref(), FAVORITES_KEY, &updated).await
        {
            self.state.write().await.status.fail(&err);
            return Err(err);
        }

        let mut state = self.state.write().await;
        state.favorites = updated;
        state.status.succeed();
        Ok(now_favorite)
    }

    pub async fn is_favorite(&self, id: &str) -> bool {
        self.state.read().await.is_favorite(id)
    }

    /// Returns the favorited restaurants present in the current listing.
    pub async fn favorites(&self) -> Vec<Restaurant> {
        let state = self.state.read().await;
        state
            .restaurants
            .iter()
            .filter(|r| state.favorites.contains(&r.id))
            .cloned()
            .collect()
    }

    /// Returns the current listing ordered by distance from `origin`.
    pub async fn nearby(&self, origin: GeoPoint) -> Vec<Restaurant> {
        let state = self.state.read().await;
        nearest(&state.restaurants, origin)
            .into_iter()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockBackend;
    use barakah_infrastructure::MemoryStorage;

    fn restaurant(id: &str, lat: f64) -> Restaurant {
        Restaurant {
            id: id.to_string(),
            name: format!("Resto {id}"),
            cuisine: "levantine".to_string(),
            address: String::new(),
            location: GeoPoint {
                latitude: lat,
                longitude: 29.0,
            },
            rating: Some(4.4),
            certified: true,
        }
    }

    fn fixture() -> (Arc<MockBackend>, Arc<MemoryStorage>, RestaurantStore) {
        let api = Arc::new(MockBackend::new());
        let storage = Arc::new(MemoryStorage::new());
        let store = RestaurantStore::new(api.clone(), storage.clone());
        (api, storage, store)
    }

    #[tokio::test]
    async fn favorite_then_unfavorite_round_trips_to_the_original_state() {
        let (_api, _storage, store) = fixture();

        assert!(store.toggle_favorite("r-1").await.unwrap());
        assert!(store.is_favorite("r-1").await);

        assert!(!store.toggle_favorite("r-1").await.unwrap());
        assert!(!store.is_favorite("r-1").await);
        assert!(store.snapshot().await.favorites.is_empty());
    }

    #[tokio::test]
    async fn favorites_survive_a_restart() {
        let (api, storage, store) = fixture();
        store.toggle_favorite("r-1").await.unwrap();
        store.toggle_favorite("r-2").await.unwrap();

        let revived = RestaurantStore::new(api, storage);
        revived.restore().await;
        assert!(revived.is_favorite("r-1").await);
        assert!(revived.is_favorite("r-2").await);
    }

    #[tokio::test]
    async fn failed_persist_leaves_the_set_unchanged() {
        let (_api, storage, store) = fixture();
        store.toggle_favorite("r-1").await.unwrap();
        storage.fail_writes(true);

        assert!(store.toggle_favorite("r-2").await.is_err());
        let snapshot = store.snapshot().await;
        assert!(snapshot.is_favorite("r-1"));
        assert!(!snapshot.is_favorite("r-2"));
        assert!(snapshot.status.error.is_some());
    }

    #[tokio::test]
    async fn refresh_replaces_the_listing() {
        let (api, _storage, store) = fixture();
        *api.restaurants.lock().unwrap() = vec![restaurant("r-1", 41.0), restaurant("r-2", 48.0)];

        store.refresh().await.unwrap();
        assert_eq!(store.snapshot().await.restaurants.len(), 2);
    }

    #[tokio::test]
    async fn favorites_filters_the_current_listing() {
        let (api, _storage, store) = fixture();
        *api.restaurants.lock().unwrap() = vec![restaurant("r-1", 41.0), restaurant("r-2", 48.0)];
        store.refresh().await.unwrap();
        store.toggle_favorite("r-2").await.unwrap();

        let favorites = store.favorites().await;
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, "r-2");
    }

    #[tokio::test]
    async fn nearby_orders_by_distance() {
        let (api, _storage, store) = fixture();
        *api.restaurants.lock().unwrap() = vec![restaurant("far", 48.0), restaurant("near", 41.1)];
        store.refresh().await.unwrap();

        let ordered = store
            .nearby(GeoPoint {
                latitude: 41.0,
                longitude: 29.0,
            })
            .await;
        assert_eq!(ordered[0].id, "near");
    }
}
