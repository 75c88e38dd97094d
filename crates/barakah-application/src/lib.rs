pub mod analytics_store;
pub mod auth_store;
pub mod bootstrap;
pub mod chat_store;
pub mod content_store;
pub mod product_store;
pub mod restaurant_store;
pub mod settings_store;
pub mod snapshot;
pub mod stream_store;

#[cfg(test)]
pub(crate) mod testing;

pub use analytics_store::AnalyticsStore;
pub use auth_store::AuthStore;
pub use bootstrap::{init_tracing, AppServices};
pub use chat_store::ChatStore;
pub use content_store::ContentStore;
pub use product_store::ProductStore;
pub use restaurant_store::RestaurantStore;
pub use settings_store::SettingsStore;
pub use snapshot::ActionStatus;
pub use stream_store::StreamStore;
