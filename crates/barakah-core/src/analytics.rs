//! Analytics snapshot model.

use serde::{Deserialize, Serialize};

/// A read-only aggregate fetched wholesale from the backend.
///
/// There is no local mutation; a fetch replaces the whole value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    #[serde(default)]
    pub scans_total: u64,
    #[serde(default)]
    pub scans_halal: u64,
    #[serde(default)]
    pub scans_haram: u64,
    #[serde(default)]
    pub scans_doubtful: u64,
    #[serde(default)]
    pub streams_watched: u64,
    #[serde(default)]
    pub chat_messages: u64,
    #[serde(default)]
    pub favorite_restaurants: u64,
}
