//! Live stream domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamStatus {
    Live,
    Upcoming,
    Recorded,
}

/// A live or recorded stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    pub id: String,
    pub title: String,
    pub host: String,
    pub category: String,
    pub status: StreamStatus,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
}

/// One watch-history record.
///
/// The stream store keeps at most one entry per stream id; a rewatch
/// overwrites `watched_at` and `progress_secs` in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchHistoryEntry {
    pub stream_id: String,
    pub watched_at: DateTime<Utc>,
    pub progress_secs: u64,
}

/// A comment posted to a live stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamComment {
    pub stream_id: String,
    pub body: String,
}
