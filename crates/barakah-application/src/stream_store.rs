//! Stream store.
//!
//! Favorites are an id set; watch history follows an upsert-by-id discipline
//! (one entry per stream, latest timestamp and progress win). Notification
//! toggles are independent booleans. Preferences persist as one document.

use std::collections::BTreeSet;
use std::sync::Arc;

use barakah_core::api::BackendApi;
use barakah_core::error::{BarakahError, Result};
use barakah_core::storage::{self, KeyValueStorage};
use barakah_core::stream::{Stream, StreamComment, StreamStatus, WatchHistoryEntry};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::snapshot::ActionStatus;

const PREFS_KEY: &str = "stream.preferences";

/// The persisted slice of the stream store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StreamPrefs {
    favorites: BTreeSet<String>,
    watch_history: Vec<WatchHistoryEntry>,
    notify_live: bool,
    notify_upcoming: bool,
}

/// The stream store's snapshot.
#[derive(Debug, Clone, Default)]
pub struct StreamSnapshot {
    pub streams: Vec<Stream>,
    pub favorites: BTreeSet<String>,
    pub watch_history: Vec<WatchHistoryEntry>,
    pub notify_live: bool,
    pub notify_upcoming: bool,
    pub status: ActionStatus,
}

impl StreamSnapshot {
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    fn prefs(&self) -> StreamPrefs {
        StreamPrefs {
            favorites: self.favorites.clone(),
            watch_history: self.watch_history.clone(),
            notify_live: self.notify_live,
            notify_upcoming: self.notify_upcoming,
        }
    }
}

/// Store owning the live-stream slice.
pub struct StreamStore {
    state: Arc<RwLock<StreamSnapshot>>,
    api: Arc<dyn BackendApi>,
    storage: Arc<dyn KeyValueStorage>,
}

impl StreamStore {
    pub fn new(api: Arc<dyn BackendApi>, storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            state: Arc::new(RwLock::new(StreamSnapshot::default())),
            api,
            storage,
        }
    }

    pub async fn snapshot(&self) -> StreamSnapshot {
        self.state.read().await.clone()
    }

    /// Restores persisted favorites, watch history, and notification flags.
    pub async fn restore(&self) {
        if let Some(prefs) =
            storage::load_json::<StreamPrefs>(self.storage.as_ref(), PREFS_KEY).await
        {
            let mut state = self.state.write().await;
            state.favorites = prefs.favorites;
            state.watch_history = prefs.watch_history;
            state.notify_live = prefs.notify_live;
            state.notify_upcoming = prefs.notify_upcoming;
        }
    }

    /// Persist-then-apply for the preference slice.
    async fn commit<F>(&self, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut StreamSnapshot),
    {
        self.state.write().await.status.begin();

        let mut updated = self.state.read().await.clone();
        mutate(&mut updated);

        if let Err(err) =
            storage::persist_json(self.storage.as_ref(), PREFS_KEY, &updated.prefs()).await
        {
            self.state.write().await.status.fail(&err);
            return Err(err);
        }

        updated.status.succeed();
        *self.state.write().await = updated;
        Ok(())
    }

    /// Replaces the stream listing from the backend.
    pub async fn refresh(&self) -> Result<()> {
        self.state.write().await.status.begin();
        match self.api.list_streams().await {
            Ok(streams) => {
                let mut state = self.state.write().await;
                state.streams = streams;
                state.status.succeed();
                Ok(())
            }
            Err(err) => {
                self.state.write().await.status.fail(&err);
                Err(err)
            }
        }
    }

    pub async fn toggle_favorite(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        let mut now_favorite = false;
        self.commit(|state| {
            if state.favorites.contains(&id) {
                state.favorites.remove(&id);
            } else {
                state.favorites.insert(id.clone());
                now_favorite = true;
            }
        })
        .await?;
        Ok(now_favorite)
    }

    /// Upserts the watch-history entry for `stream_id`.
    pub async fn record_watch(&self, stream_id: &str, progress_secs: u64) -> Result<()> {
        let entry = WatchHistoryEntry {
            stream_id: stream_id.to_string(),
            watched_at: Utc::now(),
            progress_secs,
        };
        self.commit(|state| {
            match state
                .watch_history
                .iter_mut()
                .find(|e| e.stream_id == entry.stream_id)
            {
                Some(existing) => *existing = entry,
                None => state.watch_history.push(entry),
            }
        })
        .await
    }

    pub async fn toggle_live_notifications(&self) -> Result<()> {
        self.commit(|state| state.notify_live = !state.notify_live)
            .await
    }

    pub async fn toggle_upcoming_notifications(&self) -> Result<()> {
        self.commit(|state| state.notify_upcoming = !state.notify_upcoming)
            .await
    }

    /// Likes a stream remotely and applies the returned count locally.
    pub async fn like(&self, stream_id: &str) -> Result<u64> {
        self.state.write().await.status.begin();
        match self.api.like_stream(stream_id).await {
            Ok(likes) => {
                let mut state = self.state.write().await;
                if let Some(stream) = state.streams.iter_mut().find(|s| s.id == stream_id) {
                    stream.likes = likes;
                }
                state.status.succeed();
                Ok(likes)
            }
            Err(err) => {
                self.state.write().await.status.fail(&err);
                Err(err)
            }
        }
    }

    /// Posts a comment to a live stream.
    pub async fn comment(&self, stream_id: &str, body: &str) -> Result<()> {
        if body.trim().is_empty() {
            let err = BarakahError::validation("body", "must not be empty");
            self.state.write().await.status.fail(&err);
            return Err(err);
        }

        self.state.write().await.status.begin();
        let comment = StreamComment {
            stream_id: stream_id.to_string(),
            body: body.to_string(),
        };
        match self.api.comment_stream(&comment).await {
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

    /// Starts a stream (creator path) and prepends it to the listing.
    pub async fn start_stream(&self, title: &str, category: &str) -> Result<Stream> {
        self.state.write().await.status.begin();
        match self.api.start_stream(title, category).await {
            Ok(stream) => {
                let mut state = self.state.write().await;
                state.streams.insert(0, stream.clone());
                state.status.succeed();
                Ok(stream)
            }
            Err(err) => {
                self.state.write().await.status.fail(&err);
                Err(err)
            }
        }
    }

    /// Ends a stream (creator path) and marks it recorded locally.
    pub async fn end_stream(&self, stream_id: &str) -> Result<()> {
        self.state.write().await.status.begin();
        match self.api.end_stream(stream_id).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                if let Some(stream) = state.streams.iter_mut().find(|s| s.id == stream_id) {
                    stream.status = StreamStatus::Recorded;
                    stream.ends_at = Some(Utc::now());
                }
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
