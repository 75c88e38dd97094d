//! Devotional content store: prayer schedule, qibla, daily quote, duas.
//!
//! The schedule starts as the built-in fallback and is replaced by
//! location-aware times from the backend; next-prayer lookup is a pure
//! derivation over the current schedule.

use std::sync::Arc;

use barakah_core::api::BackendApi;
use barakah_core::content::{Dua, NewDua, Quote};
use barakah_core::error::{BarakahError, Result};
use barakah_core::prayer::{self, NextPrayer, PrayerSchedule, QiblaDirection};
use chrono::Local;
use tokio::sync::RwLock;

use crate::snapshot::ActionStatus;

/// The content store's snapshot.
#[derive(Debug, Clone)]
pub struct ContentSnapshot {
    pub schedule: PrayerSchedule,
    pub qibla: Option<QiblaDirection>,
    pub quote: Option<Quote>,
    pub duas: Vec<Dua>,
    pub status: ActionStatus,
}

impl Default for ContentSnapshot {
    fn default() -> Self {
        Self {
            schedule: PrayerSchedule::fallback(),
            qibla: None,
            quote: None,
            duas: Vec::new(),
            status: ActionStatus::default(),
        }
    }
}

/// Store owning the devotional content slice.
pub struct ContentStore {
    state: Arc<RwLock<ContentSnapshot>>,
    api: Arc<dyn BackendApi>,
}

impl ContentStore {
    pub fn new(api: Arc<dyn BackendApi>) -> Self {
        Self {
            state: Arc::new(RwLock::new(ContentSnapshot::default())),
            api,
        }
    }

    pub async fn snapshot(&self) -> ContentSnapshot {
        self.state.read().await.clone()
    }

    async fn run<T, F, A>(&self, call: F, apply: A) -> Result<T>
    where
        F: std::future::Future<Output = Result<T>>,
        A: FnOnce(&mut ContentSnapshot, &T),
    {
        self.state.write().await.status.begin();
        match call.await {
            Ok(value) => {
                let mut state = self.state.write().await;
                apply(&mut state, &value);
                state.status.succeed();
                Ok(value)
            }
            Err(err) => {
                self.state.write().await.status.fail(&err);
                Err(err)
            }
        }
    }

    /// Replaces the schedule with location-aware times.
    pub async fn refresh_prayer_times(&self, latitude: f64, longitude: f64) -> Result<()> {
        self.run(self.api.prayer_times(latitude, longitude), |state, schedule| {
            state.schedule = schedule.clone();
        })
        .await
        .map(|_| ())
    }

    /// Fetches the qibla bearing for a location.
    pub async fn refresh_qibla(&self, latitude: f64, longitude: f64) -> Result<QiblaDirection> {
        self.run(self.api.qibla_direction(latitude, longitude), |state, qibla| {
            state.qibla = Some(*qibla);
        })
        .await
    }

    /// Fetches the quote of the day.
    pub async fn refresh_quote(&self) -> Result<()> {
        self.run(self.api.daily_quote(), |state, quote| {
            state.quote = Some(quote.clone());
        })
        .await
        .map(|_| ())
    }

    /// Replaces the dua list from the backend.
    pub async fn refresh_duas(&self) -> Result<()> {
        self.run(self.api.list_duas(), |state, duas: &Vec<Dua>| {
            state.duas = duas.clone();
        })
        .await
        .map(|_| ())
    }

    /// Creates a dua remotely and appends it locally.
    pub async fn add_dua(&self, dua: NewDua) -> Result<Dua> {
        if dua.title.trim().is_empty() {
            let err = BarakahError::validation("title", "must not be empty");
            self.state.write().await.status.fail(&err);
            return Err(err);
        }
        self.run(self.api.create_dua(&dua), |state, created: &Dua| {
            state.duas.push(created.clone());
        })
        .await
    }

    /// Deletes a dua remotely and removes it locally.
    pub async fn remove_dua(&self, id: &str) -> Result<()> {
        let id_owned = id.to_string();
        self.run(self.api.delete_dua(id), move |state, _| {
            state.duas.retain(|d| d.id != id_owned);
        })
        .await
    }

    /// Next prayer relative to the given minutes-since-midnight.
    pub async fn next_prayer_at(&self, now_minutes: u32) -> Option<NextPrayer> {
        let state = self.state.read().await;
        prayer::next_prayer(&state.schedule.times, now_minutes)
    }

    /// Next prayer relative to the local wall clock.
    pub async fn next_prayer(&self) -> Option<NextPrayer> {
        let now = prayer::minutes_since_midnight(Local::now().time());
        self.next_prayer_at(now).await
    }
}
