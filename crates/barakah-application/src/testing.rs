//! Scriptable in-memory backend used by store unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use barakah_core::analytics::AnalyticsSnapshot;
use barakah_core::api::BackendApi;
use barakah_core::chat::{ChatAnalysisRequest, ChatAnalysisResponse};
use barakah_core::content::{Dua, NewDua, Quote};
use barakah_core::error::{BarakahError, Result};
use barakah_core::prayer::{PrayerSchedule, QiblaDirection};
use barakah_core::product::{Product, ProductReport};
use barakah_core::restaurant::Restaurant;
use barakah_core::stream::{Stream, StreamComment};
use barakah_core::user::{AuthProvider, AuthSession, LoginRequest, SignupRequest, User};
use chrono::Utc;

/// A backend double whose behavior tests script per call.
#[derive(Default)]
pub struct MockBackend {
    pub products: Mutex<HashMap<String, Product>>,
    pub session: Mutex<Option<AuthSession>>,
    pub replies: Mutex<VecDeque<ChatAnalysisResponse>>,
    pub restaurants: Mutex<Vec<Restaurant>>,
    pub streams: Mutex<Vec<Stream>>,
    pub analytics: Mutex<AnalyticsSnapshot>,
    pub schedule: Mutex<Option<PrayerSchedule>>,
    pub duas: Mutex<Vec<Dua>>,
    pub likes: Mutex<HashMap<String, u64>>,
    pub reports: Mutex<Vec<ProductReport>>,
    pub comments: Mutex<Vec<StreamComment>>,
    /// When set, every call fails with a transport error.
    pub offline: AtomicBool,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn add_product(&self, product: Product) {
        self.products
            .lock()
            .unwrap()
            .insert(product.barcode.clone(), product);
    }

    pub fn set_session(&self, session: AuthSession) {
        *self.session.lock().unwrap() = Some(session);
    }

    pub fn push_reply(&self, reply: ChatAnalysisResponse) {
        self.replies.lock().unwrap().push_back(reply);
    }

    fn gate(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(BarakahError::network("simulated offline"));
        }
        Ok(())
    }
}

/// A ready-made authenticated session for tests.
pub fn sample_session() -> AuthSession {
    AuthSession {
        user: User {
            id: "user-1".to_string(),
            email: "amina@example.com".to_string(),
            display_name: "Amina".to_string(),
            avatar_url: None,
            preferences: Default::default(),
        },
        token: "token-abc".to_string(),
    }
}

#[async_trait]
impl BackendApi for MockBackend {
    async fn login(&self, request: &LoginRequest) -> Result<AuthSession> {
        self.gate()?;
        self.session
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| BarakahError::Backend {
                status: 401,
                message: format!("unknown account: {}", request.email),
            })
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthSession> {
        self.gate()?;
        let mut session = sample_session();
        session.user.email = request.email.clone();
        session.user.display_name = request.display_name.clone();
        Ok(session)
    }

    async fn login_with_provider(&self, _provider: AuthProvider) -> Result<AuthSession> {
        self.gate()?;
        self.session
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| BarakahError::Backend {
                status: 401,
                message: "social login rejected".to_string(),
            })
    }

    async fn lookup_product(&self, barcode: &str) -> Result<Option<Product>> {
        self.gate()?;
        Ok(self.products.lock().unwrap().get(barcode).cloned())
    }

    async fn report_product(&self, report: &ProductReport) -> Result<()> {
        self.gate()?;
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }

    async fn prayer_times(&self, _latitude: f64, _longitude: f64) -> Result<PrayerSchedule> {
        self.gate()?;
        Ok(self
            .schedule
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(PrayerSchedule::fallback))
    }

    async fn qibla_direction(&self, _latitude: f64, _longitude: f64) -> Result<QiblaDirection> {
        self.gate()?;
        Ok(QiblaDirection { bearing_deg: 151.5 })
    }

    async fn daily_quote(&self) -> Result<Quote> {
        self.gate()?;
        Ok(Quote {
            text: "Verily, with hardship comes ease.".to_string(),
            source: Some("Quran 94:6".to_string()),
        })
    }

    async fn list_duas(&self) -> Result<Vec<Dua>> {
        self.gate()?;
        Ok(self.duas.lock().unwrap().clone())
    }

    async fn create_dua(&self, dua: &NewDua) -> Result<Dua> {
        self.gate()?;
        let created = Dua {
            id: format!("dua-{}", self.duas.lock().unwrap().len() + 1),
            title: dua.title.clone(),
            arabic: dua.arabic.clone(),
            transliteration: dua.transliteration.clone(),
            translation: dua.translation.clone(),
            category: dua.category.clone(),
        };
        self.duas.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn delete_dua(&self, id: &str) -> Result<()> {
        self.gate()?;
        self.duas.lock().unwrap().retain(|d| d.id != id);
        Ok(())
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>> {
        self.gate()?;
        Ok(self.restaurants.lock().unwrap().clone())
    }

    async fn list_streams(&self) -> Result<Vec<Stream>> {
        self.gate()?;
        Ok(self.streams.lock().unwrap().clone())
    }

    async fn start_stream(&self, title: &str, category: &str) -> Result<Stream> {
        self.gate()?;
        Ok(Stream {
            id: format!("stream-{}", self.streams.lock().unwrap().len() + 1),
            title: title.to_string(),
            host: "me".to_string(),
            category: category.to_string(),
            status: barakah_core::stream::StreamStatus::Live,
            starts_at: Utc::now(),
            ends_at: None,
            views: 0,
            likes: 0,
        })
    }

    async fn end_stream(&self, _stream_id: &str) -> Result<()> {
        self.gate()
    }

    async fn like_stream(&self, stream_id: &str) -> Result<u64> {
        self.gate()?;
        let mut likes = self.likes.lock().unwrap();
        let count = likes.entry(stream_id.to_string()).or_insert(0);
        *count += 1;
        Ok(*count)
    }

    async fn comment_stream(&self, comment: &StreamComment) -> Result<()> {
        self.gate()?;
        self.comments.lock().unwrap().push(comment.clone());
        Ok(())
    }

    async fn analyze_message(&self, _request: &ChatAnalysisRequest) -> Result<ChatAnalysisResponse> {
        self.gate()?;
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| BarakahError::Backend {
                status: 503,
                message: "analysis unavailable".to_string(),
            })
    }

    async fn analyze_voice(
        &self,
        _audio: Vec<u8>,
        _mime_type: &str,
        _session_id: Option<&str>,
    ) -> Result<ChatAnalysisResponse> {
        self.gate()?;
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| BarakahError::Backend {
                status: 503,
                message: "analysis unavailable".to_string(),
            })
    }

    async fn fetch_analytics(&self) -> Result<AnalyticsSnapshot> {
        self.gate()?;
        Ok(self.analytics.lock().unwrap().clone())
    }
}
