//! Backend API trait.
//!
//! Defines the full remote surface the stores depend on, decoupled from the
//! HTTP implementation so tests can substitute an in-memory fake.

use crate::analytics::AnalyticsSnapshot;
use crate::chat::{ChatAnalysisRequest, ChatAnalysisResponse};
use crate::content::{Dua, NewDua, Quote};
use crate::error::Result;
use crate::prayer::{PrayerSchedule, QiblaDirection};
use crate::product::{Product, ProductReport};
use crate::restaurant::Restaurant;
use crate::stream::{Stream, StreamComment};
use crate::user::{AuthProvider, AuthSession, LoginRequest, SignupRequest};
use async_trait::async_trait;

/// The remote backend consumed by the stores.
///
/// Every call is a single attempt: there is no retry policy, and any failure
/// is terminal for that attempt. Implementations attach the bearer token
/// themselves; callers never handle credentials.
#[async_trait]
pub trait BackendApi: Send + Sync {
    // --- authentication ---

    async fn login(&self, request: &LoginRequest) -> Result<AuthSession>;

    async fn signup(&self, request: &SignupRequest) -> Result<AuthSession>;

    async fn login_with_provider(&self, provider: AuthProvider) -> Result<AuthSession>;

    // --- products ---

    /// Resolves a barcode against the remote catalog.
    ///
    /// `Ok(None)` means the backend was reachable but does not know the
    /// barcode; transport failures come back as errors so the caller can
    /// choose a fallback path.
    async fn lookup_product(&self, barcode: &str) -> Result<Option<Product>>;

    async fn report_product(&self, report: &ProductReport) -> Result<()>;

    // --- prayer and devotional content ---

    async fn prayer_times(&self, latitude: f64, longitude: f64) -> Result<PrayerSchedule>;

    async fn qibla_direction(&self, latitude: f64, longitude: f64) -> Result<QiblaDirection>;

    async fn daily_quote(&self) -> Result<Quote>;

    async fn list_duas(&self) -> Result<Vec<Dua>>;

    async fn create_dua(&self, dua: &NewDua) -> Result<Dua>;

    async fn delete_dua(&self, id: &str) -> Result<()>;

    // --- restaurants ---

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>>;

    // --- streams ---

    async fn list_streams(&self) -> Result<Vec<Stream>>;

    async fn start_stream(&self, title: &str, category: &str) -> Result<Stream>;

    async fn end_stream(&self, stream_id: &str) -> Result<()>;

    /// Likes a stream and returns the new like count.
    async fn like_stream(&self, stream_id: &str) -> Result<u64>;

    async fn comment_stream(&self, comment: &StreamComment) -> Result<()>;

    // --- chat ---

    async fn analyze_message(&self, request: &ChatAnalysisRequest) -> Result<ChatAnalysisResponse>;

    /// Uploads a voice clip for analysis (multipart form data).
    async fn analyze_voice(
        &self,
        audio: Vec<u8>,
        mime_type: &str,
        session_id: Option<&str>,
    ) -> Result<ChatAnalysisResponse>;

    // --- analytics ---

    async fn fetch_analytics(&self) -> Result<AnalyticsSnapshot>;
}
