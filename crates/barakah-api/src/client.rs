//! HTTP implementation of the backend API.
//!
//! One configured `reqwest::Client` for the whole app: fixed base URL, a
//! 30-second total-request ceiling from the client config, and bearer-token
//! injection read from the secure token store on every request. There is no
//! retry policy; every failure is terminal for that attempt.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use barakah_core::analytics::AnalyticsSnapshot;
use barakah_core::api::BackendApi;
use barakah_core::chat::{ChatAnalysisRequest, ChatAnalysisResponse};
use barakah_core::config::ClientConfig;
use barakah_core::content::{Dua, NewDua, Quote};
use barakah_core::error::{BarakahError, Result};
use barakah_core::prayer::{PrayerSchedule, QiblaDirection};
use barakah_core::product::{Product, ProductReport};
use barakah_core::restaurant::Restaurant;
use barakah_core::storage::SecureTokenStore;
use barakah_core::stream::{Stream, StreamComment};
use barakah_core::user::{AuthProvider, AuthSession, LoginRequest, SignupRequest};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::dto::{ErrorBody, LikeResponse, SocialLoginRequest, StartStreamRequest};

/// The single configured HTTP backend client.
pub struct HttpBackend {
    client: Client,
    base_url: String,
    tokens: Arc<dyn SecureTokenStore>,
}

impl HttpBackend {
    /// Creates a client from the loaded configuration.
    pub fn new(config: &ClientConfig, tokens: Arc<dyn SecureTokenStore>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| BarakahError::config(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attaches `Authorization: Bearer <token>` when a token is stored.
    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn transport_error(err: reqwest::Error) -> BarakahError {
        if err.is_timeout() {
            BarakahError::timeout(err.to_string())
        } else {
            BarakahError::network(err.to_string())
        }
    }

    /// Sends a request and maps non-success statuses to a typed error.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self
            .authorize(request)
            .await
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unexpected backend response")
                .to_string(),
        };
        tracing::warn!("backend returned {status}: {message}");
        Err(BarakahError::Backend {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(self.client.get(self.url(path))).await?;
        response.json().await.map_err(Self::transport_error)
    }

    async fn post_json<B: serde::Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .send(self.client.post(self.url(path)).json(body))
            .await?;
        response.json().await.map_err(Self::transport_error)
    }

    async fn post_json_unit<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<()> {
        self.send(self.client.post(self.url(path)).json(body))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn login(&self, request: &LoginRequest) -> Result<AuthSession> {
        self.post_json("auth/login", request).await
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthSession> {
        self.post_json("auth/signup", request).await
    }

    async fn login_with_provider(&self, provider: AuthProvider) -> Result<AuthSession> {
        self.post_json("auth/social", &SocialLoginRequest { provider })
            .await
    }

    async fn lookup_product(&self, barcode: &str) -> Result<Option<Product>> {
        let result = self
            .send(self.client.get(self.url(&format!("products/{barcode}"))))
            .await;
        match result {
            Ok(response) => {
                let product: Product = response.json().await.map_err(Self::transport_error)?;
                Ok(Some(product.normalized()))
            }
            // A reachable backend that does not know the barcode.
            Err(BarakahError::Backend { status, .. }) if status == StatusCode::NOT_FOUND => {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    async fn report_product(&self, report: &ProductReport) -> Result<()> {
        self.post_json_unit("products/report", report).await
    }

    async fn prayer_times(&self, latitude: f64, longitude: f64) -> Result<PrayerSchedule> {
        self.get_json(&format!("prayer-times?lat={latitude}&lng={longitude}"))
            .await
    }

    async fn qibla_direction(&self, latitude: f64, longitude: f64) -> Result<QiblaDirection> {
        self.get_json(&format!("qibla?lat={latitude}&lng={longitude}"))
            .await
    }

    async fn daily_quote(&self) -> Result<Quote> {
        self.get_json("quotes/daily").await
    }

    async fn list_duas(&self) -> Result<Vec<Dua>> {
        self.get_json("duas").await
    }

    async fn create_dua(&self, dua: &NewDua) -> Result<Dua> {
        self.post_json("duas", dua).await
    }

    async fn delete_dua(&self, id: &str) -> Result<()> {
        self.send(self.client.delete(self.url(&format!("duas/{id}"))))
            .await?;
        Ok(())
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>> {
        self.get_json("restaurants").await
    }

    async fn list_streams(&self) -> Result<Vec<Stream>> {
        self.get_json("streams").await
    }

    async fn start_stream(&self, title: &str, category: &str) -> Result<Stream> {
        self.post_json("streams", &StartStreamRequest { title, category })
            .await
    }

    async fn end_stream(&self, stream_id: &str) -> Result<()> {
        self.send(self.client.post(self.url(&format!("streams/{stream_id}/end"))))
            .await?;
        Ok(())
    }

    async fn like_stream(&self, stream_id: &str) -> Result<u64> {
        let response = self
            .send(self.client.post(self.url(&format!("streams/{stream_id}/like"))))
            .await?;
        let body: LikeResponse = response.json().await.map_err(Self::transport_error)?;
        Ok(body.likes)
    }

    async fn comment_stream(&self, comment: &StreamComment) -> Result<()> {
        self.post_json_unit(
            &format!("streams/{}/comments", comment.stream_id),
            comment,
        )
        .await
    }

    async fn analyze_message(&self, request: &ChatAnalysisRequest) -> Result<ChatAnalysisResponse> {
        self.post_json("chat/analyze", request).await
    }

    async fn analyze_voice(
        &self,
        audio: Vec<u8>,
        mime_type: &str,
        session_id: Option<&str>,
    ) -> Result<ChatAnalysisResponse> {
        let part = Part::bytes(audio)
            .file_name("voice")
            .mime_str(mime_type)
            .map_err(|err| BarakahError::internal(format!("invalid mime type: {err}")))?;
        let mut form = Form::new().part("audio", part);
        if let Some(session_id) = session_id {
            form = form.text("session_id", session_id.to_string());
        }

        let response = self
            .send(self.client.post(self.url("chat/analyze-voice")).multipart(form))
            .await?;
        response.json().await.map_err(Self::transport_error)
    }

    async fn fetch_analytics(&self) -> Result<AnalyticsSnapshot> {
        self.get_json("analytics").await
    }
}
