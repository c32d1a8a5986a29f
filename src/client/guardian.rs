//! Guardian API client implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::models::{FirewallState, GuideContent, NotificationRecord, ReportContent};
use super::GuardianApi;
use crate::error::{ApiError, Result};

/// Rate limit: 300 requests per minute (5 per second)
const RATE_LIMIT_PER_SECOND: u32 = 5;

/// Standard response envelope for every Guardian endpoint
///
/// `data` and `error` are plain `Option` fields so missing keys
/// deserialize as `None` without a `T: Default` bound.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

/// Guardian API client
pub struct GuardianClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl GuardianClient {
    /// Create a new Guardian API client
    pub fn new(base_url: String, api_key: String) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota = Quota::per_second(
            std::num::NonZeroU32::new(RATE_LIMIT_PER_SECOND)
                .ok_or_else(|| ApiError::Network("invalid rate limit quota".to_string()))?,
        );
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            rate_limiter,
        })
    }

    /// GET an endpoint and unwrap its envelope
    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let envelope: Envelope<T> = self.get_envelope(path).await?;
        Self::unwrap_envelope(envelope, path)
    }

    async fn get_envelope<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let envelope = response.json::<Envelope<T>>().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
                })?;
                Ok(envelope)
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden.into()),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(path.to_string()).into()),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                Err(ApiError::RateLimit(Duration::from_secs(retry_after)).into())
            }
            s if s.is_client_error() => {
                let msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Bad request".to_string());
                Err(ApiError::BadRequest(msg).into())
            }
            s => {
                let msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("HTTP {}", s));
                Err(ApiError::ServerError(msg).into())
            }
        }
    }

    /// A well-formed `success: false` response is a logical failure with the
    /// server's message, never usable data.
    fn unwrap_envelope<T>(envelope: Envelope<T>, path: &str) -> Result<T> {
        if !envelope.success {
            let msg = envelope
                .error
                .unwrap_or_else(|| format!("{} returned success=false with no error", path));
            return Err(ApiError::Backend(msg).into());
        }
        envelope.data.ok_or_else(|| {
            ApiError::InvalidResponse(format!("{} returned success=true with no data", path)).into()
        })
    }
}

#[async_trait]
impl GuardianApi for GuardianClient {
    async fn fetch_guide(&self) -> Result<GuideContent> {
        self.get_data("/api/v1/content/guide").await
    }

    async fn fetch_report(&self) -> Result<ReportContent> {
        self.get_data("/api/v1/content/report").await
    }

    async fn fetch_firewall(&self) -> Result<FirewallState> {
        // Firewall payload shape varies by backend version; normalize it
        let value: serde_json::Value = self.get_data("/api/v1/firewall").await?;
        FirewallState::from_value(value)
            .map_err(|e| ApiError::InvalidResponse(format!("firewall state: {}", e)).into())
    }

    async fn list_notifications(&self) -> Result<Vec<NotificationRecord>> {
        self.get_data("/api/v1/notifications").await
    }
}
