use crate::{
    config::PixelLabConfig,
    error::{Result, SpriteForgeError},
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::fmt;

/// Raw endpoint response before classification. Any HTTP status lands here;
/// only connection-level failures surface as [`TransportError`].
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// Connection-level failure: timeout, DNS, reset. Always retryable.
#[derive(Debug, Clone)]
pub struct TransportError(pub String);

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Connection error: {}", self.0)
    }
}

impl std::error::Error for TransportError {}

/// Seam between the retry loop and the wire, so tests can script
/// status/body sequences without a network.
#[async_trait]
pub trait GenerationTransport: Send + Sync {
    async fn post(
        &self,
        endpoint: &str,
        payload: &Value,
    ) -> std::result::Result<ApiResponse, TransportError>;
}

pub struct HttpTransport {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(config: &PixelLabConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            SpriteForgeError::ConfigError(
                "PixelLab API key is required (set PIXELLAB_API_KEY)".into(),
            )
        })?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                SpriteForgeError::ConfigError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key,
        })
    }

    fn build_headers(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            format!("Bearer {}", self.api_key).parse().unwrap(),
        );
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            "application/json".parse().unwrap(),
        );
        headers
    }
}

#[async_trait]
impl GenerationTransport for HttpTransport {
    async fn post(
        &self,
        endpoint: &str,
        payload: &Value,
    ) -> std::result::Result<ApiResponse, TransportError> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, endpoint))
            .headers(self.build_headers())
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(ApiResponse { status, body })
    }
}
