pub mod image_client;
pub mod transport;

use crate::{
    config::{PixelLabConfig, RetryPolicy},
    error::Result,
};
use std::sync::Arc;

pub use image_client::{load_image_as_base64, save_image, ImageClient};
pub use transport::{ApiResponse, GenerationTransport, HttpTransport, TransportError};

/// Entry point to the PixelLab API.
pub struct PixelLabClient {
    image_client: ImageClient,
}

impl PixelLabClient {
    pub fn new(config: PixelLabConfig) -> Result<Self> {
        Self::with_retry_policy(config, RetryPolicy::default())
    }

    pub fn with_retry_policy(config: PixelLabConfig, retry: RetryPolicy) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(Self {
            image_client: ImageClient::new(transport).with_retry_policy(retry),
        })
    }

    /// Build a client over a custom transport. Used by tests and by callers
    /// that need to route requests through their own plumbing.
    pub fn with_transport(transport: Arc<dyn GenerationTransport>, retry: RetryPolicy) -> Self {
        Self {
            image_client: ImageClient::new(transport).with_retry_policy(retry),
        }
    }

    pub fn images(&self) -> &ImageClient {
        &self.image_client
    }
}
