use crate::{
    config::RetryPolicy,
    error::{Result, SpriteForgeError},
    models::{AnimateResponse, Generated, GenerationRequest, PixfluxResponse},
    pixellab::transport::GenerationTransport,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Response bodies attached to rejection errors are capped at this many
/// characters.
const BODY_SNIPPET_LIMIT: usize = 500;

pub struct ImageClient {
    transport: Arc<dyn GenerationTransport>,
    retry: RetryPolicy,
}

impl ImageClient {
    pub fn new(transport: Arc<dyn GenerationTransport>) -> Self {
        Self {
            transport,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Issue one generation request, retrying rate limits, server errors and
    /// connection failures with exponential backoff. Returns the decoded
    /// image buffers and the number of attempts taken; never partial data.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<Generated> {
        self.generate_with_deadline(request, None).await
    }

    /// Same as [`generate`](Self::generate), aborting instead of sleeping
    /// once `deadline` has passed.
    pub async fn generate_with_deadline(
        &self,
        request: &GenerationRequest,
        deadline: Option<Instant>,
    ) -> Result<Generated> {
        let endpoint = request.endpoint();
        let payload = build_payload(request);
        let mut last_error = String::new();

        for attempt in 1..=self.retry.max_attempts {
            match self.transport.post(endpoint, &payload).await {
                Ok(response) if (200..300).contains(&response.status) => {
                    let images = decode_images(request, &response.body)?;
                    return Ok(Generated { images, attempts: attempt });
                }
                Ok(response) if response.status == 429 || response.status >= 500 => {
                    last_error = format!("HTTP {} from {}", response.status, endpoint);
                    log::warn!(
                        "{} (attempt {}/{})",
                        last_error,
                        attempt,
                        self.retry.max_attempts
                    );
                }
                Ok(response) => {
                    return Err(SpriteForgeError::RequestRejected {
                        status: response.status,
                        body: truncate_body(&response.body),
                    });
                }
                Err(e) => {
                    last_error = e.to_string();
                    log::warn!(
                        "{} (attempt {}/{})",
                        last_error,
                        attempt,
                        self.retry.max_attempts
                    );
                }
            }

            if attempt < self.retry.max_attempts {
                if let Some(deadline) = deadline {
                    if Instant::now() >= deadline {
                        log::warn!("Deadline passed, giving up on {}", endpoint);
                        return Err(SpriteForgeError::RetriesExhausted { last_error });
                    }
                }

                let wait = self.retry.backoff_for(attempt);
                log::info!(
                    "Retrying {} in {:.1}s (attempt {}/{})",
                    endpoint,
                    wait.as_secs_f64(),
                    attempt + 1,
                    self.retry.max_attempts
                );
                tokio::time::sleep(wait).await;
            }
        }

        Err(SpriteForgeError::RetriesExhausted { last_error })
    }

    /// Generate and persist in one step. Returns the attempt count.
    pub async fn generate_to_file(
        &self,
        request: &GenerationRequest,
        path: &Path,
    ) -> Result<u32> {
        let generated = self.generate(request).await?;
        let attempts = generated.attempts;
        let bytes = generated.into_single().ok_or_else(|| {
            SpriteForgeError::DecodeError(
                "Expected a single image but the response carried several".into(),
            )
        })?;
        save_image(path, &bytes)?;
        Ok(attempts)
    }
}

fn build_payload(request: &GenerationRequest) -> Value {
    let mut payload = json!({
        "description": request.description,
        "image_size": {
            "width": request.size.width,
            "height": request.size.height,
        },
    });

    // The animation endpoint does not take the background flag.
    if request.animation.is_none() {
        payload["no_background"] = json!(request.style.no_background);
    }

    if let Some(view) = &request.style.view {
        payload["view"] = json!(view);
    }
    if let Some(outline) = &request.style.outline {
        payload["outline"] = json!(outline);
    }
    if let Some(shading) = &request.style.shading {
        payload["shading"] = json!(shading);
    }
    if let Some(seed) = request.style.seed {
        payload["seed"] = json!(seed);
    }

    if let Some(animation) = &request.animation {
        payload["action"] = json!(animation.action);
        payload["reference_image"] = json!(animation.reference_image);
        payload["n_frames"] = json!(animation.n_frames);
        payload["direction"] = json!(animation.direction);
        payload["text_guidance_scale"] = json!(6);
        payload["image_guidance_scale"] = json!(4.0);
    }

    payload
}

fn decode_images(request: &GenerationRequest, body: &str) -> Result<Vec<Vec<u8>>> {
    if request.animation.is_some() {
        let response: AnimateResponse = serde_json::from_str(body)
            .map_err(|e| SpriteForgeError::DecodeError(format!("Bad animation response: {}", e)))?;
        if response.images.is_empty() {
            return Err(SpriteForgeError::DecodeError(
                "Animation response contained no frames".into(),
            ));
        }
        response
            .images
            .iter()
            .map(|image| decode_base64(&image.base64))
            .collect()
    } else {
        let response: PixfluxResponse = serde_json::from_str(body)
            .map_err(|e| SpriteForgeError::DecodeError(format!("Bad image response: {}", e)))?;
        Ok(vec![decode_base64(&response.image.base64)?])
    }
}

fn decode_base64(data: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(data)
        .map_err(|e| SpriteForgeError::DecodeError(format!("Bad base64 image data: {}", e)))
}

fn truncate_body(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_LIMIT).collect()
}

/// Write decoded image bytes, creating missing parent directories.
pub fn save_image(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| SpriteForgeError::IoError {
            path: parent.to_path_buf(),
            reason: e.to_string(),
        })?;
    }
    std::fs::write(path, bytes).map_err(|e| SpriteForgeError::IoError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Read an image file back as the base64 string the animation endpoint
/// expects for reference images.
pub fn load_image_as_base64(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| SpriteForgeError::IoError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Base64Image;
    use crate::pixellab::transport::{ApiResponse, TransportError};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    struct MockTransport {
        responses: Mutex<VecDeque<std::result::Result<ApiResponse, TransportError>>>,
        calls: Mutex<u32>,
    }

    impl MockTransport {
        fn new(
            responses: Vec<std::result::Result<ApiResponse, TransportError>>,
        ) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(0),
            })
        }

        fn calls(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait::async_trait]
    impl GenerationTransport for MockTransport {
        async fn post(
            &self,
            _endpoint: &str,
            _payload: &Value,
        ) -> std::result::Result<ApiResponse, TransportError> {
            *self.calls.lock().unwrap() += 1;
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("mock transport ran out of scripted responses")
        }
    }

    fn ok_body(bytes: &[u8]) -> String {
        format!(r#"{{"image":{{"base64":"{}"}}}}"#, STANDARD.encode(bytes))
    }

    fn status(code: u16, body: &str) -> std::result::Result<ApiResponse, TransportError> {
        Ok(ApiResponse {
            status: code,
            body: body.to_string(),
        })
    }

    fn fast_retry() -> RetryPolicy {
        RetryPolicy::new().with_initial_backoff(Duration::from_millis(10))
    }

    fn image_request() -> GenerationRequest {
        GenerationRequest::image("pixel art test tile", 32, 32)
    }

    #[tokio::test]
    async fn test_success_round_trips_payload() {
        let raw = b"not-actually-a-png";
        let transport = MockTransport::new(vec![status(200, &ok_body(raw))]);
        let client = ImageClient::new(transport.clone());

        let generated = client.generate(&image_request()).await.unwrap();
        assert_eq!(generated.attempts, 1);
        assert_eq!(generated.images, vec![raw.to_vec()]);
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_rate_limit_retries_then_succeeds() {
        let transport = MockTransport::new(vec![
            status(429, "slow down"),
            status(429, "slow down"),
            status(429, "slow down"),
            status(200, &ok_body(b"frame")),
        ]);
        let client = ImageClient::new(transport.clone()).with_retry_policy(fast_retry());

        let started = Instant::now();
        let generated = client.generate(&image_request()).await.unwrap();
        let elapsed = started.elapsed();

        assert_eq!(generated.attempts, 4);
        assert_eq!(transport.calls(), 4);
        // Backoffs of 10ms, 20ms, 40ms.
        assert!(elapsed >= Duration::from_millis(70), "elapsed {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_client_error_fails_without_retry() {
        let transport = MockTransport::new(vec![status(400, "bad description")]);
        let client = ImageClient::new(transport.clone()).with_retry_policy(fast_retry());

        let err = client.generate(&image_request()).await.unwrap_err();
        match err {
            SpriteForgeError::RequestRejected { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, "bad description");
            }
            other => panic!("expected RequestRejected, got {:?}", other),
        }
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_rate_limit_exhausts_after_max_attempts() {
        let transport = MockTransport::new(vec![
            status(429, ""),
            status(429, ""),
            status(429, ""),
            status(429, ""),
        ]);
        let client = ImageClient::new(transport.clone()).with_retry_policy(fast_retry());

        let err = client.generate(&image_request()).await.unwrap_err();
        assert!(matches!(err, SpriteForgeError::RetriesExhausted { .. }));
        assert_eq!(transport.calls(), 4);
    }

    #[tokio::test]
    async fn test_server_error_and_connection_error_are_retryable() {
        let transport = MockTransport::new(vec![
            status(503, "maintenance"),
            Err(TransportError("connection reset".into())),
            status(200, &ok_body(b"ok")),
        ]);
        let client = ImageClient::new(transport.clone()).with_retry_policy(fast_retry());

        let generated = client.generate(&image_request()).await.unwrap();
        assert_eq!(generated.attempts, 3);
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test]
    async fn test_malformed_json_is_terminal() {
        let transport = MockTransport::new(vec![status(200, "{not json")]);
        let client = ImageClient::new(transport.clone()).with_retry_policy(fast_retry());

        let err = client.generate(&image_request()).await.unwrap_err();
        assert!(matches!(err, SpriteForgeError::DecodeError(_)));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_rejection_body_is_truncated() {
        let long_body = "x".repeat(2000);
        let transport = MockTransport::new(vec![status(422, &long_body)]);
        let client = ImageClient::new(transport.clone());

        match client.generate(&image_request()).await.unwrap_err() {
            SpriteForgeError::RequestRejected { body, .. } => {
                assert_eq!(body.len(), BODY_SNIPPET_LIMIT);
            }
            other => panic!("expected RequestRejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_deadline_aborts_before_retry_sleep() {
        let transport = MockTransport::new(vec![status(429, ""), status(429, "")]);
        let client = ImageClient::new(transport.clone()).with_retry_policy(
            RetryPolicy::new().with_initial_backoff(Duration::from_secs(60)),
        );

        let deadline = Instant::now() - Duration::from_millis(1);
        let started = Instant::now();
        let err = client
            .generate_with_deadline(&image_request(), Some(deadline))
            .await
            .unwrap_err();

        assert!(matches!(err, SpriteForgeError::RetriesExhausted { .. }));
        assert_eq!(transport.calls(), 1);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_animation_frames_decode_in_order() {
        let body = format!(
            r#"{{"images":[{{"base64":"{}"}},{{"base64":"{}"}}]}}"#,
            STANDARD.encode(b"frame-0"),
            STANDARD.encode(b"frame-1"),
        );
        let transport = MockTransport::new(vec![status(200, &body)]);
        let client = ImageClient::new(transport);

        let request = GenerationRequest::animation(
            "noir detective",
            "walking",
            Base64Image::png(STANDARD.encode(b"ref")),
            2,
        );
        let generated = client.generate(&request).await.unwrap();
        assert_eq!(generated.images.len(), 2);
        assert_eq!(generated.images[0], b"frame-0");
        assert_eq!(generated.images[1], b"frame-1");
    }

    #[tokio::test]
    async fn test_empty_animation_response_is_decode_error() {
        let transport = MockTransport::new(vec![status(200, r#"{"images":[]}"#)]);
        let client = ImageClient::new(transport);

        let request = GenerationRequest::animation(
            "noir detective",
            "walking",
            Base64Image::png(STANDARD.encode(b"ref")),
            2,
        );
        let err = client.generate(&request).await.unwrap_err();
        assert!(matches!(err, SpriteForgeError::DecodeError(_)));
    }

    #[test]
    fn test_save_image_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("characters/murdoch/base.png");

        save_image(&path, b"bytes").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"bytes");
    }

    #[test]
    fn test_payload_carries_style_and_animation_fields() {
        let request = GenerationRequest::image("tile", 32, 32).with_style(
            crate::models::StyleOptions::new()
                .with_no_background(true)
                .with_view("side")
                .with_seed(42),
        );
        let payload = build_payload(&request);
        assert_eq!(payload["no_background"], json!(true));
        assert_eq!(payload["view"], json!("side"));
        assert_eq!(payload["seed"], json!(42));
        assert!(payload.get("outline").is_none());
        assert!(payload.get("action").is_none());

        let animated = GenerationRequest::animation(
            "hero",
            "running",
            Base64Image::png("QUJD"),
            2,
        );
        let payload = build_payload(&animated);
        assert_eq!(payload["action"], json!("running"));
        assert_eq!(payload["n_frames"], json!(2));
        assert_eq!(payload["direction"], json!("east"));
        assert_eq!(payload["reference_image"]["type"], json!("base64"));
        assert!(payload.get("no_background").is_none());
    }
}
