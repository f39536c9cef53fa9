use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct PixelLabConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub request_timeout: Duration,
}

impl Default for PixelLabConfig {
    fn default() -> Self {
        PixelLabConfig {
            base_url: "https://api.pixellab.ai/v2".to_string(),
            api_key: None,
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl PixelLabConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let base_url = env::var("PIXELLAB_BASE_URL")
            .unwrap_or_else(|_| "https://api.pixellab.ai/v2".to_string());
        let api_key = env::var("PIXELLAB_API_KEY").ok();

        PixelLabConfig {
            base_url,
            api_key,
            request_timeout: Duration::from_secs(120),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 4,
            initial_backoff: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    /// Backoff inserted after a failed attempt, attempts numbered from 1.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.initial_backoff * 2u32.pow(attempt.saturating_sub(1))
    }
}

#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub generated_dir: PathBuf,
    pub asset_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            generated_dir: PathBuf::from("sprites/generated"),
            asset_dir: PathBuf::from("assets"),
        }
    }
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_generated_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.generated_dir = dir.into();
        self
    }

    pub fn with_asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = dir.into();
        self
    }

    pub fn characters_dir(&self) -> PathBuf {
        self.generated_dir.join("characters")
    }

    pub fn tiles_dir(&self) -> PathBuf {
        self.generated_dir.join("tiles")
    }

    pub fn backgrounds_dir(&self) -> PathBuf {
        self.generated_dir.join("backgrounds")
    }

    pub fn ui_dir(&self) -> PathBuf {
        self.generated_dir.join("ui")
    }

    pub fn effects_dir(&self) -> PathBuf {
        self.generated_dir.join("effects")
    }

    pub fn cutscenes_dir(&self) -> PathBuf {
        self.asset_dir.join("cutscenes")
    }

    pub fn sheets_out(&self) -> PathBuf {
        self.asset_dir.join("sprites")
    }

    pub fn tiles_out(&self) -> PathBuf {
        self.asset_dir.join("tiles")
    }

    pub fn backgrounds_out(&self) -> PathBuf {
        self.asset_dir.join("backgrounds")
    }

    pub fn ui_out(&self) -> PathBuf {
        self.asset_dir.join("ui")
    }

    pub fn effects_out(&self) -> PathBuf {
        self.asset_dir.join("effects")
    }
}

#[derive(Debug, Clone)]
pub struct PackConfig {
    pub frame_width: u32,
    pub frame_height: u32,
    /// Frames kept per animation. Later frames from the animation endpoint
    /// degrade, so only the first two are trusted.
    pub frame_cap: usize,
}

impl Default for PackConfig {
    fn default() -> Self {
        PackConfig {
            frame_width: 64,
            frame_height: 64,
            frame_cap: 2,
        }
    }
}

impl PackConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frame_size(mut self, width: u32, height: u32) -> Self {
        self.frame_width = width;
        self.frame_height = height;
        self
    }

    pub fn with_frame_cap(mut self, cap: usize) -> Self {
        self.frame_cap = cap.max(1);
        self
    }

    pub fn columns(&self) -> u32 {
        self.frame_cap as u32
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Politeness interval between consecutive API calls.
    pub api_delay: Duration,
    pub reference_image: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            api_delay: Duration::from_secs(1),
            reference_image: None,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_delay(mut self, delay: Duration) -> Self {
        self.api_delay = delay;
        self
    }

    pub fn with_reference_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.reference_image = Some(path.into());
        self
    }
}
