use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Style knobs forwarded to the generation endpoint. Absent fields are left
/// out of the payload entirely so the endpoint applies its own defaults.
#[derive(Debug, Clone, Default)]
pub struct StyleOptions {
    pub no_background: bool,
    pub view: Option<String>,
    pub outline: Option<String>,
    pub shading: Option<String>,
    pub seed: Option<u32>,
}

impl StyleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_no_background(mut self, no_background: bool) -> Self {
        self.no_background = no_background;
        self
    }

    pub fn with_view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn with_outline(mut self, outline: impl Into<String>) -> Self {
        self.outline = Some(outline.into());
        self
    }

    pub fn with_shading(mut self, shading: impl Into<String>) -> Self {
        self.shading = Some(shading.into());
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Inline base64 image object the animation endpoint expects for
/// `reference_image`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Base64Image {
    #[serde(rename = "type")]
    pub kind: String,
    pub base64: String,
    pub format: String,
}

impl Base64Image {
    pub fn png(base64: impl Into<String>) -> Self {
        Self {
            kind: "base64".to_string(),
            base64: base64.into(),
            format: "png".to_string(),
        }
    }
}

/// Extra parameters for animation-frame generation. The reference image
/// keeps the animated character consistent with its base sprite.
#[derive(Debug, Clone)]
pub struct AnimationParams {
    pub action: String,
    pub reference_image: Base64Image,
    pub n_frames: u32,
    pub direction: String,
}

/// One unit of generation work. Immutable once issued.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub description: String,
    pub size: ImageSize,
    pub style: StyleOptions,
    pub animation: Option<AnimationParams>,
}

impl GenerationRequest {
    pub fn image(description: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            description: description.into(),
            size: ImageSize::new(width, height),
            style: StyleOptions::default(),
            animation: None,
        }
    }

    pub fn animation(
        description: impl Into<String>,
        action: impl Into<String>,
        reference_image: Base64Image,
        n_frames: u32,
    ) -> Self {
        Self {
            description: description.into(),
            size: ImageSize::new(64, 64),
            style: StyleOptions::default(),
            animation: Some(AnimationParams {
                action: action.into(),
                reference_image,
                n_frames,
                direction: "east".to_string(),
            }),
        }
    }

    pub fn with_style(mut self, style: StyleOptions) -> Self {
        self.style = style;
        self
    }

    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        if let Some(params) = self.animation.as_mut() {
            params.direction = direction.into();
        }
        self
    }

    pub fn endpoint(&self) -> &'static str {
        if self.animation.is_some() {
            "animate-with-text"
        } else {
            "create-image-pixflux"
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ImagePayload {
    pub base64: String,
}

/// Response envelope of `create-image-pixflux`.
#[derive(Debug, Deserialize)]
pub struct PixfluxResponse {
    pub image: ImagePayload,
}

/// Response envelope of `animate-with-text`. Frame order is the playback
/// order.
#[derive(Debug, Deserialize)]
pub struct AnimateResponse {
    pub images: Vec<ImagePayload>,
}

/// Decoded generation output plus the number of attempts the call took.
#[derive(Debug)]
pub struct Generated {
    pub images: Vec<Vec<u8>>,
    pub attempts: u32,
}

impl Generated {
    /// The single image of a pixflux response.
    pub fn into_single(mut self) -> Option<Vec<u8>> {
        if self.images.len() == 1 {
            self.images.pop()
        } else {
            None
        }
    }
}
