use crate::{
    catalog::{self, CharacterSpec},
    config::{OutputConfig, PackConfig, PipelineConfig},
    models::{Base64Image, GenerationRequest, PackOutcome, RunReport, StyleOptions},
    pixellab::{load_image_as_base64, save_image, PixelLabClient},
    sheet::{stage_assets, SheetAssembler},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Batch driver over the asset catalog. One request in flight at a time,
/// with a politeness delay between consecutive calls; a failed entry is
/// recorded and the run moves on.
pub struct Pipeline {
    client: PixelLabClient,
    output: OutputConfig,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(client: PixelLabClient, output: OutputConfig, config: PipelineConfig) -> Self {
        Self {
            client,
            output,
            config,
        }
    }

    /// Run every generation phase and return the merged report.
    pub async fn run_all(&self) -> RunReport {
        let mut report = RunReport::new();
        report.merge(self.generate_characters().await);
        report.merge(self.generate_tiles().await);
        report.merge(self.generate_backgrounds().await);
        report.merge(self.generate_ui().await);
        report.merge(self.generate_effects().await);
        report.merge(self.generate_cutscenes().await);
        report
    }

    pub async fn generate_characters(&self) -> RunReport {
        log::info!("PHASE: character generation ({} characters)", catalog::CHARACTERS.len());
        let mut report = RunReport::new();

        let fallback = self.load_fallback_reference();

        for character in catalog::CHARACTERS {
            self.generate_character(character, fallback.as_deref(), &mut report)
                .await;
        }
        report
    }

    async fn generate_character(
        &self,
        character: &CharacterSpec,
        fallback: Option<&str>,
        report: &mut RunReport,
    ) {
        log::info!("--- Character: {} ---", character.name);
        let char_dir = self.output.characters_dir().join(character.name);

        // Base sprite first: it anchors every animation of this character.
        let base_request = GenerationRequest::image(character.description, 64, 64)
            .with_style(character_style());
        let base_name = format!("{}/base", character.name);

        let reference = match self.client.images().generate(&base_request).await {
            Ok(generated) => {
                report.count_api_calls(generated.attempts);
                match generated.into_single() {
                    Some(bytes) => match save_image(&char_dir.join("base.png"), &bytes) {
                        Ok(()) => {
                            report.record_ok(&base_name, char_dir.join("base.png").display().to_string());
                            Some(STANDARD.encode(&bytes))
                        }
                        Err(e) => {
                            report.record_fail(&base_name, e.to_string());
                            None
                        }
                    },
                    None => {
                        report.record_fail(&base_name, "unexpected multi-image response");
                        None
                    }
                }
            }
            Err(e) => {
                log::error!("{} base generation failed: {}", character.name, e);
                report.record_fail(&base_name, e.to_string());
                None
            }
        };
        self.pace().await;

        let reference = match reference.or_else(|| fallback.map(str::to_string)) {
            Some(reference) => reference,
            None => {
                log::warn!(
                    "{}: no base sprite and no fallback reference, skipping animations",
                    character.name
                );
                for animation in character.animations {
                    report.record_fail(
                        format!("{}/{}", character.name, animation.name),
                        "no reference image available",
                    );
                }
                return;
            }
        };

        for animation in character.animations {
            let label = format!("{}/{}", character.name, animation.name);
            let request = GenerationRequest::animation(
                character.description,
                animation.action,
                Base64Image::png(reference.clone()),
                animation.frames,
            )
            .with_style(StyleOptions::new().with_seed(42));

            match self.client.images().generate(&request).await {
                Ok(generated) => {
                    report.count_api_calls(generated.attempts);
                    let count = generated.images.len();
                    let mut saved = true;
                    for (index, frame) in generated.images.iter().enumerate() {
                        let path = char_dir.join(format!("{}_{:02}.png", animation.name, index));
                        if let Err(e) = save_image(&path, frame) {
                            report.record_fail(&label, e.to_string());
                            saved = false;
                            break;
                        }
                    }
                    if saved {
                        report.record_ok(&label, format!("{} frames", count));
                    }
                }
                Err(e) => {
                    log::error!("{} failed: {}", label, e);
                    report.record_fail(&label, e.to_string());
                }
            }
            self.pace().await;
        }
    }

    pub async fn generate_tiles(&self) -> RunReport {
        log::info!("PHASE: tile generation ({} tiles)", catalog::TILES.len());
        let mut report = RunReport::new();

        for tile in catalog::TILES {
            let request = GenerationRequest::image(tile.description, tile.width, tile.height)
                .with_style(
                    StyleOptions::new()
                        .with_no_background(tile.no_background)
                        .with_view("side")
                        .with_outline("single color black outline")
                        .with_shading("basic shading"),
                );
            let path = self.output.tiles_dir().join(format!("{}.png", tile.name));
            self.generate_single(&request, &path, &format!("tile/{}", tile.name), &mut report)
                .await;
        }
        report
    }

    pub async fn generate_backgrounds(&self) -> RunReport {
        log::info!(
            "PHASE: background generation ({} backgrounds)",
            catalog::BACKGROUNDS.len()
        );
        let mut report = RunReport::new();

        for background in catalog::BACKGROUNDS {
            let request = GenerationRequest::image(
                background.description,
                background.width,
                background.height,
            )
            .with_style(
                StyleOptions::new()
                    .with_view("side")
                    .with_shading("detailed shading"),
            );
            let path = self
                .output
                .backgrounds_dir()
                .join(format!("{}.png", background.name));
            self.generate_single(&request, &path, &format!("bg/{}", background.name), &mut report)
                .await;
        }
        report
    }

    pub async fn generate_ui(&self) -> RunReport {
        log::info!("PHASE: UI generation ({} elements)", catalog::UI_ELEMENTS.len());
        let mut report = RunReport::new();

        for ui in catalog::UI_ELEMENTS {
            let request = GenerationRequest::image(ui.description, ui.width, ui.height)
                .with_style(
                    StyleOptions::new()
                        .with_no_background(ui.no_background)
                        .with_shading("detailed shading"),
                );
            let path = self.output.ui_dir().join(format!("{}.png", ui.name));
            self.generate_single(&request, &path, &format!("ui/{}", ui.name), &mut report)
                .await;
        }
        report
    }

    pub async fn generate_effects(&self) -> RunReport {
        log::info!("PHASE: effect generation ({} effects)", catalog::EFFECTS.len());
        let mut report = RunReport::new();

        for effect in catalog::EFFECTS {
            let request = GenerationRequest::image(effect.description, effect.width, effect.height)
                .with_style(
                    StyleOptions::new()
                        .with_no_background(true)
                        .with_view("side")
                        .with_shading("basic shading"),
                );
            let path = self.output.effects_dir().join(format!("{}.png", effect.name));
            self.generate_single(&request, &path, &format!("fx/{}", effect.name), &mut report)
                .await;
        }
        report
    }

    pub async fn generate_cutscenes(&self) -> RunReport {
        log::info!(
            "PHASE: cutscene generation ({} illustrations)",
            catalog::CUTSCENES.len()
        );
        let mut report = RunReport::new();

        for cutscene in catalog::CUTSCENES {
            let request = GenerationRequest::image(cutscene.description, 400, 225)
                .with_style(StyleOptions::new().with_shading("detailed shading"));
            let path = self.output.cutscenes_dir().join(cutscene.filename);
            self.generate_single(&request, &path, cutscene.filename, &mut report)
                .await;
        }
        report
    }

    async fn generate_single(
        &self,
        request: &GenerationRequest,
        path: &std::path::Path,
        name: &str,
        report: &mut RunReport,
    ) {
        log::info!(
            "Generating {} ({}x{})",
            name,
            request.size.width,
            request.size.height
        );
        match self.client.images().generate_to_file(request, path).await {
            Ok(attempts) => {
                report.count_api_calls(attempts);
                report.record_ok(name, path.display().to_string());
            }
            Err(e) => {
                log::error!("{} failed: {}", name, e);
                report.record_fail(name, e.to_string());
            }
        }
        self.pace().await;
    }

    fn load_fallback_reference(&self) -> Option<String> {
        let path = self.config.reference_image.as_ref()?;
        match load_image_as_base64(path) {
            Ok(b64) => {
                log::info!("Loaded fallback reference image from {}", path.display());
                Some(b64)
            }
            Err(e) => {
                log::warn!("Could not load fallback reference image: {}", e);
                None
            }
        }
    }

    async fn pace(&self) {
        if !self.config.api_delay.is_zero() {
            tokio::time::sleep(self.config.api_delay).await;
        }
    }
}

fn character_style() -> StyleOptions {
    StyleOptions::new()
        .with_no_background(true)
        .with_view("side")
        .with_outline("single color black outline")
        .with_shading("basic shading")
        .with_seed(42)
}

/// Pack one sheet per catalog character, then stage tiles, backgrounds, UI
/// and effects into the asset tree.
pub fn pack_all(output: &OutputConfig, pack_config: PackConfig) -> RunReport {
    let mut report = RunReport::new();
    let assembler = SheetAssembler::new(output.characters_dir(), output.sheets_out())
        .with_pack_config(pack_config);

    for character in catalog::CHARACTERS {
        let tracks = character.sheet_tracks();
        match assembler.pack(character.name, &tracks) {
            Ok(PackOutcome::Packed(summary)) => {
                let mut detail = format!("{} frames, {} rows", summary.total_frames, summary.rows);
                if summary.skipped_frames > 0 {
                    detail.push_str(&format!(", {} degraded frames skipped", summary.skipped_frames));
                }
                report.record_ok(character.name, detail);
            }
            Ok(PackOutcome::Skipped { reason, .. }) => {
                log::warn!("{}: {}", character.name, reason);
                report.record_fail(character.name, reason);
            }
            Err(e) => {
                log::error!("{}: packing failed: {}", character.name, e);
                report.record_fail(character.name, e.to_string());
            }
        }
    }

    match stage_assets(output) {
        Ok(staged) => report.record_ok(
            "staging",
            format!(
                "{} tiles, {} backgrounds, {} ui, {} effects",
                staged.tiles, staged.backgrounds, staged.ui, staged.effects
            ),
        ),
        Err(e) => report.record_fail("staging", e.to_string()),
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryPolicy;
    use crate::pixellab::{ApiResponse, GenerationTransport, TransportError};
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde_json::Value;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tempfile::TempDir;

    struct CannedTransport {
        body: String,
        calls: Mutex<u32>,
    }

    #[async_trait::async_trait]
    impl GenerationTransport for CannedTransport {
        async fn post(
            &self,
            _endpoint: &str,
            _payload: &Value,
        ) -> std::result::Result<ApiResponse, TransportError> {
            *self.calls.lock().unwrap() += 1;
            Ok(ApiResponse {
                status: 200,
                body: self.body.clone(),
            })
        }
    }

    fn test_pipeline(dir: &TempDir, transport: Arc<CannedTransport>) -> Pipeline {
        let client = PixelLabClient::with_transport(transport, RetryPolicy::default());
        let output = OutputConfig::new()
            .with_generated_dir(dir.path().join("generated"))
            .with_asset_dir(dir.path().join("assets"));
        Pipeline::new(
            client,
            output,
            PipelineConfig::new().with_api_delay(Duration::ZERO),
        )
    }

    #[tokio::test]
    async fn test_ui_phase_writes_files_and_reports() {
        let dir = TempDir::new().unwrap();
        let transport = Arc::new(CannedTransport {
            body: format!(
                r#"{{"image":{{"base64":"{}"}}}}"#,
                STANDARD.encode(b"ui-bytes")
            ),
            calls: Mutex::new(0),
        });
        let pipeline = test_pipeline(&dir, transport.clone());

        let report = pipeline.generate_ui().await;
        assert_eq!(report.success_count(), catalog::UI_ELEMENTS.len());
        assert_eq!(report.failure_count(), 0);
        assert_eq!(*transport.calls.lock().unwrap(), catalog::UI_ELEMENTS.len() as u32);
        assert!(dir
            .path()
            .join("generated/ui/menu_background.png")
            .exists());
    }

    #[tokio::test]
    async fn test_failed_item_does_not_stop_the_phase() {
        let dir = TempDir::new().unwrap();
        // Not JSON: every item fails with a decode error, yet all entries run.
        let transport = Arc::new(CannedTransport {
            body: "oops".to_string(),
            calls: Mutex::new(0),
        });
        let pipeline = test_pipeline(&dir, transport.clone());

        let report = pipeline.generate_effects().await;
        assert_eq!(report.failure_count(), catalog::EFFECTS.len());
        assert_eq!(*transport.calls.lock().unwrap(), catalog::EFFECTS.len() as u32);
    }

    #[test]
    fn test_pack_all_reports_per_character() {
        let dir = TempDir::new().unwrap();
        let output = OutputConfig::new()
            .with_generated_dir(dir.path().join("generated"))
            .with_asset_dir(dir.path().join("assets"));

        // Frames for one character only.
        let murdoch = output.characters_dir().join("murdoch");
        std::fs::create_dir_all(&murdoch).unwrap();
        for frame in ["idle_00.png", "idle_01.png"] {
            image::RgbaImage::new(64, 64)
                .save(murdoch.join(frame))
                .unwrap();
        }

        let report = pack_all(&output, PackConfig::default());
        // murdoch packs, staging succeeds, the other five characters skip.
        assert_eq!(report.success_count(), 2);
        assert_eq!(report.failure_count(), catalog::CHARACTERS.len() - 1);
        assert!(output.sheets_out().join("murdoch_sheet.png").exists());
        assert!(output.sheets_out().join("murdoch_sheet.json").exists());
    }
}
