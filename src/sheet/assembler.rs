use crate::{
    config::PackConfig,
    error::{Result, SpriteForgeError},
    models::{AnimationEntry, PackOutcome, PackSummary, SheetMetadata},
};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::fs;
use std::path::{Path, PathBuf};

/// Packs per-animation frame files into one sheet per character.
///
/// Frames live under `<characters_dir>/<character>/`; the sheet PNG and its
/// JSON sidecar are written to `<output_dir>/<character>_sheet.{png,json}`.
pub struct SheetAssembler {
    config: PackConfig,
    characters_dir: PathBuf,
    output_dir: PathBuf,
}

impl SheetAssembler {
    pub fn new(characters_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            config: PackConfig::default(),
            characters_dir: characters_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn with_pack_config(mut self, config: PackConfig) -> Self {
        self.config = config;
        self
    }

    /// Pack one character. Tracks that yield no frames are dropped from the
    /// sheet (rows stay dense); if every track is empty the character is
    /// skipped and nothing is written.
    pub fn pack(&self, character: &str, tracks: &[(String, u32)]) -> Result<PackOutcome> {
        let char_dir = self.characters_dir.join(character);
        if !char_dir.is_dir() {
            return Ok(PackOutcome::Skipped {
                character: character.to_string(),
                reason: format!("directory {} not found", char_dir.display()),
            });
        }

        let frame_w = self.config.frame_width;
        let frame_h = self.config.frame_height;
        let columns = self.config.columns();

        let mut anim_data: Vec<(String, u32, Vec<RgbaImage>)> = Vec::new();
        let mut skipped_frames = 0u32;
        let mut skipped_tracks = Vec::new();

        for (track, frame_rate) in tracks {
            let frame_paths = find_track_frames(&char_dir, character, track)?;
            if frame_paths.is_empty() {
                log::warn!("{}: no frames for {}, dropping track", character, track);
                skipped_tracks.push(track.clone());
                continue;
            }

            let good_paths = &frame_paths[..frame_paths.len().min(self.config.frame_cap)];
            skipped_frames += (frame_paths.len() - good_paths.len()) as u32;

            let mut frames = Vec::with_capacity(good_paths.len());
            for path in good_paths {
                frames.push(load_frame(path, frame_w, frame_h)?);
            }

            // A lone frame still fills the full row.
            if frames.len() == 1 {
                while frames.len() < self.config.frame_cap {
                    frames.push(frames[0].clone());
                }
            }

            log::info!("{}: {} uses {} frames", character, track, frames.len());
            anim_data.push((track.clone(), *frame_rate, frames));
        }

        if anim_data.is_empty() {
            return Ok(PackOutcome::Skipped {
                character: character.to_string(),
                reason: "no animation frames found for any track".to_string(),
            });
        }

        let rows = anim_data.len() as u32;
        let mut sheet = RgbaImage::new(columns * frame_w, rows * frame_h);

        let mut frame_index = 0u32;
        let mut animations = Vec::with_capacity(anim_data.len());

        for (row, (name, frame_rate, frames)) in anim_data.iter().enumerate() {
            let start_frame = frame_index;
            for (col, frame) in frames.iter().enumerate() {
                let x = col as u32 * frame_w;
                let y = row as u32 * frame_h;
                imageops::replace(&mut sheet, frame, i64::from(x), i64::from(y));
                frame_index += 1;
            }

            animations.push(AnimationEntry {
                name: name.clone(),
                row: row as u32,
                start_frame,
                end_frame: frame_index - 1,
                frame_count: frames.len() as u32,
                frame_rate: *frame_rate,
            });
        }

        let total_frames = frame_index;
        let metadata = SheetMetadata {
            frame_width: frame_w,
            frame_height: frame_h,
            columns,
            rows,
            total_frames,
            animations,
        };

        fs::create_dir_all(&self.output_dir).map_err(|e| SpriteForgeError::IoError {
            path: self.output_dir.clone(),
            reason: e.to_string(),
        })?;

        let sheet_path = self.output_dir.join(format!("{}_sheet.png", character));
        sheet.save(&sheet_path).map_err(|e| SpriteForgeError::IoError {
            path: sheet_path.clone(),
            reason: e.to_string(),
        })?;

        let metadata_path = self.output_dir.join(format!("{}_sheet.json", character));
        let json = serde_json::to_string_pretty(&metadata)
            .map_err(|e| SpriteForgeError::PackError(format!("Bad metadata: {}", e)))?;
        fs::write(&metadata_path, json).map_err(|e| SpriteForgeError::IoError {
            path: metadata_path.clone(),
            reason: e.to_string(),
        })?;

        log::info!(
            "{}: saved {} ({} frames, {}x{} grid)",
            character,
            sheet_path.display(),
            total_frames,
            columns,
            rows
        );

        Ok(PackOutcome::Packed(PackSummary {
            character: character.to_string(),
            sheet_path,
            metadata_path,
            rows,
            total_frames,
            skipped_frames,
            skipped_tracks,
        }))
    }
}

/// Locate frame files for a track. Patterns are tried in order and the first
/// one that matches wins; results are never merged across patterns:
///   1. `<track>_<NN>.png`
///   2. `<character>_<track>_<NN>.png`
///   3. a single `<track>.png`
fn find_track_frames(char_dir: &Path, character: &str, track: &str) -> Result<Vec<PathBuf>> {
    let mut names: Vec<String> = Vec::new();
    let entries = fs::read_dir(char_dir).map_err(|e| SpriteForgeError::IoError {
        path: char_dir.to_path_buf(),
        reason: e.to_string(),
    })?;
    for entry in entries {
        let entry = entry.map_err(|e| SpriteForgeError::IoError {
            path: char_dir.to_path_buf(),
            reason: e.to_string(),
        })?;
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }

    for prefix in [
        format!("{}_", track),
        format!("{}_{}_", character, track),
    ] {
        let mut matched: Vec<&String> = names
            .iter()
            .filter(|n| n.starts_with(&prefix) && n.ends_with(".png"))
            .collect();
        if !matched.is_empty() {
            matched.sort();
            return Ok(matched.into_iter().map(|n| char_dir.join(n)).collect());
        }
    }

    let single = char_dir.join(format!("{}.png", track));
    if single.is_file() {
        return Ok(vec![single]);
    }

    Ok(Vec::new())
}

/// Decode a frame, normalizing to the fixed cell size by nearest-neighbor
/// resampling when the native size differs. Never crops.
fn load_frame(path: &Path, frame_w: u32, frame_h: u32) -> Result<RgbaImage> {
    let img = image::open(path)
        .map_err(|e| {
            SpriteForgeError::PackError(format!("Cannot read frame {}: {}", path.display(), e))
        })?
        .to_rgba8();

    if img.dimensions() != (frame_w, frame_h) {
        Ok(imageops::resize(&img, frame_w, frame_h, FilterType::Nearest))
    } else {
        Ok(img)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::TempDir;

    fn write_frame(path: &Path, w: u32, h: u32, color: [u8; 4]) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        RgbaImage::from_pixel(w, h, Rgba(color)).save(path).unwrap();
    }

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let dir = TempDir::new().unwrap();
        let generated = dir.path().join("characters");
        let output = dir.path().join("sheets");
        (dir, generated, output)
    }

    fn read_metadata(path: &Path) -> SheetMetadata {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_frame_cap_keeps_first_two_and_reports_skips() {
        let (_dir, generated, output) = setup();
        let hero = generated.join("hero");
        write_frame(&hero.join("idle_00.png"), 64, 64, [255, 0, 0, 255]);
        write_frame(&hero.join("idle_01.png"), 64, 64, [0, 255, 0, 255]);
        write_frame(&hero.join("idle_02.png"), 64, 64, [0, 0, 255, 255]);

        let assembler = SheetAssembler::new(&generated, &output);
        let outcome = assembler
            .pack("hero", &[("idle".to_string(), 6)])
            .unwrap();

        let summary = match outcome {
            PackOutcome::Packed(summary) => summary,
            PackOutcome::Skipped { reason, .. } => panic!("skipped: {}", reason),
        };
        assert_eq!(summary.total_frames, 2);
        assert_eq!(summary.skipped_frames, 1);

        let sheet = image::open(&summary.sheet_path).unwrap().to_rgba8();
        assert_eq!(sheet.dimensions(), (128, 64));
        // First two frames by sorted name, third discarded.
        assert_eq!(sheet.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(sheet.get_pixel(64, 0), &Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn test_single_frame_is_duplicated() {
        let (_dir, generated, output) = setup();
        write_frame(
            &generated.join("hero/idle_00.png"),
            64,
            64,
            [10, 20, 30, 255],
        );

        let assembler = SheetAssembler::new(&generated, &output);
        let outcome = assembler
            .pack("hero", &[("idle".to_string(), 6)])
            .unwrap();

        let summary = match outcome {
            PackOutcome::Packed(summary) => summary,
            PackOutcome::Skipped { reason, .. } => panic!("skipped: {}", reason),
        };
        assert_eq!(summary.total_frames, 2);

        let sheet = image::open(&summary.sheet_path).unwrap().to_rgba8();
        assert_eq!(sheet.get_pixel(0, 0), sheet.get_pixel(64, 0));

        let metadata = read_metadata(&summary.metadata_path);
        assert_eq!(metadata.animations[0].frame_count, 2);
    }

    #[test]
    fn test_empty_track_is_dropped_and_rows_stay_dense() {
        let (_dir, generated, output) = setup();
        let hero = generated.join("hero");
        write_frame(&hero.join("idle_00.png"), 64, 64, [1, 1, 1, 255]);
        write_frame(&hero.join("idle_01.png"), 64, 64, [2, 2, 2, 255]);
        write_frame(&hero.join("run_00.png"), 64, 64, [3, 3, 3, 255]);
        write_frame(&hero.join("run_01.png"), 64, 64, [4, 4, 4, 255]);

        let assembler = SheetAssembler::new(&generated, &output);
        let tracks = vec![
            ("idle".to_string(), 6),
            ("walk".to_string(), 8),
            ("run".to_string(), 10),
        ];
        let outcome = assembler.pack("hero", &tracks).unwrap();

        let summary = match outcome {
            PackOutcome::Packed(summary) => summary,
            PackOutcome::Skipped { reason, .. } => panic!("skipped: {}", reason),
        };
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.skipped_tracks, vec!["walk".to_string()]);

        let metadata = read_metadata(&summary.metadata_path);
        assert_eq!(metadata.rows, 2);
        assert_eq!(metadata.total_frames, 4);
        assert_eq!(metadata.animations.len(), 2);

        assert_eq!(metadata.animations[0].name, "idle");
        assert_eq!(metadata.animations[0].row, 0);
        assert_eq!(metadata.animations[1].name, "run");
        assert_eq!(metadata.animations[1].row, 1);
        assert_eq!(metadata.animations[1].start_frame, 2);
        assert_eq!(metadata.animations[1].end_frame, 3);

        for entry in &metadata.animations {
            assert_eq!(entry.end_frame - entry.start_frame + 1, entry.frame_count);
        }
    }

    #[test]
    fn test_all_tracks_empty_skips_character_and_writes_nothing() {
        let (_dir, generated, output) = setup();
        fs::create_dir_all(generated.join("hero")).unwrap();

        let assembler = SheetAssembler::new(&generated, &output);
        let outcome = assembler
            .pack("hero", &[("idle".to_string(), 6), ("walk".to_string(), 8)])
            .unwrap();

        assert!(matches!(outcome, PackOutcome::Skipped { .. }));
        assert!(!output.join("hero_sheet.png").exists());
        assert!(!output.join("hero_sheet.json").exists());
    }

    #[test]
    fn test_missing_character_directory_skips() {
        let (_dir, generated, output) = setup();
        fs::create_dir_all(&generated).unwrap();

        let assembler = SheetAssembler::new(&generated, &output);
        let outcome = assembler
            .pack("ghost", &[("idle".to_string(), 6)])
            .unwrap();
        assert!(matches!(outcome, PackOutcome::Skipped { .. }));
    }

    #[test]
    fn test_mismatched_frame_is_resized_not_cropped() {
        let (_dir, generated, output) = setup();
        write_frame(
            &generated.join("hero/idle_00.png"),
            32,
            32,
            [50, 60, 70, 128],
        );

        let assembler = SheetAssembler::new(&generated, &output);
        let outcome = assembler
            .pack("hero", &[("idle".to_string(), 6)])
            .unwrap();

        let summary = match outcome {
            PackOutcome::Packed(summary) => summary,
            PackOutcome::Skipped { reason, .. } => panic!("skipped: {}", reason),
        };
        let sheet = image::open(&summary.sheet_path).unwrap().to_rgba8();
        assert_eq!(sheet.dimensions(), (128, 64));
        // Nearest-neighbor upscale of a solid frame keeps the exact color,
        // alpha included.
        assert_eq!(sheet.get_pixel(63, 63), &Rgba([50, 60, 70, 128]));
    }

    #[test]
    fn test_first_matching_pattern_wins_without_merging() {
        let (_dir, generated, output) = setup();
        let hero = generated.join("hero");
        write_frame(&hero.join("idle_00.png"), 64, 64, [9, 9, 9, 255]);
        write_frame(&hero.join("hero_idle_00.png"), 64, 64, [8, 8, 8, 255]);
        write_frame(&hero.join("hero_idle_01.png"), 64, 64, [7, 7, 7, 255]);

        let frames = find_track_frames(&hero, "hero", "idle").unwrap();
        assert_eq!(frames.len(), 1);
        assert!(frames[0].ends_with("idle_00.png"));
        assert!(!frames[0].ends_with("hero_idle_00.png"));

        // Only the bare pattern feeds the sheet; the lone frame duplicates.
        let assembler = SheetAssembler::new(&generated, &output);
        let outcome = assembler
            .pack("hero", &[("idle".to_string(), 6)])
            .unwrap();
        let summary = match outcome {
            PackOutcome::Packed(summary) => summary,
            PackOutcome::Skipped { reason, .. } => panic!("skipped: {}", reason),
        };
        let sheet = image::open(&summary.sheet_path).unwrap().to_rgba8();
        assert_eq!(sheet.get_pixel(0, 0), &Rgba([9, 9, 9, 255]));
        assert_eq!(sheet.get_pixel(64, 0), &Rgba([9, 9, 9, 255]));
    }

    #[test]
    fn test_prefixed_pattern_used_when_bare_pattern_absent() {
        let (_dir, generated, output) = setup();
        let hero = generated.join("hero");
        write_frame(&hero.join("hero_walk_00.png"), 64, 64, [5, 5, 5, 255]);
        write_frame(&hero.join("hero_walk_01.png"), 64, 64, [6, 6, 6, 255]);

        let assembler = SheetAssembler::new(&generated, &output);
        let outcome = assembler
            .pack("hero", &[("walk".to_string(), 8)])
            .unwrap();
        let summary = match outcome {
            PackOutcome::Packed(summary) => summary,
            PackOutcome::Skipped { reason, .. } => panic!("skipped: {}", reason),
        };
        assert_eq!(summary.total_frames, 2);
    }

    #[test]
    fn test_single_file_pattern_used_last() {
        let (_dir, generated, _output) = setup();
        let hero = generated.join("hero");
        write_frame(&hero.join("crouch.png"), 64, 64, [1, 2, 3, 255]);

        let frames = find_track_frames(&hero, "hero", "crouch").unwrap();
        assert_eq!(frames.len(), 1);
        assert!(frames[0].ends_with("crouch.png"));
    }

    #[test]
    fn test_packing_is_idempotent() {
        let (_dir, generated, output) = setup();
        let hero = generated.join("hero");
        write_frame(&hero.join("idle_00.png"), 64, 64, [11, 12, 13, 255]);
        write_frame(&hero.join("idle_01.png"), 64, 64, [14, 15, 16, 255]);

        let assembler = SheetAssembler::new(&generated, &output);
        assembler.pack("hero", &[("idle".to_string(), 6)]).unwrap();
        let first_png = fs::read(output.join("hero_sheet.png")).unwrap();
        let first_json = fs::read_to_string(output.join("hero_sheet.json")).unwrap();

        assembler.pack("hero", &[("idle".to_string(), 6)]).unwrap();
        let second_png = fs::read(output.join("hero_sheet.png")).unwrap();
        let second_json = fs::read_to_string(output.join("hero_sheet.json")).unwrap();

        assert_eq!(first_png, second_png);
        assert_eq!(first_json, second_json);
    }

    #[test]
    fn test_transparent_cells_stay_transparent() {
        let (_dir, generated, output) = setup();
        let hero = generated.join("hero");
        write_frame(&hero.join("idle_00.png"), 64, 64, [255, 255, 255, 0]);
        write_frame(&hero.join("idle_01.png"), 64, 64, [255, 255, 255, 0]);

        let assembler = SheetAssembler::new(&generated, &output);
        let outcome = assembler
            .pack("hero", &[("idle".to_string(), 6)])
            .unwrap();
        let summary = match outcome {
            PackOutcome::Packed(summary) => summary,
            PackOutcome::Skipped { reason, .. } => panic!("skipped: {}", reason),
        };
        let sheet = image::open(&summary.sheet_path).unwrap().to_rgba8();
        // Alpha passes through unflattened.
        assert_eq!(sheet.get_pixel(0, 0).0[3], 0);
    }
}
