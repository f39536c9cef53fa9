use crate::{
    config::OutputConfig,
    error::{Result, SpriteForgeError},
};
use std::fs;
use std::path::Path;

/// Per-category copy counts from one staging run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StagingReport {
    pub tiles: usize,
    pub backgrounds: usize,
    pub ui: usize,
    pub effects: usize,
}

impl StagingReport {
    pub fn total(&self) -> usize {
        self.tiles + self.backgrounds + self.ui + self.effects
    }
}

/// Copy generated tiles, backgrounds, UI elements and effects into the game
/// asset tree. A missing source directory is skipped, not an error.
pub fn stage_assets(output: &OutputConfig) -> Result<StagingReport> {
    Ok(StagingReport {
        tiles: copy_category(&output.tiles_dir(), &output.tiles_out(), "tiles")?,
        backgrounds: copy_category(
            &output.backgrounds_dir(),
            &output.backgrounds_out(),
            "backgrounds",
        )?,
        ui: copy_category(&output.ui_dir(), &output.ui_out(), "ui")?,
        effects: copy_category(&output.effects_dir(), &output.effects_out(), "effects")?,
    })
}

fn copy_category(src: &Path, dest: &Path, label: &str) -> Result<usize> {
    if !src.is_dir() {
        log::info!("No generated {} directory, skipping", label);
        return Ok(0);
    }

    fs::create_dir_all(dest).map_err(|e| SpriteForgeError::IoError {
        path: dest.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut names: Vec<String> = fs::read_dir(src)
        .map_err(|e| SpriteForgeError::IoError {
            path: src.to_path_buf(),
            reason: e.to_string(),
        })?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".png"))
        .collect();
    names.sort();

    for name in &names {
        let from = src.join(name);
        let to = dest.join(name);
        fs::copy(&from, &to).map_err(|e| SpriteForgeError::IoError {
            path: from.clone(),
            reason: e.to_string(),
        })?;
        log::debug!("Copied {} -> {}", from.display(), to.display());
    }

    log::info!("Copied {} {} file(s)", names.len(), label);
    Ok(names.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_stage_copies_pngs_and_skips_missing_dirs() {
        let dir = TempDir::new().unwrap();
        let output = OutputConfig::new()
            .with_generated_dir(dir.path().join("generated"))
            .with_asset_dir(dir.path().join("assets"));

        fs::create_dir_all(output.tiles_dir()).unwrap();
        fs::write(output.tiles_dir().join("city_ground.png"), b"png").unwrap();
        fs::write(output.tiles_dir().join("city_wall.png"), b"png").unwrap();
        fs::write(output.tiles_dir().join("notes.txt"), b"ignored").unwrap();

        let report = stage_assets(&output).unwrap();
        assert_eq!(report.tiles, 2);
        assert_eq!(report.backgrounds, 0);
        assert_eq!(report.total(), 2);
        assert!(output.tiles_out().join("city_ground.png").exists());
        assert!(!output.tiles_out().join("notes.txt").exists());
    }
}
