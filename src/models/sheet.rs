use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Sidecar record describing one animation row of a packed sheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnimationEntry {
    pub name: String,
    pub row: u32,
    pub start_frame: u32,
    pub end_frame: u32,
    pub frame_count: u32,
    pub frame_rate: u32,
}

/// Sidecar metadata written next to each sheet PNG. Field names match what
/// the game engine loads at runtime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SheetMetadata {
    pub frame_width: u32,
    pub frame_height: u32,
    pub columns: u32,
    pub rows: u32,
    pub total_frames: u32,
    pub animations: Vec<AnimationEntry>,
}

/// Summary of one packed character sheet, for reporting.
#[derive(Debug, Clone)]
pub struct PackSummary {
    pub character: String,
    pub sheet_path: PathBuf,
    pub metadata_path: PathBuf,
    pub rows: u32,
    pub total_frames: u32,
    pub skipped_frames: u32,
    pub skipped_tracks: Vec<String>,
}

/// Outcome of packing one character: either a sheet was written, or every
/// track came up empty and nothing was produced.
#[derive(Debug)]
pub enum PackOutcome {
    Packed(PackSummary),
    Skipped { character: String, reason: String },
}
