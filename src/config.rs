// SPDX-License-Identifier: GPL-3.0-or-later
// src/config.rs
//
// Cropper configuration, loadable from JSON.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::constant::{DOWNLOAD_FILE_NAME, HANDLE_HIT_SIZE, MIN_SELECTION_SIZE};
use crate::error::CropResult;

/// Where the watermark image comes from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatermarkSource {
    /// Image file on disk.
    Path(PathBuf),
    /// Encoded image already in memory.
    #[serde(skip)]
    Bytes(Arc<[u8]>),
}

/// Watermark placement. Unset fields fall back to values derived from the
/// crop at save time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WatermarkConfig {
    pub source: WatermarkSource,
    /// Tile opacity over the cropped content (default 0.15).
    #[serde(default)]
    pub opacity: Option<f64>,
    /// Tile width in crop pixels (default: a quarter of the crop width).
    #[serde(default)]
    pub tile_width: Option<f64>,
    /// Tile height in crop pixels (default: keeps the image aspect ratio).
    #[serde(default)]
    pub tile_height: Option<f64>,
}

impl WatermarkConfig {
    pub fn new(source: WatermarkSource) -> Self {
        Self {
            source,
            opacity: None,
            tile_width: None,
            tile_height: None,
        }
    }
}

/// Global configuration for a cropper session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CropperConfig {
    /// Whether the overlay draws its own save/cancel controls. When false the
    /// host drives them through [`crate::app::CropControls`].
    pub show_default_controls: bool,
    /// File name used by the download step.
    pub download_file_name: String,
    /// Smallest width/height a resize may produce.
    pub min_selection_size: f64,
    /// Side of the square hit area around each handle.
    pub handle_hit_size: f64,
    pub watermark: Option<WatermarkConfig>,
}

impl Default for CropperConfig {
    fn default() -> Self {
        Self {
            show_default_controls: true,
            download_file_name: DOWNLOAD_FILE_NAME.to_string(),
            min_selection_size: MIN_SELECTION_SIZE,
            handle_hit_size: HANDLE_HIT_SIZE,
            watermark: None,
        }
    }
}

impl CropperConfig {
    /// Read a config file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> CropResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }
}
