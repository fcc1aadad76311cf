// SPDX-License-Identifier: GPL-3.0-or-later
// src/render/watermark.rs
//
// Watermark loading and tile sizing.

use std::sync::Arc;

use image::RgbaImage;

use crate::config::{WatermarkConfig, WatermarkSource};
use crate::constant::{WATERMARK_DEFAULT_OPACITY, WATERMARK_TILE_RATIO};
use crate::error::{CropError, CropResult};
use crate::render::rasterizer::white_strip_height;

/// Load and decode the watermark image.
///
/// File reading and decoding run off the caller's task; the returned future
/// resolves once the image is ready or has failed.
pub async fn load_watermark(source: &WatermarkSource) -> CropResult<RgbaImage> {
    let bytes: Arc<[u8]> = match source {
        WatermarkSource::Path(path) => tokio::fs::read(path)
            .await
            .map(Arc::<[u8]>::from)
            .map_err(|e| CropError::WatermarkLoadFailed(format!("{}: {e}", path.display())))?,
        WatermarkSource::Bytes(bytes) => Arc::clone(bytes),
    };

    if bytes.is_empty() {
        return Err(CropError::WatermarkLoadFailed("empty image data".into()));
    }

    let decoded = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
        .await
        .map_err(|e| CropError::WatermarkLoadFailed(e.to_string()))?
        .map_err(|e| CropError::WatermarkLoadFailed(e.to_string()))?;

    Ok(decoded.to_rgba8())
}

/// Final watermark sizing for one crop, in crop pixels (before upscale).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatermarkLayout {
    pub opacity: f64,
    pub tile_width: f64,
    pub tile_height: f64,
}

impl WatermarkLayout {
    /// Fill in unset config values from the crop size and the image's
    /// aspect ratio.
    ///
    /// Non-finite values count as unset, and tiles never exceed the output
    /// canvas (crop plus white strip).
    pub fn resolve(
        config: &WatermarkConfig,
        crop_width: f64,
        crop_height: f64,
        image: &RgbaImage,
    ) -> Self {
        let opacity = finite(config.opacity)
            .unwrap_or(WATERMARK_DEFAULT_OPACITY)
            .clamp(0.0, 1.0);
        let tile_width = finite(config.tile_width)
            .unwrap_or(crop_width * WATERMARK_TILE_RATIO)
            .min(crop_width);
        let tile_height = finite(config.tile_height)
            .unwrap_or_else(|| {
                let (w, h) = image.dimensions();
                if w == 0 {
                    0.0
                } else {
                    f64::from(h) / f64::from(w) * tile_width
                }
            })
            .min(crop_height + white_strip_height(crop_width, true));

        Self {
            opacity,
            tile_width,
            tile_height,
        }
    }

    /// Tiles must have area, or tiling would never advance.
    pub fn is_drawable(&self) -> bool {
        self.tile_width >= 1.0 && self.tile_height >= 1.0
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    match value {
        Some(v) if !v.is_finite() => {
            log::warn!("Ignoring non-finite watermark setting {v}");
            None
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(w, h, Rgba([200, 0, 0, 255]));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn test_resolve_defaults() {
        let config = WatermarkConfig::new(WatermarkSource::Bytes(Arc::from(Vec::new())));
        let image = RgbaImage::new(40, 20);
        let layout = WatermarkLayout::resolve(&config, 200.0, 200.0, &image);
        assert_eq!(layout.opacity, 0.15);
        assert_eq!(layout.tile_width, 50.0);
        assert_eq!(layout.tile_height, 25.0);
    }

    #[test]
    fn test_resolve_explicit_values() {
        let mut config = WatermarkConfig::new(WatermarkSource::Bytes(Arc::from(Vec::new())));
        config.opacity = Some(1.7);
        config.tile_width = Some(30.0);
        config.tile_height = Some(12.0);
        let layout = WatermarkLayout::resolve(&config, 200.0, 200.0, &RgbaImage::new(40, 20));
        assert_eq!(layout.opacity, 1.0);
        assert_eq!((layout.tile_width, layout.tile_height), (30.0, 12.0));
    }

    #[test]
    fn test_zero_tile_is_not_drawable() {
        let mut config = WatermarkConfig::new(WatermarkSource::Bytes(Arc::from(Vec::new())));
        config.tile_width = Some(0.0);
        let layout = WatermarkLayout::resolve(&config, 200.0, 200.0, &RgbaImage::new(40, 20));
        assert!(!layout.is_drawable());
    }

    #[test]
    fn test_tile_is_bounded_by_canvas() {
        let mut config = WatermarkConfig::new(WatermarkSource::Bytes(Arc::from(Vec::new())));
        config.tile_width = Some(f64::INFINITY);
        config.tile_height = Some(1e12);
        config.opacity = Some(f64::NAN);
        let layout = WatermarkLayout::resolve(&config, 200.0, 100.0, &RgbaImage::new(40, 20));
        // Infinite width falls back to the default quarter width.
        assert_eq!(layout.tile_width, 50.0);
        // 100 crop rows plus a 60 row strip.
        assert_eq!(layout.tile_height, 160.0);
        assert_eq!(layout.opacity, 0.15);

        config.tile_width = Some(5000.0);
        let layout = WatermarkLayout::resolve(&config, 200.0, 100.0, &RgbaImage::new(40, 20));
        assert_eq!(layout.tile_width, 200.0);
    }

    #[tokio::test]
    async fn test_load_from_bytes() {
        let source = WatermarkSource::Bytes(Arc::from(png_bytes(8, 4)));
        let image = load_watermark(&source).await.unwrap();
        assert_eq!(image.dimensions(), (8, 4));
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let source = WatermarkSource::Path("/nonexistent/watermark.png".into());
        let err = load_watermark(&source).await.unwrap_err();
        assert!(matches!(err, CropError::WatermarkLoadFailed(_)));
    }

    #[tokio::test]
    async fn test_load_garbage_fails() {
        let source = WatermarkSource::Bytes(Arc::from(b"definitely not a png".to_vec()));
        assert!(matches!(
            load_watermark(&source).await,
            Err(CropError::WatermarkLoadFailed(_))
        ));
    }
}
