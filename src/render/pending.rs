// SPDX-License-Identifier: GPL-3.0-or-later
// src/render/pending.rs
//
// A crop snapshot that renders without holding on to the session.

use image::RgbaImage;
use image::imageops;

use crate::config::WatermarkConfig;
use crate::domain::document::CropRegion;
use crate::error::CropResult;
use crate::render::rasterizer::{CroppedArtifact, Rasterizer};
use crate::render::watermark::{WatermarkLayout, load_watermark};

/// Source pixels and settings captured when a save starts.
///
/// Owns everything it needs, so the session stays free for input while the
/// watermark loads.
#[derive(Debug, Clone)]
pub struct PendingCrop {
    page: usize,
    source: RgbaImage,
    region: CropRegion,
    watermark: Option<WatermarkConfig>,
}

impl PendingCrop {
    /// Copy the pixels under `region` out of `surface`.
    pub fn snapshot(
        page: usize,
        surface: &RgbaImage,
        region: CropRegion,
        watermark: Option<WatermarkConfig>,
    ) -> Self {
        let (src_w, src_h) = surface.dimensions();
        let (x, y, w, h) = region.as_pixel_rect(src_w, src_h);
        let source = imageops::crop_imm(surface, x, y, w, h).to_image();

        // Same region, relative to the copied pixels.
        let region = CropRegion::new(
            region.x - f64::from(x),
            region.y - f64::from(y),
            region.width,
            region.height,
        );

        Self {
            page,
            source,
            region,
            watermark,
        }
    }

    /// Page the snapshot was taken from (1-based).
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn region(&self) -> CropRegion {
        self.region
    }

    /// Load the watermark, if any, and rasterize.
    ///
    /// A watermark that fails to load is logged and its white strip kept.
    pub async fn render(self) -> CropResult<CroppedArtifact> {
        let watermark = match &self.watermark {
            Some(config) => match load_watermark(&config.source).await {
                Ok(image) => Some(image),
                Err(e) => {
                    log::warn!("{e}, continuing without watermark");
                    None
                }
            },
            None => None,
        };

        let mut raster = Rasterizer::new(&self.source, self.region);
        if let Some(config) = &self.watermark {
            raster = match watermark.as_ref() {
                Some(image) => {
                    let layout = WatermarkLayout::resolve(
                        config,
                        self.region.width,
                        self.region.height,
                        image,
                    );
                    raster.with_watermark(image, layout)
                }
                None => raster.with_strip(),
            };
        }

        raster.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    #[test]
    fn test_snapshot_copies_only_the_region() {
        let surface = RgbaImage::from_pixel(1600, 1800, RED);
        let region = CropRegion::new(100.4, 99.6, 200.0, 200.0);
        let pending = PendingCrop::snapshot(3, &surface, region, None);
        assert_eq!(pending.page(), 3);
        assert_eq!(pending.source.dimensions(), (200, 200));
        let region = pending.region();
        assert!((region.x - 0.4).abs() < 1e-9);
        assert!((region.y + 0.4).abs() < 1e-9);
        assert_eq!(region.as_pixel_rect(200, 200), (0, 0, 200, 200));
    }

    #[tokio::test]
    async fn test_render_matches_direct_rasterization() {
        let mut surface = RgbaImage::from_pixel(100, 100, RED);
        for y in 50..100 {
            for x in 50..100 {
                surface.put_pixel(x, y, BLUE);
            }
        }
        let region = CropRegion::new(50.0, 50.0, 40.0, 40.0);
        let direct = Rasterizer::new(&surface, region).render().unwrap();

        let pending = PendingCrop::snapshot(1, &surface, region, None);
        drop(surface);
        let artifact = pending.render().await.unwrap();
        assert_eq!(artifact, direct);
    }
}
