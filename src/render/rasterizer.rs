// SPDX-License-Identifier: GPL-3.0-or-later
// src/render/rasterizer.rs
//
// Turns a mapped crop region into an upscaled, optionally watermarked PNG.

use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};

use crate::constant::{
    OUTPUT_SCALE_FACTOR, WATERMARK_GUTTER, WHITE_STRIP_PADDING, WHITE_STRIP_RATIO,
};
use crate::domain::document::CropRegion;
use crate::error::{CropError, CropResult};
use crate::render::watermark::WatermarkLayout;

/// Resampling used for every scaled draw.
const SMOOTHING: FilterType = FilterType::CatmullRom;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Encoded crop delivered to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CroppedArtifact {
    width: u32,
    height: u32,
    png: Vec<u8>,
}

impl CroppedArtifact {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// PNG-encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.png
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.png
    }

    /// `data:` URL suitable as an image source.
    pub fn to_data_url(&self) -> String {
        format!("data:image/png;base64,{}", BASE64.encode(&self.png))
    }

    /// Write the PNG to disk.
    pub fn save(&self, path: &Path) -> CropResult<()> {
        std::fs::write(path, &self.png)?;
        Ok(())
    }
}

/// Height of the white band above the content, in crop pixels.
pub fn white_strip_height(crop_width: f64, watermarked: bool) -> f64 {
    if watermarked {
        crop_width * WHITE_STRIP_RATIO + WHITE_STRIP_PADDING
    } else {
        0.0
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_px(value: f64) -> u32 {
    (value * OUTPUT_SCALE_FACTOR).max(0.0) as u32
}

#[allow(clippy::cast_possible_truncation)]
fn to_offset(value: f64) -> i64 {
    (value * OUTPUT_SCALE_FACTOR).round() as i64
}

/// One crop render: source region, white strip and watermark.
pub struct Rasterizer<'a> {
    source: &'a RgbaImage,
    region: CropRegion,
    reserve_strip: bool,
    watermark: Option<(&'a RgbaImage, WatermarkLayout)>,
}

impl<'a> Rasterizer<'a> {
    pub fn new(source: &'a RgbaImage, region: CropRegion) -> Self {
        Self {
            source,
            region,
            reserve_strip: false,
            watermark: None,
        }
    }

    /// Reserve the white strip even if no watermark image ends up drawn
    /// (a configured watermark that failed to load).
    pub fn with_strip(mut self) -> Self {
        self.reserve_strip = true;
        self
    }

    pub fn with_watermark(mut self, image: &'a RgbaImage, layout: WatermarkLayout) -> Self {
        self.reserve_strip = true;
        self.watermark = Some((image, layout));
        self
    }

    fn strip_height(&self) -> f64 {
        white_strip_height(self.region.width, self.reserve_strip)
    }

    /// Output raster size in pixels.
    pub fn output_size(&self) -> (u32, u32) {
        (
            to_px(self.region.width),
            to_px(self.region.height + self.strip_height()),
        )
    }

    /// Draw the crop into a fresh buffer.
    pub fn compose(&self) -> RgbaImage {
        let (out_w, out_h) = self.output_size();
        let mut canvas = RgbaImage::new(out_w, out_h);
        if out_w == 0 || out_h == 0 {
            return canvas;
        }

        let strip = self.strip_height();
        let strip_px = to_px(strip).min(out_h);
        for y in 0..strip_px {
            for x in 0..out_w {
                canvas.put_pixel(x, y, WHITE);
            }
        }

        let (src_w, src_h) = self.source.dimensions();
        let (x, y, w, h) = self.region.as_pixel_rect(src_w, src_h);
        if w > 0 && h > 0 {
            let sub = imageops::crop_imm(self.source, x, y, w, h).to_image();
            let scaled = imageops::resize(
                &sub,
                to_px(self.region.width).max(1),
                to_px(self.region.height).max(1),
                SMOOTHING,
            );
            imageops::replace(&mut canvas, &scaled, 0, i64::from(strip_px));
        }

        if let Some((image, layout)) = self.watermark {
            if layout.is_drawable() {
                self.draw_watermark(&mut canvas, image, layout, strip);
            } else {
                log::warn!("Watermark tile size {layout:?} is empty, skipping watermark");
            }
        }

        canvas
    }

    fn draw_watermark(
        &self,
        canvas: &mut RgbaImage,
        image: &RgbaImage,
        layout: WatermarkLayout,
        strip: f64,
    ) {
        let sw = self.region.width;
        let sh = self.region.height;
        let tile = imageops::resize(
            image,
            to_px(layout.tile_width).max(1),
            to_px(layout.tile_height).max(1),
            SMOOTHING,
        );

        // Centred logo in the strip, fully opaque.
        imageops::overlay(
            canvas,
            &tile,
            to_offset((sw - layout.tile_width) / 2.0),
            to_offset((strip - layout.tile_height) / 2.0),
        );

        let faded = with_opacity(&tile, layout.opacity);
        let step_x = layout.tile_width + WATERMARK_GUTTER;
        let step_y = layout.tile_height + WATERMARK_GUTTER;

        let mut x = 0.0;
        while x < sw {
            let mut y = strip;
            while y < sh + strip {
                imageops::overlay(canvas, &faded, to_offset(x), to_offset(y));
                y += step_y;
            }
            x += step_x;
        }
    }

    /// Compose and encode.
    pub fn render(&self) -> CropResult<CroppedArtifact> {
        encode(&self.compose())
    }
}

/// Copy of `image` with its alpha channel scaled by `opacity`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn with_opacity(image: &RgbaImage, opacity: f64) -> RgbaImage {
    let mut faded = image.clone();
    for pixel in faded.pixels_mut() {
        pixel[3] = (f64::from(pixel[3]) * opacity).round().clamp(0.0, 255.0) as u8;
    }
    faded
}

/// Encode a composed buffer as PNG.
pub fn encode(canvas: &RgbaImage) -> CropResult<CroppedArtifact> {
    let (width, height) = canvas.dimensions();
    if width == 0 || height == 0 {
        return Err(CropError::EncodeFailed(format!(
            "empty raster ({width}x{height})"
        )));
    }

    let mut png = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| CropError::EncodeFailed(e.to_string()))?;

    if png.is_empty() {
        return Err(CropError::EncodeFailed("encoder produced no data".into()));
    }

    Ok(CroppedArtifact { width, height, png })
}
