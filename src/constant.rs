// SPDX-License-Identifier: GPL-3.0-or-later
// src/constant.rs
//
// Crop engine constants that should not be changed by the user.

/// Default selection width in container pixels.
pub const DEFAULT_SELECTION_WIDTH: f64 = 200.0;

/// Default selection height in container pixels.
pub const DEFAULT_SELECTION_HEIGHT: f64 = 200.0;

/// Default selection left edge as a fraction of the container width.
pub const DEFAULT_SELECTION_LEFT_RATIO: f64 = 0.25;

/// Default selection top edge in container pixels.
pub const DEFAULT_SELECTION_TOP: f64 = 120.0;

/// Fixed upscale applied to every exported crop (print/export quality).
pub const OUTPUT_SCALE_FACTOR: f64 = 2.0;

/// White strip height as a fraction of the crop width (watermark logo band).
pub const WHITE_STRIP_RATIO: f64 = 0.25;

/// Extra white strip height added on top of the ratio.
pub const WHITE_STRIP_PADDING: f64 = 10.0;

/// Default watermark tile width as a fraction of the crop width.
pub const WATERMARK_TILE_RATIO: f64 = 0.25;

/// Default opacity of the tiled watermark over the cropped content.
pub const WATERMARK_DEFAULT_OPACITY: f64 = 0.15;

/// Gap between watermark tiles in both axes (crop pixels, before upscale).
pub const WATERMARK_GUTTER: f64 = 20.0;

/// Minimum selection extent enforced while resizing.
pub const MIN_SELECTION_SIZE: f64 = 1.0;

/// Side of the square hit area around each resize handle.
pub const HANDLE_HIT_SIZE: f64 = 14.0;

/// File name suggested for downloaded crops.
pub const DOWNLOAD_FILE_NAME: &str = "cropped-image.png";

/// Render scale used by the page stack host (pages rendered at 2x, shown at 1x).
pub const PAGE_RENDER_SCALE: f64 = 2.0;

/// Tolerance for float comparisons in coordinate mapping.
pub const COORD_EPSILON: f64 = 1e-6;
