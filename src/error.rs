// SPDX-License-Identifier: GPL-3.0-or-later
// src/error.rs
//
// Error taxonomy for the crop pipeline.

use thiserror::Error;

/// Errors that can end a single crop attempt.
///
/// None of these are fatal to the session: the selection stays where it is
/// and the user may adjust it and retry.
#[derive(Error, Debug)]
pub enum CropError {
    /// No rendered surface exists for the requested page.
    #[error("no rendered surface for page {page}")]
    SurfaceNotFound { page: usize },

    /// Mapped rectangle is degenerate or leaves the surface's pixel buffer.
    #[error(
        "crop area ({sx:.1}, {sy:.1}, {sw:.1}x{sh:.1}) is outside the surface ({surface_width}x{surface_height})"
    )]
    OutOfBounds {
        sx: f64,
        sy: f64,
        sw: f64,
        sh: f64,
        surface_width: u32,
        surface_height: u32,
    },

    /// Watermark image could not be read or decoded. Recoverable.
    #[error("could not load watermark image: {0}")]
    WatermarkLoadFailed(String),

    /// Final raster came out empty.
    #[error("cropping failed: {0}")]
    EncodeFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for crop operations.
pub type CropResult<T> = Result<T, CropError>;

impl CropError {
    /// Whether the crop can still produce an artifact after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CropError::WatermarkLoadFailed(_))
    }
}
