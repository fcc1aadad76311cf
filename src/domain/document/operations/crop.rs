// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/operations/crop.rs
//
// Crop region in surface pixel space and the container-to-surface mapping.

use crate::constant::COORD_EPSILON;
use crate::domain::document::surface::SurfaceGeometry;
use crate::domain::geometry::{BoundingBox, SelectionRect};
use crate::error::{CropError, CropResult};

/// Crop region in the native pixel space of a rendered surface.
///
/// Coordinates stay fractional; the rasterizer decides how to sample them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRegion {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.x, self.y, self.width, self.height)
    }

    /// Check if region has valid dimensions.
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Whole-pixel rectangle covering this region, clipped to the surface.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn as_pixel_rect(&self, surface_width: u32, surface_height: u32) -> (u32, u32, u32, u32) {
        let x = (self.x.round().max(0.0) as u32).min(surface_width);
        let y = (self.y.round().max(0.0) as u32).min(surface_height);
        let w = (self.width.round().max(1.0) as u32).min(surface_width - x);
        let h = (self.height.round().max(1.0) as u32).min(surface_height - y);
        (x, y, w, h)
    }
}

/// Offset of the surface inside the container and the ratio between its
/// native pixels and its displayed size.
fn surface_transform(container: &BoundingBox, surface: &SurfaceGeometry) -> (f64, f64, f64, f64) {
    let offset_x = surface.bounds.left - container.left;
    let offset_y = surface.bounds.top - container.top;
    let scale_x = f64::from(surface.native_width) / surface.bounds.width;
    let scale_y = f64::from(surface.native_height) / surface.bounds.height;
    (offset_x, offset_y, scale_x, scale_y)
}

/// Map a container-space selection onto the surface's pixel buffer.
///
/// Fails with [`CropError::OutOfBounds`] when the mapped area is empty or
/// not fully inside `[0, native_width] x [0, native_height]`.
pub fn map_to_surface(
    rect: &SelectionRect,
    container: &BoundingBox,
    surface: &SurfaceGeometry,
) -> CropResult<CropRegion> {
    let (offset_x, offset_y, scale_x, scale_y) = surface_transform(container, surface);

    let region = CropRegion {
        x: (rect.left - offset_x) * scale_x,
        y: (rect.top - offset_y) * scale_y,
        width: rect.width * scale_x,
        height: rect.height * scale_y,
    };

    let native_w = f64::from(surface.native_width);
    let native_h = f64::from(surface.native_height);

    // NaN from a zero-sized display box fails every comparison and counts as outside.
    let inside = region.x >= -COORD_EPSILON
        && region.y >= -COORD_EPSILON
        && region.x + region.width <= native_w + COORD_EPSILON
        && region.y + region.height <= native_h + COORD_EPSILON;

    if !region.is_valid() || !inside {
        return Err(CropError::OutOfBounds {
            sx: region.x,
            sy: region.y,
            sw: region.width,
            sh: region.height,
            surface_width: surface.native_width,
            surface_height: surface.native_height,
        });
    }

    Ok(region)
}

/// Inverse of [`map_to_surface`]: bring a pixel region back into container
/// coordinates.
pub fn map_to_container(
    region: &CropRegion,
    container: &BoundingBox,
    surface: &SurfaceGeometry,
) -> SelectionRect {
    let (offset_x, offset_y, scale_x, scale_y) = surface_transform(container, surface);
    SelectionRect {
        left: region.x / scale_x + offset_x,
        top: region.y / scale_y + offset_y,
        width: region.width / scale_x,
        height: region.height / scale_y,
    }
}
