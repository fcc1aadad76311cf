// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/surface.rs
//
// Rendered page surfaces and the page registry the host provides.

use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageReader, RgbaImage};

use crate::constant::PAGE_RENDER_SCALE;
use crate::domain::geometry::BoundingBox;
use crate::error::CropResult;

/// Where a surface is displayed and how many native pixels back it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    /// Displayed box in viewport coordinates.
    pub bounds: BoundingBox,
    pub native_width: u32,
    pub native_height: u32,
}

/// A rendered page: its pixel buffer plus where it currently sits on screen.
#[derive(Debug, Clone)]
pub struct RenderedSurface {
    pixels: RgbaImage,
    bounds: BoundingBox,
}

impl RenderedSurface {
    pub fn new(pixels: RgbaImage, bounds: BoundingBox) -> Self {
        Self { pixels, bounds }
    }

    /// Load a page image from disk. Display bounds start empty.
    pub fn open(path: &Path) -> CropResult<Self> {
        let document = ImageReader::open(path)?.decode()?;
        Ok(Self::from_image(&document, BoundingBox::default()))
    }

    pub fn from_image(img: &DynamicImage, bounds: BoundingBox) -> Self {
        Self::new(img.to_rgba8(), bounds)
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: BoundingBox) {
        self.bounds = bounds;
    }

    /// Returns the native pixel dimensions (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn geometry(&self) -> SurfaceGeometry {
        let (native_width, native_height) = self.dimensions();
        SurfaceGeometry {
            bounds: self.bounds,
            native_width,
            native_height,
        }
    }
}

/// Page lookup supplied by the document renderer.
pub trait PageRegistry {
    /// Rendered surface for a 1-based page index, if that page is rendered.
    fn lookup(&self, page_index: usize) -> Option<&RenderedSurface>;
}

/// In-memory page registry: pages stacked top to bottom inside a container,
/// each shown at `1 / render_scale` of its native size.
#[derive(Debug, Clone)]
pub struct PageStack {
    origin: (f64, f64),
    render_scale: f64,
    gap: f64,
    pages: Vec<RenderedSurface>,
}

impl Default for PageStack {
    fn default() -> Self {
        Self::new(0.0, 0.0, PAGE_RENDER_SCALE, 0.0)
    }
}

impl PageStack {
    pub fn new(left: f64, top: f64, render_scale: f64, gap: f64) -> Self {
        Self {
            origin: (left, top),
            render_scale,
            gap,
            pages: Vec::new(),
        }
    }

    /// Append a rendered page below the existing ones.
    pub fn push(&mut self, img: &DynamicImage) {
        let (w, h) = img.dimensions();
        let width = f64::from(w) / self.render_scale;
        let height = f64::from(h) / self.render_scale;
        let top = match self.pages.last() {
            Some(prev) => prev.bounds.top + prev.bounds.height + self.gap,
            None => self.origin.1,
        };
        let bounds = BoundingBox::new(self.origin.0, top, width, height);
        self.pages.push(RenderedSurface::from_image(img, bounds));
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Box enclosing every page, starting at the stack origin.
    pub fn extent(&self) -> BoundingBox {
        let width = self
            .pages
            .iter()
            .map(|p| p.bounds.width)
            .fold(0.0, f64::max);
        let height = self
            .pages
            .last()
            .map_or(0.0, |p| p.bounds.top + p.bounds.height - self.origin.1);
        BoundingBox::new(self.origin.0, self.origin.1, width, height)
    }
}

impl PageRegistry for PageStack {
    fn lookup(&self, page_index: usize) -> Option<&RenderedSurface> {
        page_index
            .checked_sub(1)
            .and_then(|index| self.pages.get(index))
    }
}
