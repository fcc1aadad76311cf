// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/document/mod.rs
//
// Rendered page surfaces and operations on them.

pub mod operations;
pub mod surface;

pub use operations::crop::{CropRegion, map_to_container, map_to_surface};
pub use surface::{PageRegistry, PageStack, RenderedSurface, SurfaceGeometry};
