// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/geometry/mod.rs
//
// Selection geometry: value types and pure draw/drag/resize steps.

mod engine;
mod rect;

pub use engine::{ResizeHandle, clamp_min_size, drag_rect, draw_rect, resize_rect};
pub use rect::{BoundingBox, PointerPoint, SelectionRect};
