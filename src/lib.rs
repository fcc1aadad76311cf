// SPDX-License-Identifier: GPL-3.0-or-later
// src/lib.rs
//
// Crate root: rectangular selection over rendered pages and pixel-accurate crops.

pub mod app;
pub mod config;
pub mod constant;
pub mod domain;
pub mod error;
pub mod render;

pub use app::{CropControls, Cropper, EventStatus, PointerPhase, RawPointerEvent};
pub use app::view::crop::{InteractionMode, NoWindowListeners, WindowListeners};
pub use config::{CropperConfig, WatermarkConfig, WatermarkSource};
pub use domain::document::{PageRegistry, PageStack, RenderedSurface};
pub use domain::geometry::{BoundingBox, PointerPoint, ResizeHandle, SelectionRect};
pub use error::{CropError, CropResult};
pub use render::{CroppedArtifact, PendingCrop};
