// SPDX-License-Identifier: GPL-3.0-or-later
// src/render/mod.rs
//
// Output rasterization: compositing, watermarking and encoding.

pub mod pending;
pub mod rasterizer;
pub mod watermark;

pub use pending::PendingCrop;
pub use rasterizer::{CroppedArtifact, Rasterizer, encode, white_strip_height};
pub use watermark::{WatermarkLayout, load_watermark};
