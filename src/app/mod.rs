// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/mod.rs
//
// Interactive layer: input routing, selection view and the cropper session.

pub mod cropper;
pub mod input;
pub mod message;
pub mod view;

pub use cropper::{CropCallback, CropControls, Cropper};
pub use input::{EventStatus, PointerInput, normalize};
pub use message::{CropCommand, PointerPhase, RawPointerEvent, TouchPoint};
