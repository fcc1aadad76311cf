// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/crop/mod.rs
//
// Crop selection module: state machine, overlay hit testing and window capture.
// Inspired by cosmic-viewer (https://codeberg.org/bhh by Bryan Hyland

mod capture;
mod overlay;
mod selection;

pub use capture::{NoWindowListeners, WindowCapture, WindowListeners};
pub use overlay::{CursorHint, HitTarget, OverlayLayout, cursor_for, cursor_for_handle, hit_test};
pub use selection::{InteractionMode, SelectionStateMachine};

#[cfg(test)]
pub(crate) use capture::testing;
