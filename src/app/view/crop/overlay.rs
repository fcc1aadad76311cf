// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/crop/overlay.rs
//
// Overlay hit testing, cursor hints and the geometry the host draws.

use crate::app::view::crop::selection::InteractionMode;
use crate::domain::geometry::{PointerPoint, ResizeHandle, SelectionRect};

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Handle(ResizeHandle),
    Body,
    Outside,
}

/// Cursor the host should show over the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Crosshair,
    Grab,
    Grabbing,
    ResizeNwse,
    ResizeNesw,
    ResizeNs,
    ResizeEw,
}

impl CursorHint {
    /// CSS cursor keyword.
    pub fn as_css(self) -> &'static str {
        match self {
            CursorHint::Crosshair => "crosshair",
            CursorHint::Grab => "grab",
            CursorHint::Grabbing => "grabbing",
            CursorHint::ResizeNwse => "nwse-resize",
            CursorHint::ResizeNesw => "nesw-resize",
            CursorHint::ResizeNs => "ns-resize",
            CursorHint::ResizeEw => "ew-resize",
        }
    }
}

/// Corners win over edge midpoints, handles win over the body.
const HIT_ORDER: [ResizeHandle; 8] = [
    ResizeHandle::TopLeft,
    ResizeHandle::TopRight,
    ResizeHandle::BottomLeft,
    ResizeHandle::BottomRight,
    ResizeHandle::Top,
    ResizeHandle::Bottom,
    ResizeHandle::Left,
    ResizeHandle::Right,
];

fn point_in_handle(point: PointerPoint, handle_center: PointerPoint, hit_size: f64) -> bool {
    let half = hit_size / 2.0;
    point.x >= handle_center.x - half
        && point.x <= handle_center.x + half
        && point.y >= handle_center.y - half
        && point.y <= handle_center.y + half
}

pub fn hit_test(rect: &SelectionRect, point: PointerPoint, hit_size: f64) -> HitTarget {
    for handle in HIT_ORDER {
        if point_in_handle(point, handle.position(rect), hit_size) {
            return HitTarget::Handle(handle);
        }
    }

    if rect.contains(point) {
        return HitTarget::Body;
    }

    HitTarget::Outside
}

pub fn cursor_for_handle(handle: ResizeHandle) -> CursorHint {
    match handle {
        ResizeHandle::TopLeft | ResizeHandle::BottomRight => CursorHint::ResizeNwse,
        ResizeHandle::TopRight | ResizeHandle::BottomLeft => CursorHint::ResizeNesw,
        ResizeHandle::Top | ResizeHandle::Bottom => CursorHint::ResizeNs,
        ResizeHandle::Left | ResizeHandle::Right => CursorHint::ResizeEw,
    }
}

/// Cursor for a hover position given the current interaction.
pub fn cursor_for(
    mode: InteractionMode,
    active_handle: Option<ResizeHandle>,
    target: HitTarget,
) -> CursorHint {
    match (mode, active_handle) {
        (InteractionMode::Resizing, Some(handle)) => return cursor_for_handle(handle),
        (InteractionMode::Dragging, _) => return CursorHint::Grabbing,
        (InteractionMode::Drawing, _) => return CursorHint::Crosshair,
        _ => {}
    }

    match target {
        HitTarget::Handle(handle) => cursor_for_handle(handle),
        HitTarget::Body => CursorHint::Grab,
        HitTarget::Outside => CursorHint::Crosshair,
    }
}

/// Everything the host needs to paint the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLayout {
    pub rect: SelectionRect,
    pub handles: [(ResizeHandle, PointerPoint); 8],
    /// Draw the built-in save/cancel buttons under the rectangle.
    pub show_controls: bool,
}

impl OverlayLayout {
    pub fn new(rect: SelectionRect, show_controls: bool) -> Self {
        let handles = ResizeHandle::ALL.map(|handle| (handle, handle.position(&rect)));
        Self {
            rect,
            handles,
            show_controls,
        }
    }
}
