// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/geometry/engine.rs
//
// Pure selection geometry: draw, drag and resize steps.

use super::rect::{PointerPoint, SelectionRect};

/// One of the eight resize handles on the selection border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl ResizeHandle {
    /// All handles, clockwise from the top-left corner.
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::Top,
        ResizeHandle::TopRight,
        ResizeHandle::Right,
        ResizeHandle::BottomRight,
        ResizeHandle::Bottom,
        ResizeHandle::BottomLeft,
        ResizeHandle::Left,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResizeHandle::TopLeft => "top-left",
            ResizeHandle::Top => "top",
            ResizeHandle::TopRight => "top-right",
            ResizeHandle::Right => "right",
            ResizeHandle::BottomRight => "bottom-right",
            ResizeHandle::Bottom => "bottom",
            ResizeHandle::BottomLeft => "bottom-left",
            ResizeHandle::Left => "left",
        }
    }

    /// Centre of this handle on the given rectangle.
    pub fn position(self, rect: &SelectionRect) -> PointerPoint {
        let mid_x = rect.left + rect.width / 2.0;
        let mid_y = rect.top + rect.height / 2.0;
        match self {
            ResizeHandle::TopLeft => PointerPoint::new(rect.left, rect.top),
            ResizeHandle::Top => PointerPoint::new(mid_x, rect.top),
            ResizeHandle::TopRight => PointerPoint::new(rect.right(), rect.top),
            ResizeHandle::Right => PointerPoint::new(rect.right(), mid_y),
            ResizeHandle::BottomRight => PointerPoint::new(rect.right(), rect.bottom()),
            ResizeHandle::Bottom => PointerPoint::new(mid_x, rect.bottom()),
            ResizeHandle::BottomLeft => PointerPoint::new(rect.left, rect.bottom()),
            ResizeHandle::Left => PointerPoint::new(rect.left, mid_y),
        }
    }

    fn moves_left_edge(self) -> bool {
        matches!(
            self,
            ResizeHandle::TopLeft | ResizeHandle::BottomLeft | ResizeHandle::Left
        )
    }

    fn moves_top_edge(self) -> bool {
        matches!(
            self,
            ResizeHandle::TopLeft | ResizeHandle::TopRight | ResizeHandle::Top
        )
    }

    fn resizes_width(self) -> bool {
        !matches!(self, ResizeHandle::Top | ResizeHandle::Bottom)
    }

    fn resizes_height(self) -> bool {
        !matches!(self, ResizeHandle::Left | ResizeHandle::Right)
    }
}

/// Rectangle spanned by the draw anchor and the current pointer.
pub fn draw_rect(anchor: PointerPoint, current: PointerPoint) -> SelectionRect {
    SelectionRect {
        left: anchor.x.min(current.x),
        top: anchor.y.min(current.y),
        width: (current.x - anchor.x).abs(),
        height: (current.y - anchor.y).abs(),
    }
}

/// Translate `rect` by `(dx, dy)` and push it back inside the container.
///
/// The far-edge checks use the unclamped position, so a rectangle larger
/// than the container ends up aligned to the far edge.
pub fn drag_rect(
    rect: &SelectionRect,
    dx: f64,
    dy: f64,
    container_width: f64,
    container_height: f64,
) -> SelectionRect {
    let moved_left = rect.left + dx;
    let moved_top = rect.top + dy;

    let mut left = moved_left;
    let mut top = moved_top;
    if left < 0.0 {
        left = 0.0;
    }
    if top < 0.0 {
        top = 0.0;
    }
    if moved_left + rect.width > container_width {
        left = container_width - rect.width;
    }
    if moved_top + rect.height > container_height {
        top = container_height - rect.height;
    }

    SelectionRect { left, top, ..*rect }
}

/// Resize `rect` so the bound handle follows the pointer at `(move_x, move_y)`.
///
/// No lower bound is applied here; see [`clamp_min_size`].
pub fn resize_rect(
    rect: &SelectionRect,
    handle: ResizeHandle,
    move_x: f64,
    move_y: f64,
) -> SelectionRect {
    let SelectionRect {
        left,
        top,
        width,
        height,
    } = *rect;

    match handle {
        ResizeHandle::TopLeft => SelectionRect::new(
            move_x,
            move_y,
            width + (left - move_x),
            height + (top - move_y),
        ),
        ResizeHandle::TopRight => {
            SelectionRect::new(left, move_y, move_x - left, height + (top - move_y))
        }
        ResizeHandle::BottomLeft => {
            SelectionRect::new(move_x, top, width + (left - move_x), move_y - top)
        }
        ResizeHandle::BottomRight => SelectionRect::new(left, top, move_x - left, move_y - top),
        ResizeHandle::Top => SelectionRect::new(left, move_y, width, height + (top - move_y)),
        ResizeHandle::Bottom => SelectionRect::new(left, top, width, move_y - top),
        ResizeHandle::Left => SelectionRect::new(move_x, top, width + (left - move_x), height),
        ResizeHandle::Right => SelectionRect::new(left, top, move_x - left, height),
    }
}

/// Keep a resized rectangle at least `min_size` wide and tall.
///
/// The edge opposite the dragged handle stays where it was in `before`;
/// the handle never flips to the other side.
pub fn clamp_min_size(
    before: &SelectionRect,
    handle: ResizeHandle,
    resized: SelectionRect,
    min_size: f64,
) -> SelectionRect {
    let mut rect = resized;

    if handle.resizes_width() && rect.width < min_size {
        rect.width = min_size;
        if handle.moves_left_edge() {
            rect.left = before.right() - min_size;
        }
    }

    if handle.resizes_height() && rect.height < min_size {
        rect.height = min_size;
        if handle.moves_top_edge() {
            rect.top = before.bottom() - min_size;
        }
    }

    rect
}
