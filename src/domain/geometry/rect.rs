// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/geometry/rect.rs
//
// Plain geometry value types shared by selection, mapping and rasterizing.

use crate::constant::{
    DEFAULT_SELECTION_HEIGHT, DEFAULT_SELECTION_LEFT_RATIO, DEFAULT_SELECTION_TOP,
    DEFAULT_SELECTION_WIDTH,
};

/// Pointer position relative to the container's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPoint {
    pub x: f64,
    pub y: f64,
}

impl PointerPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box in viewport coordinates (what a layout engine reports
/// for an element).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// The user-controlled crop region in container coordinates.
///
/// Width and height are positive while idle. A resize step may compute a
/// negative extent before the minimum size clamp is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SelectionRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Default geometry shown when crop mode starts or the page changes.
    pub fn default_for(container_width: f64) -> Self {
        Self {
            left: container_width * DEFAULT_SELECTION_LEFT_RATIO,
            top: DEFAULT_SELECTION_TOP,
            width: DEFAULT_SELECTION_WIDTH,
            height: DEFAULT_SELECTION_HEIGHT,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Inclusive containment test, edges count as inside.
    pub fn contains(&self, point: PointerPoint) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }

    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry() {
        let rect = SelectionRect::default_for(1000.0);
        assert_eq!(rect, SelectionRect::new(250.0, 120.0, 200.0, 200.0));
    }

    #[test]
    fn test_contains_edges() {
        let rect = SelectionRect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(PointerPoint::new(10.0, 30.0)));
        assert!(rect.contains(PointerPoint::new(20.0, 20.0)));
        assert!(!rect.contains(PointerPoint::new(30.1, 20.0)));
    }

    #[test]
    fn test_has_area() {
        assert!(SelectionRect::new(0.0, 0.0, 1.0, 1.0).has_area());
        assert!(!SelectionRect::new(0.0, 0.0, -4.0, 1.0).has_area());
        assert!(!SelectionRect::new(0.0, 0.0, 5.0, 0.0).has_area());
    }
}
