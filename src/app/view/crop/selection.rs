// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/crop/selection.rs
//
// Selection state machine: one interaction mode and one rectangle.

use std::rc::Rc;

use crate::app::input::EventStatus;
use crate::app::view::crop::capture::{WindowCapture, WindowListeners};
use crate::app::view::crop::overlay::{HitTarget, hit_test};
use crate::domain::geometry::{
    BoundingBox, PointerPoint, ResizeHandle, SelectionRect, clamp_min_size, drag_rect, draw_rect,
    resize_rect,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Drawing,
    Selected,
    Dragging,
    Resizing,
}

/// Per-mode data. Drag and resize own the window capture, so leaving
/// those modes releases it.
#[derive(Debug)]
enum Gesture {
    Idle,
    Drawing {
        anchor: PointerPoint,
        previous: SelectionRect,
    },
    Selected,
    Dragging {
        last: PointerPoint,
        _capture: WindowCapture,
    },
    Resizing {
        handle: ResizeHandle,
        _capture: WindowCapture,
    },
}

pub struct SelectionStateMachine {
    rect: SelectionRect,
    gesture: Gesture,
    container: BoundingBox,
    min_size: f64,
    handle_hit_size: f64,
    listeners: Rc<dyn WindowListeners>,
}

impl SelectionStateMachine {
    pub fn new(
        container: BoundingBox,
        listeners: Rc<dyn WindowListeners>,
        min_size: f64,
        handle_hit_size: f64,
    ) -> Self {
        Self {
            rect: SelectionRect::default_for(container.width),
            gesture: Gesture::Idle,
            container,
            min_size,
            handle_hit_size,
            listeners,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        match self.gesture {
            Gesture::Idle => InteractionMode::Idle,
            Gesture::Drawing { .. } => InteractionMode::Drawing,
            Gesture::Selected => InteractionMode::Selected,
            Gesture::Dragging { .. } => InteractionMode::Dragging,
            Gesture::Resizing { .. } => InteractionMode::Resizing,
        }
    }

    pub fn rect(&self) -> SelectionRect {
        self.rect
    }

    pub fn container(&self) -> BoundingBox {
        self.container
    }

    /// Handle bound to the current resize, if resizing.
    pub fn resize_handle(&self) -> Option<ResizeHandle> {
        match self.gesture {
            Gesture::Resizing { handle, .. } => Some(handle),
            _ => None,
        }
    }

    /// A draw, drag or resize is in progress.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.gesture,
            Gesture::Drawing { .. } | Gesture::Dragging { .. } | Gesture::Resizing { .. }
        )
    }

    /// Track the container's latest bounding box (scroll, layout changes).
    pub fn set_container(&mut self, container: BoundingBox) {
        self.container = container;
    }

    pub fn hit_test(&self, point: PointerPoint) -> HitTarget {
        hit_test(&self.rect, point, self.handle_hit_size)
    }

    pub fn pointer_down(&mut self, point: PointerPoint) -> EventStatus {
        if self.is_busy() {
            return EventStatus::Ignored;
        }

        // Handle hit areas may overhang the container edge.
        let target = self.hit_test(point);
        let inside_container = point.x >= 0.0
            && point.y >= 0.0
            && point.x <= self.container.width
            && point.y <= self.container.height;
        if !inside_container && !matches!(target, HitTarget::Handle(_)) {
            return EventStatus::Ignored;
        }

        self.gesture = match target {
            HitTarget::Handle(handle) => {
                log::debug!("Resize start on {} handle", handle.as_str());
                Gesture::Resizing {
                    handle,
                    _capture: WindowCapture::acquire(&self.listeners),
                }
            }
            HitTarget::Body => Gesture::Dragging {
                last: point,
                _capture: WindowCapture::acquire(&self.listeners),
            },
            HitTarget::Outside => Gesture::Drawing {
                anchor: point,
                previous: self.rect,
            },
        };

        EventStatus::Captured
    }

    pub fn pointer_move(&mut self, point: PointerPoint) -> EventStatus {
        match &mut self.gesture {
            Gesture::Drawing { anchor, .. } => {
                self.rect = draw_rect(*anchor, point);
            }
            Gesture::Dragging { last, .. } => {
                let dx = point.x - last.x;
                let dy = point.y - last.y;
                self.rect = drag_rect(
                    &self.rect,
                    dx,
                    dy,
                    self.container.width,
                    self.container.height,
                );
                *last = point;
            }
            Gesture::Resizing { handle, .. } => {
                let resized = resize_rect(&self.rect, *handle, point.x, point.y);
                self.rect = clamp_min_size(&self.rect, *handle, resized, self.min_size);
            }
            Gesture::Idle | Gesture::Selected => return EventStatus::Ignored,
        }

        EventStatus::Captured
    }

    pub fn pointer_up(&mut self) -> EventStatus {
        if !self.is_busy() {
            return EventStatus::Ignored;
        }
        self.settle();
        EventStatus::Captured
    }

    /// The window lost focus: end any gesture as if the pointer was released.
    pub fn window_blur(&mut self) {
        if self.is_busy() {
            log::debug!("Window blur during {:?}, forcing release", self.mode());
            self.settle();
        }
    }

    /// Back to `Idle` with the default rectangle.
    pub fn reset(&mut self) {
        self.gesture = Gesture::Idle;
        self.rect = SelectionRect::default_for(self.container.width);
    }

    fn settle(&mut self) {
        if let Gesture::Drawing { previous, .. } = self.gesture {
            // A click without a drag leaves the old selection in place.
            if !self.rect.has_area() {
                self.rect = previous;
            }
        }
        self.gesture = Gesture::Selected;
    }
}

impl std::fmt::Debug for SelectionStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionStateMachine")
            .field("rect", &self.rect)
            .field("mode", &self.mode())
            .field("container", &self.container)
            .finish()
    }
}
