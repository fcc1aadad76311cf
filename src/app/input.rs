// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/input.rs
//
// Mouse and touch normalization into container-relative pointer input.

use crate::app::message::{PointerPhase, RawPointerEvent};
use crate::domain::geometry::{BoundingBox, PointerPoint};

/// Whether the host should stop default handling and bubbling of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    /// Prevent default and stop propagation.
    Captured,
    Ignored,
}

/// Pointer input with the device kind erased.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub phase: PointerPhase,
    /// Position relative to the container; `None` for a touch end, which
    /// carries no active contact.
    pub point: Option<PointerPoint>,
}

/// Convert a raw event into container coordinates.
///
/// Only the first touch contact counts.
pub fn normalize(event: &RawPointerEvent, container: &BoundingBox) -> PointerInput {
    let client = match event {
        RawPointerEvent::Mouse {
            client_x, client_y, ..
        } => Some((*client_x, *client_y)),
        RawPointerEvent::Touch { touches, .. } => {
            touches.first().map(|touch| (touch.client_x, touch.client_y))
        }
    };

    PointerInput {
        phase: event.phase(),
        point: client.map(|(x, y)| PointerPoint::new(x - container.left, y - container.top)),
    }
}
