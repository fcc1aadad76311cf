// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/crop/capture.rs
//
// Scoped window-level pointer listeners for drag and resize gestures.

use std::rc::Rc;

/// Host hook that routes window-wide pointer move/up events to the cropper
/// while attached.
pub trait WindowListeners {
    fn attach(&self);
    fn detach(&self);
}

/// For hosts that already forward every pointer event.
#[derive(Debug, Default)]
pub struct NoWindowListeners;

impl WindowListeners for NoWindowListeners {
    fn attach(&self) {}
    fn detach(&self) {}
}

/// Holds the window listeners for as long as it lives.
///
/// Dropping it detaches them, so every way out of a drag or resize
/// releases the subscription.
pub struct WindowCapture {
    listeners: Rc<dyn WindowListeners>,
}

impl WindowCapture {
    pub fn acquire(listeners: &Rc<dyn WindowListeners>) -> Self {
        log::trace!("Attaching window pointer listeners");
        listeners.attach();
        Self {
            listeners: Rc::clone(listeners),
        }
    }
}

impl Drop for WindowCapture {
    fn drop(&mut self) {
        log::trace!("Detaching window pointer listeners");
        self.listeners.detach();
    }
}

impl std::fmt::Debug for WindowCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("WindowCapture(..)")
    }
}
