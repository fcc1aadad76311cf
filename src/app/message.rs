// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/message.rs
//
// Raw input events from the host and commands from host-side controls.

/// Stage of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// One touch contact in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub client_x: f64,
    pub client_y: f64,
}

/// Pointer event as the host's windowing layer reports it.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPointerEvent {
    Mouse {
        phase: PointerPhase,
        client_x: f64,
        client_y: f64,
    },
    Touch {
        phase: PointerPhase,
        /// Active contacts; empty on touch end.
        touches: Vec<TouchPoint>,
    },
}

impl RawPointerEvent {
    pub fn mouse(phase: PointerPhase, client_x: f64, client_y: f64) -> Self {
        RawPointerEvent::Mouse {
            phase,
            client_x,
            client_y,
        }
    }

    pub fn touch(phase: PointerPhase, client_x: f64, client_y: f64) -> Self {
        RawPointerEvent::Touch {
            phase,
            touches: vec![TouchPoint { client_x, client_y }],
        }
    }

    pub fn touch_end() -> Self {
        RawPointerEvent::Touch {
            phase: PointerPhase::Up,
            touches: Vec::new(),
        }
    }

    pub fn phase(&self) -> PointerPhase {
        match self {
            RawPointerEvent::Mouse { phase, .. } | RawPointerEvent::Touch { phase, .. } => *phase,
        }
    }
}

/// Actions a host UI can trigger without the built-in controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropCommand {
    Save,
    Cancel,
}
