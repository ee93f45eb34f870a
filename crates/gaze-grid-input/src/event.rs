//! Abstract input events consumed by a tracker

use serde::{Deserialize, Serialize};

use crate::tilt::TiltReading;

/// One raw sample from the platform, before normalization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputEvent {
    /// Mouse or pen moved, in screen coordinates
    PointerMove { x: f64, y: f64 },

    /// Primary touch point moved, in screen coordinates
    TouchMove { x: f64, y: f64 },

    /// Device orientation changed
    Orientation(TiltReading),
}

impl InputEvent {
    /// Screen position for pointer and touch events
    pub fn position(&self) -> Option<(f64, f64)> {
        match *self {
            InputEvent::PointerMove { x, y } | InputEvent::TouchMove { x, y } => Some((x, y)),
            InputEvent::Orientation(_) => None,
        }
    }

    /// Check if this is a pointer or touch event
    pub fn is_pointer(&self) -> bool {
        matches!(self, InputEvent::PointerMove { .. } | InputEvent::TouchMove { .. })
    }

    /// Check if this is an orientation event
    pub fn is_orientation(&self) -> bool {
        matches!(self, InputEvent::Orientation(_))
    }
}
