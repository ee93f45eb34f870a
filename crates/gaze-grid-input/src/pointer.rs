//! Pointer and touch normalization

use serde::{Deserialize, Serialize};

use gaze_grid_core::NormalizedSample;

/// Screen rectangle the gaze is measured against, usually the image itself
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Offset of the pointer from the rectangle center, in half-extents.
///
/// Screen y grows downward while gaze y grows upward, so the vertical axis
/// is flipped. An axis with no extent, or a non-finite pointer coordinate,
/// contributes 0.
pub fn normalize_pointer(rect: &Rect, x: f64, y: f64) -> NormalizedSample {
    let (cx, cy) = rect.center();
    let nx = axis_offset(x - cx, rect.width);
    let ny = axis_offset(cy - y, rect.height);
    NormalizedSample::new(nx, ny)
}

fn axis_offset(delta: f64, extent: f64) -> f64 {
    if !delta.is_finite() || extent.is_nan() || extent <= 0.0 {
        return 0.0;
    }
    delta / (extent / 2.0)
}
