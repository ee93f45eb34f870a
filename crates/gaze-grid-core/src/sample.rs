//! Source-agnostic gaze samples

use serde::Serialize;

/// Clamp one axis into [-1, 1], reading NaN as 0
pub fn normalize_axis(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

/// How far toward each extreme the gaze should point
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct NormalizedSample {
    x: f64,
    y: f64,
}

impl NormalizedSample {
    pub const CENTER: Self = Self { x: 0.0, y: 0.0 };

    /// Build a sample, clamping both axes
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: normalize_axis(x),
            y: normalize_axis(y),
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}
