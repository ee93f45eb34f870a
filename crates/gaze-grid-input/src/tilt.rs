//! Device tilt calibration and normalization

use serde::{Deserialize, Serialize};
use tracing::debug;

use gaze_grid_core::NormalizedSample;

/// Tilt in degrees that maps to full deflection
pub const DEFAULT_TILT_SENSITIVITY: f64 = 30.0;

/// Raw device-orientation reading in degrees. Either angle may be missing
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TiltReading {
    /// Front-to-back tilt
    pub beta: Option<f64>,
    /// Left-to-right tilt
    pub gamma: Option<f64>,
}

impl TiltReading {
    pub fn new(beta: f64, gamma: f64) -> Self {
        Self {
            beta: Some(beta),
            gamma: Some(gamma),
        }
    }

    /// Angles with missing or NaN values read as 0
    pub fn angles(&self) -> (f64, f64) {
        (sanitize(self.beta), sanitize(self.gamma))
    }
}

fn sanitize(angle: Option<f64>) -> f64 {
    match angle {
        Some(v) if !v.is_nan() => v,
        _ => 0.0,
    }
}

/// Zero-reference captured from the first reading of a tilt session
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TiltCalibration {
    baseline: Option<(f64, f64)>,
}

impl TiltCalibration {
    pub fn is_calibrated(&self) -> bool {
        self.baseline.is_some()
    }

    /// Baseline as `(beta0, gamma0)`
    pub fn baseline(&self) -> Option<(f64, f64)> {
        self.baseline
    }

    /// Forget the baseline; the next reading becomes the new zero
    pub fn reset(&mut self) {
        self.baseline = None;
    }

    /// Deltas of `reading` against the baseline, capturing it first if unset
    pub fn apply(&mut self, reading: &TiltReading) -> (f64, f64) {
        let (beta, gamma) = reading.angles();
        let (beta0, gamma0) = *self.baseline.get_or_insert_with(|| {
            debug!(beta, gamma, "Captured tilt baseline");
            (beta, gamma)
        });
        (beta - beta0, gamma - gamma0)
    }
}

/// A calibrated tilt reading and the sample it normalizes to
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TiltSample {
    pub delta_beta: f64,
    pub delta_gamma: f64,
    pub sample: NormalizedSample,
}

/// Turn baseline-relative deltas into a sample.
///
/// Both axes are inverted: leaning the device right (positive gamma) turns
/// the gaze left, tipping it toward the viewer (positive beta) turns it down.
pub fn normalize_tilt(delta_beta: f64, delta_gamma: f64, sensitivity: f64) -> NormalizedSample {
    NormalizedSample::new(-delta_gamma / sensitivity, -delta_beta / sensitivity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_angles_read_as_zero() {
        let reading = TiltReading {
            beta: None,
            gamma: Some(f64::NAN),
        };
        assert_eq!(reading.angles(), (0.0, 0.0));
    }

    #[test]
    fn test_first_reading_becomes_baseline() {
        let mut cal = TiltCalibration::default();
        assert!(!cal.is_calibrated());

        assert_eq!(cal.apply(&TiltReading::new(47.0, -12.0)), (0.0, 0.0));
        assert_eq!(cal.baseline(), Some((47.0, -12.0)));

        // The baseline is not replaced by later readings
        assert_eq!(cal.apply(&TiltReading::new(50.0, -2.0)), (3.0, 10.0));
        assert_eq!(cal.baseline(), Some((47.0, -12.0)));
    }

    #[test]
    fn test_reset() {
        let mut cal = TiltCalibration::default();
        cal.apply(&TiltReading::new(10.0, 10.0));
        cal.reset();
        assert!(!cal.is_calibrated());
        assert_eq!(cal.apply(&TiltReading::new(80.0, 5.0)), (0.0, 0.0));
    }

    #[test]
    fn test_normalize_inverts_and_clamps() {
        let sample = normalize_tilt(15.0, -15.0, DEFAULT_TILT_SENSITIVITY);
        assert_eq!((sample.x(), sample.y()), (0.5, -0.5));

        let sample = normalize_tilt(-90.0, 90.0, DEFAULT_TILT_SENSITIVITY);
        assert_eq!((sample.x(), sample.y()), (-1.0, 1.0));
    }
}
