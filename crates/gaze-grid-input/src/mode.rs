//! Input mode switching between pointer and tilt

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use gaze_grid_core::NormalizedSample;

use crate::pointer::{normalize_pointer, Rect};
use crate::tilt::{normalize_tilt, TiltCalibration, TiltReading, TiltSample, DEFAULT_TILT_SENSITIVITY};

/// Which input currently drives the gaze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Mouse, pen or touch position
    #[default]
    Pointer,
    /// Device orientation relative to a calibrated baseline
    Tilt,
}

/// Outcome of asking the platform for motion sensor access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Granted,
    Denied,
    Unsupported,
}

impl Capability {
    /// `Ok` only for [`Capability::Granted`]
    pub fn check(self) -> Result<(), TiltRefused> {
        match self {
            Capability::Granted => Ok(()),
            Capability::Denied => Err(TiltRefused::Denied),
            Capability::Unsupported => Err(TiltRefused::Unsupported),
        }
    }
}

/// Why tilt mode could not be enabled. The message is meant for the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TiltRefused {
    #[error("Motion sensor access was denied, following the pointer instead")]
    Denied,

    #[error("This device does not report its orientation, following the pointer instead")]
    Unsupported,
}

/// Mode flag and calibration for one tracked display
#[derive(Debug, Clone)]
pub struct InputState {
    mode: InputMode,
    calibration: TiltCalibration,
    sensitivity: f64,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(DEFAULT_TILT_SENSITIVITY)
    }
}

impl InputState {
    /// `sensitivity` is the tilt in degrees that reaches full deflection
    pub fn new(sensitivity: f64) -> Self {
        Self {
            mode: InputMode::Pointer,
            calibration: TiltCalibration::default(),
            sensitivity,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn is_tilt_enabled(&self) -> bool {
        self.mode == InputMode::Tilt
    }

    pub fn calibration(&self) -> &TiltCalibration {
        &self.calibration
    }

    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    /// Switch to tilt mode if the capability check allowed it.
    ///
    /// Calibration is reset on every successful call, including when tilt
    /// was already active. A refusal leaves the state untouched.
    pub fn enable_tilt(&mut self, capability: Capability) -> Result<(), TiltRefused> {
        capability.check()?;
        if self.mode != InputMode::Tilt {
            info!("Tilt mode enabled");
        }
        self.mode = InputMode::Tilt;
        self.calibration.reset();
        Ok(())
    }

    pub fn disable_tilt(&mut self) {
        if self.mode == InputMode::Tilt {
            info!("Tilt mode disabled");
        }
        self.mode = InputMode::Pointer;
    }

    /// Normalize a pointer or touch position. Pointer input always wins, so
    /// an active tilt session is cancelled
    pub fn pointer_sample(&mut self, rect: &Rect, x: f64, y: f64) -> NormalizedSample {
        if self.mode == InputMode::Tilt {
            debug!("Pointer input cancelled tilt mode");
            self.disable_tilt();
        }
        normalize_pointer(rect, x, y)
    }

    /// Normalize an orientation reading, or `None` while tilt is off
    pub fn orientation_sample(&mut self, reading: &TiltReading) -> Option<TiltSample> {
        if self.mode != InputMode::Tilt {
            return None;
        }
        let (delta_beta, delta_gamma) = self.calibration.apply(reading);
        Some(TiltSample {
            delta_beta,
            delta_gamma,
            sample: normalize_tilt(delta_beta, delta_gamma, self.sensitivity),
        })
    }
}
