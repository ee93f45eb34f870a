//! gaze-grid-input: adapters from platform input to normalized gaze samples
//!
//! - Pointer and touch positions relative to a reference rectangle
//! - Device tilt relative to a per-session baseline
//! - Mode switching, where pointer input always overrides tilt

mod event;
mod mode;
mod pointer;
mod tilt;

pub use event::InputEvent;
pub use mode::{Capability, InputMode, InputState, TiltRefused};
pub use pointer::{normalize_pointer, Rect};
pub use tilt::{normalize_tilt, TiltCalibration, TiltReading, TiltSample, DEFAULT_TILT_SENSITIVITY};
