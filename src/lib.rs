//! gaze-grid: an image that follows the pointer, touch or device tilt
//!
//! The image is picked from a pre-rendered grid, one file per gaze
//! direction. This crate ties the pieces together:
//!
//! - **Quantization** ([`gaze_grid_core`]): samples to grid cells to asset ids
//! - **Input** ([`gaze_grid_input`]): pointer/touch normalization, tilt calibration
//! - **Configuration** ([`gaze_grid_config`]): TOML + environment, validated at load
//! - **Tracking**: [`GazeTracker`] per displayed image, [`TrackerRegistry`] across them
//!
//! # Usage
//!
//! ```ignore
//! use gaze_grid::{GazeConfig, GazeTracker, InputEvent, Rect};
//!
//! let config = GazeConfig::load(None)?;
//! let mut tracker = GazeTracker::new(
//!     &config,
//!     Rect::new(0.0, 0.0, 256.0, 256.0),
//!     Box::new(|path: &str| image.set_src(path)),
//! )?;
//! tracker.handle(&InputEvent::PointerMove { x: 220.0, y: 40.0 });
//! ```

pub mod registry;
pub mod script;
pub mod surface;
pub mod tracker;

pub use gaze_grid_config::{ConfigError, GazeConfig, GridConfig};
pub use gaze_grid_core::{
    encode, quantize, AssetId, GazeQuantizer, GazeTarget, GridCoordinate, GridError, GridSpec,
    NormalizedSample, ParseAssetIdError,
};
pub use gaze_grid_input::{
    Capability, InputEvent, InputMode, InputState, Rect, TiltCalibration, TiltReading, TiltRefused,
};

pub use registry::TrackerRegistry;
pub use script::{
    parse_line, parse_script, run_command, LineError, ReplayStep, ScriptCommand, ScriptError,
};
pub use surface::{DiagnosticOverlay, DisplaySurface, PermissionGate};
pub use tracker::{GazeFrame, GazeTracker};
