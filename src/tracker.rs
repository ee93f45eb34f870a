//! One tracked display: input state, quantizer and collaborators

use serde::Serialize;
use tracing::{debug, trace};

use gaze_grid_config::{ConfigError, GazeConfig};
use gaze_grid_core::{AssetId, GazeQuantizer, GridCoordinate, NormalizedSample};
use gaze_grid_input::{Capability, InputEvent, InputMode, InputState, Rect, TiltRefused};

use crate::surface::{DiagnosticOverlay, DisplaySurface};

/// Result of one quantize + encode + display cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GazeFrame {
    pub coordinate: GridCoordinate,
    pub asset_id: AssetId,
    /// What the display surface was given
    pub path: String,
    /// Human readable summary, also sent to the overlay
    pub status: String,
    pub mode: InputMode,
}

/// Gaze state for a single image on screen
pub struct GazeTracker {
    input: InputState,
    rect: Rect,
    quantizer: GazeQuantizer,
    base_path: String,
    debug_overlay: bool,
    surface: Box<dyn DisplaySurface>,
    overlay: Option<Box<dyn DiagnosticOverlay>>,
    last_frame: Option<GazeFrame>,
}

impl std::fmt::Debug for GazeTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GazeTracker")
            .field("input", &self.input)
            .field("rect", &self.rect)
            .field("quantizer", &self.quantizer)
            .field("base_path", &self.base_path)
            .field("last_frame", &self.last_frame)
            .finish_non_exhaustive()
    }
}

impl GazeTracker {
    /// Create a tracker measuring pointer input against `rect`.
    ///
    /// The configuration is validated here, so a bad grid fails at startup
    /// rather than on the first event.
    pub fn new(
        config: &GazeConfig,
        rect: Rect,
        surface: Box<dyn DisplaySurface>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            input: InputState::new(config.tilt_sensitivity),
            rect,
            quantizer: config.quantizer()?,
            base_path: config.asset_base_path.clone(),
            debug_overlay: config.debug_overlay,
            surface,
            overlay: None,
            last_frame: None,
        })
    }

    /// Attach a diagnostic overlay. It only receives text when
    /// `debug_overlay` is enabled in the configuration
    pub fn with_overlay(mut self, overlay: Box<dyn DiagnosticOverlay>) -> Self {
        self.overlay = Some(overlay);
        self
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    /// Update the reference rectangle, e.g. after layout or scroll
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub fn quantizer(&self) -> &GazeQuantizer {
        &self.quantizer
    }

    pub fn mode(&self) -> InputMode {
        self.input.mode()
    }

    pub fn is_tilt_enabled(&self) -> bool {
        self.input.is_tilt_enabled()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn last_frame(&self) -> Option<&GazeFrame> {
        self.last_frame.as_ref()
    }

    pub fn enable_tilt(&mut self, capability: Capability) -> Result<(), TiltRefused> {
        self.input.enable_tilt(capability)
    }

    pub fn disable_tilt(&mut self) {
        self.input.disable_tilt();
    }

    /// Path handed to the display for `asset_id`
    pub fn resolve_path(&self, asset_id: &AssetId) -> String {
        format!("{}{}", self.base_path, asset_id)
    }

    /// Display the straight-ahead image
    pub fn show_neutral(&mut self) -> GazeFrame {
        self.present(NormalizedSample::CENTER, |asset| format!("neutral | {}", asset))
    }

    /// Run one event through the pipeline.
    ///
    /// Returns `None` for orientation readings while tilt mode is off; every
    /// other event updates the display.
    pub fn handle(&mut self, event: &InputEvent) -> Option<GazeFrame> {
        match *event {
            InputEvent::PointerMove { x, y } | InputEvent::TouchMove { x, y } => {
                let sample = self.input.pointer_sample(&self.rect, x, y);
                Some(self.present(sample, |asset| format!("x: {:.0}, y: {:.0} | {}", x, y, asset)))
            }
            InputEvent::Orientation(reading) => {
                let Some(tilt) = self.input.orientation_sample(&reading) else {
                    trace!("Ignoring orientation reading outside tilt mode");
                    return None;
                };
                Some(self.present(tilt.sample, |asset| {
                    format!(
                        "dBeta: {:.1}, dGamma: {:.1} | {}",
                        tilt.delta_beta, tilt.delta_gamma, asset
                    )
                }))
            }
        }
    }

    fn present<F>(&mut self, sample: NormalizedSample, status: F) -> GazeFrame
    where
        F: FnOnce(&AssetId) -> String,
    {
        let target = self.quantizer.target(sample);
        let path = self.resolve_path(&target.asset_id);
        let status = status(&target.asset_id);

        self.surface.show(&path);
        if self.debug_overlay {
            if let Some(overlay) = self.overlay.as_mut() {
                overlay.report(&status);
            }
        }

        if self.last_frame.as_ref().map(|f| f.coordinate) != Some(target.coordinate) {
            debug!(coordinate = %target.coordinate, "Gaze moved");
        }

        let frame = GazeFrame {
            coordinate: target.coordinate,
            asset_id: target.asset_id,
            path,
            status,
            mode: self.input.mode(),
        };
        self.last_frame = Some(frame.clone());
        frame
    }
}
