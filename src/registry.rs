//! Orchestration over several tracked displays
//!
//! Each tracker keeps its own mode and calibration. The registry only
//! fans global operations out to every tracker it holds.

use std::collections::BTreeMap;

use anyhow::Result;
use tracing::{info, warn};

use gaze_grid_input::{Capability, InputEvent, TiltRefused};

use crate::surface::PermissionGate;
use crate::tracker::{GazeFrame, GazeTracker};

/// Named trackers, iterated in name order
#[derive(Debug, Default)]
pub struct TrackerRegistry {
    trackers: BTreeMap<String, GazeTracker>,
}

impl TrackerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tracker and show its neutral image
    ///
    /// # Returns
    /// * `Ok(())` if registration succeeds
    /// * `Err` if a tracker with the same name already exists
    pub fn register(&mut self, name: impl Into<String>, mut tracker: GazeTracker) -> Result<()> {
        let name = name.into();
        if self.trackers.contains_key(&name) {
            anyhow::bail!("Tracker '{}' already registered", name);
        }
        tracker.show_neutral();
        self.trackers.insert(name, tracker);
        Ok(())
    }

    pub fn unregister(&mut self, name: &str) -> Result<GazeTracker> {
        self.trackers
            .remove(name)
            .ok_or_else(|| anyhow::anyhow!("Tracker '{}' not found", name))
    }

    pub fn get(&self, name: &str) -> Option<&GazeTracker> {
        self.trackers.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut GazeTracker> {
        self.trackers.get_mut(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.trackers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }

    /// Send an event to one tracker
    pub fn dispatch(&mut self, name: &str, event: &InputEvent) -> Result<Option<GazeFrame>> {
        let tracker = self
            .trackers
            .get_mut(name)
            .ok_or_else(|| anyhow::anyhow!("Tracker '{}' not found", name))?;
        Ok(tracker.handle(event))
    }

    /// Send a page-wide event to every tracker, collecting the frames drawn
    pub fn broadcast(&mut self, event: &InputEvent) -> Vec<(String, GazeFrame)> {
        self.trackers
            .iter_mut()
            .filter_map(|(name, tracker)| tracker.handle(event).map(|frame| (name.clone(), frame)))
            .collect()
    }

    /// Ask the gate once, then switch every tracker to tilt if allowed.
    ///
    /// On refusal every tracker stays in pointer mode and the error carries
    /// the notice to show the user.
    pub fn request_tilt(&mut self, gate: &mut dyn PermissionGate) -> Result<(), TiltRefused> {
        let capability = gate.request();
        self.enable_tilt_all(capability)
    }

    pub fn enable_tilt_all(&mut self, capability: Capability) -> Result<(), TiltRefused> {
        if let Err(refused) = capability.check() {
            warn!("Tilt mode unavailable: {}", refused);
            return Err(refused);
        }
        for tracker in self.trackers.values_mut() {
            tracker.enable_tilt(capability)?;
        }
        info!("Tilt mode enabled for {} tracker(s)", self.trackers.len());
        Ok(())
    }

    pub fn disable_tilt_all(&mut self) {
        for tracker in self.trackers.values_mut() {
            tracker.disable_tilt();
        }
    }

    /// Whether any tracker is following device tilt
    pub fn any_tilt_enabled(&self) -> bool {
        self.trackers.values().any(GazeTracker::is_tilt_enabled)
    }
}
