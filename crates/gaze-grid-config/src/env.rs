//! Environment variable overrides

use crate::error::{ConfigError, Result};
use crate::GazeConfig;

/// Points at a config file, taking precedence over the platform default
pub const CONFIG_PATH_VAR: &str = "GAZE_GRID_CONFIG";
pub const ASSET_BASE_PATH_VAR: &str = "GAZE_GRID_ASSET_BASE_PATH";
pub const DEBUG_OVERLAY_VAR: &str = "GAZE_GRID_DEBUG_OVERLAY";
pub const IMAGE_SIZE_VAR: &str = "GAZE_GRID_IMAGE_SIZE";
pub const TILT_SENSITIVITY_VAR: &str = "GAZE_GRID_TILT_SENSITIVITY";

/// Apply overrides read through `lookup`, which returns a variable's value
/// if it is set
pub(crate) fn apply_overrides<F>(config: &mut GazeConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = lookup(ASSET_BASE_PATH_VAR) {
        config.asset_base_path = path;
    }
    if let Some(value) = lookup(DEBUG_OVERLAY_VAR) {
        config.debug_overlay = parse_bool(DEBUG_OVERLAY_VAR, &value)?;
    }
    if let Some(value) = lookup(IMAGE_SIZE_VAR) {
        config.image_size = value.trim().parse().map_err(|_| invalid(IMAGE_SIZE_VAR, &value))?;
    }
    if let Some(value) = lookup(TILT_SENSITIVITY_VAR) {
        config.tilt_sensitivity = value
            .trim()
            .parse()
            .map_err(|_| invalid(TILT_SENSITIVITY_VAR, &value))?;
    }
    Ok(())
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(var, value)),
    }
}

fn invalid(var: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidEnv {
        var,
        value: value.to_string(),
    }
}
