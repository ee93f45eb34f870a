//! gaze-grid-config: configuration for gaze trackers
//!
//! Settings come from a TOML file, then environment overrides, and are
//! validated once at load time so a broken grid never reaches the tracker.

mod env;
mod error;

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use gaze_grid_core::{GazeQuantizer, GridSpec, DEFAULT_IMAGE_SIZE, DEFAULT_MAX, DEFAULT_MIN, DEFAULT_STEP};
use gaze_grid_input::DEFAULT_TILT_SENSITIVITY;

pub use env::{
    ASSET_BASE_PATH_VAR, CONFIG_PATH_VAR, DEBUG_OVERLAY_VAR, IMAGE_SIZE_VAR, TILT_SENSITIVITY_VAR,
};
pub use error::{ConfigError, Result};

/// Default prefix joined in front of every asset id
pub const DEFAULT_ASSET_BASE_PATH: &str = "/faces/";

const CONFIG_FILE_NAME: &str = "config.toml";

/// Grid bounds as written in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub min: i32,
    pub max: i32,
    pub step: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            step: DEFAULT_STEP,
        }
    }
}

/// Settings shared by every tracked display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GazeConfig {
    /// Prefix for resolved asset paths, e.g. `/faces/`
    pub asset_base_path: String,
    /// Forward status lines to the diagnostic overlay
    pub debug_overlay: bool,
    /// Pixel size of the pre-rendered square images
    pub image_size: u32,
    /// Degrees of tilt for full deflection
    pub tilt_sensitivity: f64,
    pub grid: GridConfig,
}

impl Default for GazeConfig {
    fn default() -> Self {
        Self {
            asset_base_path: DEFAULT_ASSET_BASE_PATH.to_string(),
            debug_overlay: false,
            image_size: DEFAULT_IMAGE_SIZE,
            tilt_sensitivity: DEFAULT_TILT_SENSITIVITY,
            grid: GridConfig::default(),
        }
    }
}

impl GazeConfig {
    /// Platform config location, e.g. `~/.config/gaze-grid/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "gaze-grid").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Parse TOML. Missing keys fall back to defaults; nothing is validated
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Read and parse a config file without validating it
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve, override and validate the effective configuration.
    ///
    /// The file is taken from `explicit`, then `GAZE_GRID_CONFIG`, then the
    /// platform config dir; defaults apply when none of them exists. A file
    /// named by argument or environment that cannot be read is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from));

        let path = match named {
            Some(path) => Some(path),
            None => Self::default_path().filter(|path| path.exists()),
        };

        let mut config = match path {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                Self::from_file(&path)?
            }
            None => {
                debug!("No configuration file found, using defaults");
                Self::default()
            }
        };

        env::apply_overrides(&mut config, |key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Check every invariant the tracker relies on
    pub fn validate(&self) -> Result<()> {
        self.grid_spec()?;
        if self.image_size == 0 {
            return Err(ConfigError::InvalidImageSize);
        }
        if !self.tilt_sensitivity.is_finite() || self.tilt_sensitivity <= 0.0 {
            return Err(ConfigError::InvalidSensitivity(self.tilt_sensitivity));
        }
        Ok(())
    }

    pub fn grid_spec(&self) -> Result<GridSpec> {
        Ok(GridSpec::new(self.grid.min, self.grid.max, self.grid.step)?)
    }

    /// Quantizer for the configured grid and image size
    pub fn quantizer(&self) -> Result<GazeQuantizer> {
        Ok(GazeQuantizer::new(self.grid_spec()?, self.image_size))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaze_grid_core::GridError;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn clear_env() {
        for var in [
            CONFIG_PATH_VAR,
            ASSET_BASE_PATH_VAR,
            DEBUG_OVERLAY_VAR,
            IMAGE_SIZE_VAR,
            TILT_SENSITIVITY_VAR,
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_defaults() {
        let config = GazeConfig::default();
        assert_eq!(config.asset_base_path, "/faces/");
        assert!(!config.debug_overlay);
        assert_eq!(config.tilt_sensitivity, 30.0);
        assert_eq!(config.grid, GridConfig { min: -15, max: 15, step: 3 });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GazeConfig::from_toml_str(
            r#"
            debug_overlay = true

            [grid]
            step = 5
            "#,
        )
        .unwrap();
        assert!(config.debug_overlay);
        assert_eq!(config.asset_base_path, "/faces/");
        assert_eq!(config.grid, GridConfig { min: -15, max: 15, step: 5 });
        assert_eq!(config.grid_spec().unwrap().len(), 7);
    }

    #[test]
    fn test_validate_rejects_uneven_grid() {
        let mut config = GazeConfig::default();
        config.grid.step = 4;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidGrid(GridError::UnevenSpan { .. }))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_scalars() {
        let mut config = GazeConfig::default();
        config.image_size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidImageSize)));

        let mut config = GazeConfig::default();
        config.tilt_sensitivity = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidSensitivity(_))));

        config.tilt_sensitivity = f64::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidSensitivity(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = GazeConfig::default();
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("asset_base_path = \"/faces/\""));
        assert_eq!(GazeConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    #[serial]
    fn test_load_explicit_file_with_env_override() {
        clear_env();
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "image_size = 128\nasset_base_path = \"/eyes/\"").unwrap();

        std::env::set_var(ASSET_BASE_PATH_VAR, "/override/");
        let config = GazeConfig::load(Some(file.path())).unwrap();
        clear_env();

        assert_eq!(config.image_size, 128);
        assert_eq!(config.asset_base_path, "/override/");
    }

    #[test]
    #[serial]
    fn test_load_from_env_path() {
        clear_env();
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "tilt_sensitivity = 20.0").unwrap();

        std::env::set_var(CONFIG_PATH_VAR, file.path());
        let config = GazeConfig::load(None).unwrap();
        clear_env();

        assert_eq!(config.tilt_sensitivity, 20.0);
    }

    #[test]
    #[serial]
    fn test_load_missing_explicit_file_fails() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            GazeConfig::load(Some(&missing)),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    #[serial]
    fn test_load_rejects_invalid_file() {
        clear_env();
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[grid]\nmin = 0\nmax = 10\nstep = 3").unwrap();
        assert!(matches!(
            GazeConfig::load(Some(file.path())),
            Err(ConfigError::InvalidGrid(_))
        ));

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "image_size = \"big\"").unwrap();
        assert!(matches!(
            GazeConfig::load(Some(file.path())),
            Err(ConfigError::Parse { .. })
        ));
    }
}
