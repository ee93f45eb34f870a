use std::path::PathBuf;

use gaze_grid_core::GridError;

/// Errors raised while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid grid: {0}")]
    InvalidGrid(#[from] GridError),

    #[error("image_size must be positive")]
    InvalidImageSize,

    #[error("tilt_sensitivity must be a positive number, got {0}")]
    InvalidSensitivity(f64),

    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
