//! gaze-grid-core: quantization of gaze samples onto a pre-rendered image grid
//!
//! The pipeline is three pure steps:
//! - [`NormalizedSample`]: input rescaled to [-1, 1] per axis
//! - [`GazeQuantizer::quantize`]: snap onto the [`GridSpec`] lattice
//! - [`AssetId::encode`]: derive the filename of the matching image
//!
//! Nothing here performs I/O or keeps state between calls.

pub mod asset;
pub mod grid;
pub mod quantizer;
pub mod sample;

pub use asset::{encode, AssetId, ParseAssetIdError};
pub use grid::{GridCoordinate, GridError, GridSpec, DEFAULT_MAX, DEFAULT_MIN, DEFAULT_STEP};
pub use quantizer::{quantize, GazeQuantizer, GazeTarget, DEFAULT_IMAGE_SIZE};
pub use sample::{normalize_axis, NormalizedSample};
