//! Mapping from normalized samples to grid cells and asset identifiers

use serde::Serialize;

use crate::asset::AssetId;
use crate::grid::{GridCoordinate, GridSpec};
use crate::sample::NormalizedSample;

/// Pixel size of the default pre-rendered asset set
pub const DEFAULT_IMAGE_SIZE: u32 = 256;

/// Snap `(x, y)` onto `grid`. Total: out-of-range and NaN inputs are clamped
pub fn quantize(grid: &GridSpec, x: f64, y: f64) -> GridCoordinate {
    GridCoordinate::new(grid.snap(x), grid.snap(y))
}

/// A quantized sample together with the image that depicts it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GazeTarget {
    pub coordinate: GridCoordinate,
    pub asset_id: AssetId,
}

/// Stateless quantizer bound to one grid and one asset size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GazeQuantizer {
    grid: GridSpec,
    image_size: u32,
}

impl Default for GazeQuantizer {
    fn default() -> Self {
        Self::new(GridSpec::default(), DEFAULT_IMAGE_SIZE)
    }
}

impl GazeQuantizer {
    /// `image_size` must be positive, see [`AssetId::encode`]
    pub fn new(grid: GridSpec, image_size: u32) -> Self {
        Self { grid, image_size }
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn image_size(&self) -> u32 {
        self.image_size
    }

    pub fn quantize(&self, x: f64, y: f64) -> GridCoordinate {
        quantize(&self.grid, x, y)
    }

    pub fn quantize_sample(&self, sample: NormalizedSample) -> GridCoordinate {
        self.quantize(sample.x(), sample.y())
    }

    pub fn encode(&self, coordinate: GridCoordinate) -> AssetId {
        AssetId::encode(coordinate, self.image_size)
    }

    /// Quantize and encode in one step
    pub fn target(&self, sample: NormalizedSample) -> GazeTarget {
        let coordinate = self.quantize_sample(sample);
        GazeTarget {
            coordinate,
            asset_id: self.encode(coordinate),
        }
    }

    /// Every asset the grid can select, in [`GridSpec::cells`] order
    pub fn manifest(&self) -> Vec<AssetId> {
        self.grid.cells().map(|cell| self.encode(cell)).collect()
    }
}
