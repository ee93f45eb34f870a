//! Gaze grid bounds and coordinates

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default lowest grid value on each axis
pub const DEFAULT_MIN: i32 = -15;
/// Default highest grid value on each axis
pub const DEFAULT_MAX: i32 = 15;
/// Default distance between neighbouring grid values
pub const DEFAULT_STEP: i32 = 3;

/// Errors raised while building a [`GridSpec`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid step must be positive, got {0}")]
    NonPositiveStep(i32),

    #[error("grid minimum {min} must be below maximum {max}")]
    EmptyRange { min: i32, max: i32 },

    #[error("grid span {span} ({min}..={max}) is not divisible by step {step}")]
    UnevenSpan {
        min: i32,
        max: i32,
        step: i32,
        span: i64,
    },
}

pub type Result<T> = std::result::Result<T, GridError>;

/// A snapped gaze direction, one pre-rendered image per value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoordinate {
    /// Horizontal gaze, negative looks left
    pub px: i32,
    /// Vertical gaze, negative looks down
    pub py: i32,
}

impl GridCoordinate {
    pub const fn new(px: i32, py: i32) -> Self {
        Self { px, py }
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.px, self.py)
    }
}

/// Validated grid bounds.
///
/// The lattice on each axis is `{min, min + step, ..., max}`. A `GridSpec`
/// can only be built through [`GridSpec::new`], so `max - min` is always a
/// positive multiple of `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridSpec {
    min: i32,
    max: i32,
    step: i32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            step: DEFAULT_STEP,
        }
    }
}

impl GridSpec {
    /// Build a grid, rejecting bounds that break the lattice invariant
    pub fn new(min: i32, max: i32, step: i32) -> Result<Self> {
        if step <= 0 {
            return Err(GridError::NonPositiveStep(step));
        }
        if min >= max {
            return Err(GridError::EmptyRange { min, max });
        }
        let span = i64::from(max) - i64::from(min);
        if span % i64::from(step) != 0 {
            return Err(GridError::UnevenSpan {
                min,
                max,
                step,
                span,
            });
        }
        Ok(Self { min, max, step })
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn step(&self) -> i32 {
        self.step
    }

    /// Distance between the outermost values
    pub fn span(&self) -> i64 {
        i64::from(self.max) - i64::from(self.min)
    }

    /// Offset of the lattice from the multiples of `step`
    pub fn phase(&self) -> i32 {
        self.min.rem_euclid(self.step)
    }

    /// Number of values per axis
    pub fn len(&self) -> usize {
        (self.span() / i64::from(self.step)) as usize + 1
    }

    /// Always false, a valid grid holds at least two values per axis
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `value` lies on the lattice
    pub fn contains(&self, value: i32) -> bool {
        value >= self.min
            && value <= self.max
            && (i64::from(value) - i64::from(self.min)) % i64::from(self.step) == 0
    }

    /// Axis values in ascending order
    pub fn values(&self) -> impl DoubleEndedIterator<Item = i32> {
        let (min, step) = (i64::from(self.min), i64::from(self.step));
        // Every value lies in [min, max], so narrowing back never truncates
        (0..self.len()).map(move |i| (min + i as i64 * step) as i32)
    }

    /// Every cell, top row first (py descending), px ascending within a row
    pub fn cells(&self) -> impl Iterator<Item = GridCoordinate> {
        let grid = *self;
        grid.values()
            .rev()
            .flat_map(move |py| grid.values().map(move |px| GridCoordinate::new(px, py)))
    }

    /// Map one normalized axis value onto the lattice.
    ///
    /// NaN is read as 0. Ties round half away from zero, measured from the
    /// lattice phase, so the default grid snaps `raw / step` with plain
    /// `f64::round`.
    pub fn snap(&self, value: f64) -> i32 {
        let v = crate::sample::normalize_axis(value);
        let step = f64::from(self.step);
        let phase = f64::from(self.phase());

        // Equals `min + (v + 1) * span / 2`; the centred form keeps
        // snap(-v) == -snap(v) on grids symmetric around zero
        let mid = (f64::from(self.min) + f64::from(self.max)) / 2.0;
        let raw = mid + v * self.span() as f64 / 2.0;
        let snapped = ((raw - phase) / step).round() * step + phase;

        // `as` saturates, the clamp pulls extreme rounding back onto the grid
        (snapped as i32).clamp(self.min, self.max)
    }
}

impl fmt::Display for GridSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={} step {}", self.min, self.max, self.step)
    }
}
