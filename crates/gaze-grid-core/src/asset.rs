//! Asset identifiers for pre-rendered gaze images.
//!
//! The naming scheme is fixed by the asset generator:
//! `gaze_px<px>_py<py>_<size>.webp`, where each coordinate is printed with
//! one fractional digit, `-` becomes `m` and `.` becomes `p`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::GridCoordinate;

const PREFIX: &str = "gaze_px";
const Y_MARKER: &str = "_py";
const EXTENSION: &str = ".webp";

/// Errors raised by [`AssetId::parse`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseAssetIdError {
    #[error("asset id must start with `gaze_px`: {0}")]
    MissingPrefix(String),

    #[error("asset id must end with `.webp`: {0}")]
    MissingExtension(String),

    #[error("asset id has no `{field}` component: {input}")]
    MissingComponent { field: &'static str, input: String },

    #[error("invalid {field} component `{value}`")]
    InvalidComponent { field: &'static str, value: String },

    #[error("invalid image size `{0}`")]
    InvalidSize(String),
}

/// Filename of one pre-rendered gaze image
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    /// Derive the identifier for a grid cell at a given image size.
    ///
    /// `size` must be positive. The asset set has no zero-sized images and
    /// [`AssetId::parse`] rejects a `0` size, so callers validate it first
    /// (`GazeConfig::validate`, the `--size` flag of the CLI).
    pub fn encode(coord: GridCoordinate, size: u32) -> Self {
        Self(format!(
            "{PREFIX}{}{Y_MARKER}{}_{size}{EXTENSION}",
            encode_component(coord.px),
            encode_component(coord.py),
        ))
    }

    /// Recover the grid cell and image size from an identifier.
    ///
    /// Only the exact output of [`AssetId::encode`] is accepted, so the
    /// mapping stays one-to-one in both directions.
    pub fn parse(input: &str) -> Result<(GridCoordinate, u32), ParseAssetIdError> {
        let rest = input
            .strip_prefix(PREFIX)
            .ok_or_else(|| ParseAssetIdError::MissingPrefix(input.to_string()))?;
        let rest = rest
            .strip_suffix(EXTENSION)
            .ok_or_else(|| ParseAssetIdError::MissingExtension(input.to_string()))?;

        let (px, rest) = rest
            .split_once(Y_MARKER)
            .ok_or_else(|| ParseAssetIdError::MissingComponent {
                field: "py",
                input: input.to_string(),
            })?;
        let (py, size) = rest
            .rsplit_once('_')
            .ok_or_else(|| ParseAssetIdError::MissingComponent {
                field: "size",
                input: input.to_string(),
            })?;

        let px = decode_component("px", px)?;
        let py = decode_component("py", py)?;
        let size = decode_size(size)?;

        Ok((GridCoordinate::new(px, py), size))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AssetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Shorthand for [`AssetId::encode`], with the same positive `size`
/// requirement
pub fn encode(px: i32, py: i32, size: u32) -> AssetId {
    AssetId::encode(GridCoordinate::new(px, py), size)
}

fn encode_component(value: i32) -> String {
    format!("{:.1}", f64::from(value))
        .replace('-', "m")
        .replace('.', "p")
}

fn decode_component(field: &'static str, value: &str) -> Result<i32, ParseAssetIdError> {
    let invalid = || ParseAssetIdError::InvalidComponent {
        field,
        value: value.to_string(),
    };

    let (negative, body) = match value.strip_prefix('m') {
        Some(body) => (true, body),
        None => (false, value),
    };
    let (whole, fraction) = body.split_once('p').ok_or_else(invalid)?;
    if fraction != "0" || whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let magnitude: i64 = whole.parse().map_err(|_| invalid())?;
    let signed = if negative { -magnitude } else { magnitude };
    let decoded = i32::try_from(signed).map_err(|_| invalid())?;

    // Rejects `m0p0`, leading zeros and anything else encode never emits
    if encode_component(decoded) != value {
        return Err(invalid());
    }
    Ok(decoded)
}

fn decode_size(value: &str) -> Result<u32, ParseAssetIdError> {
    let invalid = || ParseAssetIdError::InvalidSize(value.to_string());
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let size: u32 = value.parse().map_err(|_| invalid())?;
    if size == 0 || size.to_string() != value {
        return Err(invalid());
    }
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSpec;

    #[test]
    fn test_encode_center() {
        assert_eq!(encode(0, 0, 256).as_str(), "gaze_px0p0_py0p0_256.webp");
    }

    #[test]
    fn test_encode_signs() {
        assert_eq!(encode(-3, 15, 256).as_str(), "gaze_pxm3p0_py15p0_256.webp");
        assert_eq!(encode(12, -15, 512).as_str(), "gaze_px12p0_pym15p0_512.webp");
    }

    #[test]
    fn test_parse_inverts_encode_on_every_cell() {
        let grid = GridSpec::default();
        for cell in grid.cells() {
            let id = AssetId::encode(cell, 256);
            assert_eq!(AssetId::parse(id.as_str()), Ok((cell, 256)));
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            AssetId::parse("face_px0p0_py0p0_256.webp"),
            Err(ParseAssetIdError::MissingPrefix(_))
        ));
        assert!(matches!(
            AssetId::parse("gaze_px0p0_py0p0_256.png"),
            Err(ParseAssetIdError::MissingExtension(_))
        ));
        assert!(matches!(
            AssetId::parse("gaze_px0p0_256.webp"),
            Err(ParseAssetIdError::MissingComponent { field: "py", .. })
        ));
        assert!(matches!(
            AssetId::parse("gaze_pxm0p0_py0p0_256.webp"),
            Err(ParseAssetIdError::InvalidComponent { field: "px", .. })
        ));
        assert!(matches!(
            AssetId::parse("gaze_px03p0_py0p0_256.webp"),
            Err(ParseAssetIdError::InvalidComponent { field: "px", .. })
        ));
        assert!(matches!(
            AssetId::parse("gaze_px3p5_py0p0_256.webp"),
            Err(ParseAssetIdError::InvalidComponent { field: "px", .. })
        ));
        assert!(matches!(
            AssetId::parse("gaze_px3p0_py0p0_0256.webp"),
            Err(ParseAssetIdError::InvalidSize(_))
        ));
        assert!(matches!(
            AssetId::parse("gaze_px3p0_py0p0_0.webp"),
            Err(ParseAssetIdError::InvalidSize(_))
        ));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = encode(3, -3, 256);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"gaze_px3p0_pym3p0_256.webp\"");
    }
}
