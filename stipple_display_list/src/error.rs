// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Rejected producer data.
///
/// Display-list values validate their invariants when constructed; consumers
/// can rely on them afterwards.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DisplayListError {
    /// A gradient needs at least two stops.
    #[error("gradient has {0} stops, at least 2 are required")]
    TooFewStops(usize),

    /// Gradient colors and stops are parallel arrays.
    #[error("gradient has {colors} colors but {stops} stops")]
    StopCountMismatch {
        /// Number of colors.
        colors: usize,
        /// Number of stops.
        stops: usize,
    },

    /// Stops must be finite, within `[0, 1]`, and non-decreasing.
    #[error("gradient stop {index} ({value}) is out of order or outside [0, 1]")]
    InvalidStop {
        /// Offending stop index.
        index: usize,
        /// Offending value.
        value: f32,
    },

    /// A per-vertex attribute array does not match the position count.
    #[error("vertex {attribute} has {actual} entries, expected {expected}")]
    VertexAttributeMismatch {
        /// Attribute name.
        attribute: &'static str,
        /// Number of positions.
        expected: usize,
        /// Number of attribute entries.
        actual: usize,
    },

    /// A vertex index refers past the end of the position array.
    #[error("vertex index {index} out of range for {count} vertices")]
    VertexIndexOutOfRange {
        /// Offending index.
        index: u16,
        /// Number of positions.
        count: usize,
    },

    /// Atlas transforms, texture rects and colors are parallel arrays.
    #[error("atlas has {transforms} transforms but {actual} {attribute}")]
    AtlasAttributeMismatch {
        /// Attribute name.
        attribute: &'static str,
        /// Number of transforms.
        transforms: usize,
        /// Number of attribute entries.
        actual: usize,
    },
}
