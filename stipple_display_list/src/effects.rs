// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shaders, filters and images attached to display-list paint state.

use std::sync::Arc;

use stipple_canvas::{Matrix, RuntimeStage, SceneNode, Texture};

use crate::{
    DisplayListError, DlBlendMode, DlBlurStyle, DlColor, DlImageSampling, DlMatrix, DlPoint,
    DlTileMode,
};

/// An image as seen by a display list.
///
/// The GPU texture may not have been realized yet; draws that need it skip
/// silently when it is missing.
#[derive(Clone, Debug, PartialEq)]
pub struct DlImage {
    texture: Option<Arc<Texture>>,
    width: u32,
    height: u32,
}

impl DlImage {
    /// An image backed by a realized texture.
    pub fn from_texture(texture: Arc<Texture>) -> Self {
        Self {
            width: texture.width(),
            height: texture.height(),
            texture: Some(texture),
        }
    }

    /// An image whose texture has not been realized.
    pub fn unrealized(width: u32, height: u32) -> Self {
        Self {
            texture: None,
            width,
            height,
        }
    }

    /// The realized texture, if any.
    pub fn texture(&self) -> Option<&Arc<Texture>> {
        self.texture.as_ref()
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Validated gradient colors and stop offsets.
#[derive(Clone, Debug, PartialEq)]
pub struct DlGradientStops {
    colors: Vec<DlColor>,
    stops: Vec<f32>,
}

impl DlGradientStops {
    /// Pair colors with offsets.
    ///
    /// Requires at least two stops, one color per stop, and finite offsets in
    /// `[0, 1]` that never decrease. Offsets need not start at `0` or end at
    /// `1`.
    pub fn new(colors: Vec<DlColor>, stops: Vec<f32>) -> Result<Self, DisplayListError> {
        if colors.len() != stops.len() {
            return Err(DisplayListError::StopCountMismatch {
                colors: colors.len(),
                stops: stops.len(),
            });
        }
        if stops.len() < 2 {
            return Err(DisplayListError::TooFewStops(stops.len()));
        }
        let mut previous = 0.0_f32;
        for (index, &value) in stops.iter().enumerate() {
            if !(0.0..=1.0).contains(&value) || value < previous {
                return Err(DisplayListError::InvalidStop { index, value });
            }
            previous = value;
        }
        Ok(Self { colors, stops })
    }

    /// Evenly spaced stops from `0` to `1`.
    pub fn evenly_spaced(colors: Vec<DlColor>) -> Result<Self, DisplayListError> {
        if colors.len() < 2 {
            return Err(DisplayListError::TooFewStops(colors.len()));
        }
        let last = (colors.len() - 1) as f32;
        let stops = (0..colors.len()).map(|i| i as f32 / last).collect();
        Self::new(colors, stops)
    }

    /// Colors, one per stop.
    pub fn colors(&self) -> &[DlColor] {
        &self.colors
    }

    /// Stop offsets.
    pub fn stops(&self) -> &[f32] {
        &self.stops
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if there are no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

/// A texture used as a shader.
#[derive(Clone, Debug, PartialEq)]
pub struct DlImageColorSource {
    /// Source image.
    pub image: DlImage,
    /// Horizontal tiling.
    pub horizontal_tile_mode: DlTileMode,
    /// Vertical tiling.
    pub vertical_tile_mode: DlTileMode,
    /// Sampling quality.
    pub sampling: DlImageSampling,
    /// Local transform.
    pub matrix: DlMatrix,
}

/// Gradient along a line.
#[derive(Clone, Debug, PartialEq)]
pub struct DlLinearGradient {
    /// Where the first stop lies.
    pub start_point: DlPoint,
    /// Where the last stop lies.
    pub end_point: DlPoint,
    /// Color ramp.
    pub stops: DlGradientStops,
    /// Behavior outside the segment.
    pub tile_mode: DlTileMode,
    /// Local transform.
    pub matrix: DlMatrix,
}

/// Gradient radiating from a center.
#[derive(Clone, Debug, PartialEq)]
pub struct DlRadialGradient {
    /// Circle center.
    pub center: DlPoint,
    /// Circle radius.
    pub radius: f32,
    /// Color ramp.
    pub stops: DlGradientStops,
    /// Behavior outside the circle.
    pub tile_mode: DlTileMode,
    /// Local transform.
    pub matrix: DlMatrix,
}

/// Gradient between two circles.
#[derive(Clone, Debug, PartialEq)]
pub struct DlConicalGradient {
    /// Center of the start circle.
    pub start_center: DlPoint,
    /// Radius of the start circle.
    pub start_radius: f32,
    /// Center of the end circle.
    pub end_center: DlPoint,
    /// Radius of the end circle.
    pub end_radius: f32,
    /// Color ramp.
    pub stops: DlGradientStops,
    /// Behavior outside the cone.
    pub tile_mode: DlTileMode,
    /// Local transform.
    pub matrix: DlMatrix,
}

/// Angular gradient around a center.
#[derive(Clone, Debug, PartialEq)]
pub struct DlSweepGradient {
    /// Center.
    pub center: DlPoint,
    /// Start angle in degrees.
    pub start: f32,
    /// End angle in degrees.
    pub end: f32,
    /// Color ramp.
    pub stops: DlGradientStops,
    /// Behavior outside the angle range.
    pub tile_mode: DlTileMode,
    /// Local transform.
    pub matrix: DlMatrix,
}

/// A user shader program.
#[derive(Clone, Debug, PartialEq)]
pub struct DlRuntimeEffect {
    /// Compiled program.
    pub runtime_stage: Arc<RuntimeStage>,
    /// Packed uniform bytes.
    pub uniform_data: Arc<[u8]>,
    /// Bound child shaders, in binding order. `None` marks an unbound slot.
    pub samplers: Vec<Option<Arc<DlColorSource>>>,
}

/// A 3D scene used as a shader.
#[derive(Clone, Debug, PartialEq)]
pub struct DlSceneSource {
    /// Scene root.
    pub scene_node: Arc<SceneNode>,
    /// Camera transform (column-major).
    pub camera_matrix: Matrix,
}

/// What paints a shape.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum DlColorSource {
    /// A solid color.
    Color(DlColor),
    /// A texture.
    Image(DlImageColorSource),
    /// A linear gradient.
    LinearGradient(DlLinearGradient),
    /// A radial gradient.
    RadialGradient(DlRadialGradient),
    /// A two-point conical gradient.
    ConicalGradient(DlConicalGradient),
    /// A sweep gradient.
    SweepGradient(DlSweepGradient),
    /// A runtime effect.
    RuntimeEffect(DlRuntimeEffect),
    /// A 3D scene.
    Scene(DlSceneSource),
}

/// A per-pixel color transformation.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum DlColorFilter {
    /// Blend a constant color over the input.
    Blend {
        /// Constant (source) color.
        color: DlColor,
        /// Blend operator.
        mode: DlBlendMode,
    },
    /// 4x5 row-major color matrix.
    Matrix([f32; 20]),
    /// Decode sRGB to linear.
    SrgbToLinearGamma,
    /// Encode linear to sRGB.
    LinearToSrgbGamma,
}

/// A filter applied to rendered content.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum DlImageFilter {
    /// Gaussian blur.
    Blur {
        /// Horizontal standard deviation.
        sigma_x: f32,
        /// Vertical standard deviation.
        sigma_y: f32,
        /// Edge behavior.
        tile_mode: DlTileMode,
    },
    /// Grow coverage.
    Dilate {
        /// Horizontal radius.
        radius_x: f32,
        /// Vertical radius.
        radius_y: f32,
    },
    /// Shrink coverage.
    Erode {
        /// Horizontal radius.
        radius_x: f32,
        /// Vertical radius.
        radius_y: f32,
    },
    /// Resample through a transform.
    Matrix {
        /// Transform.
        matrix: DlMatrix,
        /// Sampling quality.
        sampling: DlImageSampling,
    },
    /// Apply `inner`, then `outer`.
    Compose {
        /// Applied second.
        outer: Option<Arc<DlImageFilter>>,
        /// Applied first.
        inner: Option<Arc<DlImageFilter>>,
    },
    /// A color filter used as an image filter.
    ColorFilter(DlColorFilter),
    /// Evaluate a filter in a transformed space.
    LocalMatrix {
        /// Local transform.
        matrix: DlMatrix,
        /// Wrapped filter.
        filter: Arc<DlImageFilter>,
    },
}

/// A filter on draw coverage.
#[derive(Copy, Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum DlMaskFilter {
    /// Blur coverage.
    Blur {
        /// Blur style.
        style: DlBlurStyle,
        /// Standard deviation.
        sigma: f32,
    },
}

/// A transformation of path geometry before stroking or filling.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum DlPathEffect {
    /// Dashing.
    Dash {
        /// Alternating on/off lengths.
        intervals: Vec<f32>,
        /// Offset into the intervals.
        phase: f32,
    },
}
