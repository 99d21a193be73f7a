// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color sources: what paints each point of a filled or stroked region.

use std::sync::Arc;

use kurbo::Point;
use peniko::Color;

use crate::{Matrix, RuntimeStage, Texture};
#[cfg(feature = "scene")]
use crate::SceneNode;

/// Behavior of a gradient or image outside of its defined area.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TileMode {
    /// Extend the edge color.
    #[default]
    Clamp,
    /// Repeat the content.
    Repeat,
    /// Repeat the content, mirroring every other tile.
    Mirror,
    /// Transparent outside the content.
    Decal,
}

/// Texel filtering used for minification and magnification.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MinMagFilter {
    /// Nearest texel.
    #[default]
    Nearest,
    /// Bilinear interpolation.
    Linear,
}

/// Filtering between mip levels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MipFilter {
    /// Nearest mip level.
    #[default]
    Nearest,
    /// Interpolate between mip levels.
    Linear,
}

/// How a texture is sampled.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SamplerDescriptor {
    /// Debug label.
    pub label: &'static str,
    /// Minification filter.
    pub min_filter: MinMagFilter,
    /// Magnification filter.
    pub mag_filter: MinMagFilter,
    /// Mip filter.
    pub mip_filter: MipFilter,
}

/// An angle in degrees.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Degrees(pub f32);

impl Degrees {
    /// The angle in radians.
    pub fn to_radians(self) -> f64 {
        f64::from(self.0).to_radians()
    }
}

/// Normalized gradient color ramp.
///
/// Holds parallel color and stop lists. Producers are expected to have
/// normalized the stops so the first is `0.0` and the last is `1.0`.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientStops {
    colors: Vec<Color>,
    stops: Vec<f32>,
}

impl GradientStops {
    /// Pair colors with stop offsets.
    pub fn new(colors: Vec<Color>, stops: Vec<f32>) -> Self {
        debug_assert_eq!(colors.len(), stops.len(), "one stop per color");
        Self { colors, stops }
    }

    /// Colors, one per stop.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Stop offsets in `[0, 1]`.
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

/// A texture bound to a runtime effect, in sampler order.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureInput {
    /// How the texture is sampled.
    pub sampler_descriptor: SamplerDescriptor,
    /// The bound texture.
    pub texture: Arc<Texture>,
}

/// Discriminant of a [`ColorSource`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[expect(missing_docs, reason = "mirrors the ColorSource variants")]
pub enum ColorSourceType {
    Color,
    Image,
    LinearGradient,
    RadialGradient,
    ConicalGradient,
    SweepGradient,
    RuntimeEffect,
    Scene,
}

/// What paints a filled or stroked region.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ColorSource {
    /// The paint's solid color.
    #[default]
    Color,
    /// A texture.
    Image {
        /// Sampled texture.
        texture: Arc<Texture>,
        /// Horizontal tiling.
        x_tile_mode: TileMode,
        /// Vertical tiling.
        y_tile_mode: TileMode,
        /// Sampling parameters.
        sampler: SamplerDescriptor,
        /// Local transform of the image.
        effect_transform: Matrix,
    },
    /// A gradient along a line.
    LinearGradient {
        /// Where stop `0.0` lies.
        start: Point,
        /// Where stop `1.0` lies.
        end: Point,
        /// Color ramp.
        stops: GradientStops,
        /// Behavior outside the segment.
        tile_mode: TileMode,
        /// Local transform of the gradient.
        effect_transform: Matrix,
    },
    /// A gradient radiating from a center.
    RadialGradient {
        /// Center of the circle.
        center: Point,
        /// Radius at which stop `1.0` lies.
        radius: f64,
        /// Color ramp.
        stops: GradientStops,
        /// Behavior outside the circle.
        tile_mode: TileMode,
        /// Local transform of the gradient.
        effect_transform: Matrix,
    },
    /// A two-point conical gradient.
    ConicalGradient {
        /// Center of the end circle.
        center: Point,
        /// Radius of the end circle.
        radius: f64,
        /// Center of the start (focal) circle.
        focus_center: Point,
        /// Radius of the start (focal) circle.
        focus_radius: f64,
        /// Color ramp.
        stops: GradientStops,
        /// Behavior outside the cone.
        tile_mode: TileMode,
        /// Local transform of the gradient.
        effect_transform: Matrix,
    },
    /// An angular gradient around a center.
    SweepGradient {
        /// Center of rotation.
        center: Point,
        /// Angle at which stop `0.0` lies.
        start_angle: Degrees,
        /// Angle at which stop `1.0` lies.
        end_angle: Degrees,
        /// Color ramp.
        stops: GradientStops,
        /// Behavior outside the angle range.
        tile_mode: TileMode,
        /// Local transform of the gradient.
        effect_transform: Matrix,
    },
    /// A runtime shader.
    RuntimeEffect {
        /// Compiled program.
        runtime_stage: Arc<RuntimeStage>,
        /// Packed uniform values.
        uniform_data: Arc<[u8]>,
        /// Bound textures in sampler order.
        texture_inputs: Vec<TextureInput>,
    },
    /// A 3D scene rendered through a camera.
    #[cfg(feature = "scene")]
    Scene {
        /// Scene graph root.
        scene_node: Arc<SceneNode>,
        /// Camera transform.
        camera_transform: Matrix,
    },
}

impl ColorSource {
    /// Discriminant of this source.
    pub fn kind(&self) -> ColorSourceType {
        match self {
            Self::Color => ColorSourceType::Color,
            Self::Image { .. } => ColorSourceType::Image,
            Self::LinearGradient { .. } => ColorSourceType::LinearGradient,
            Self::RadialGradient { .. } => ColorSourceType::RadialGradient,
            Self::ConicalGradient { .. } => ColorSourceType::ConicalGradient,
            Self::SweepGradient { .. } => ColorSourceType::SweepGradient,
            Self::RuntimeEffect { .. } => ColorSourceType::RuntimeEffect,
            #[cfg(feature = "scene")]
            Self::Scene { .. } => ColorSourceType::Scene,
        }
    }

    /// Color ramp of a gradient source.
    pub fn gradient_stops(&self) -> Option<&GradientStops> {
        match self {
            Self::LinearGradient { stops, .. }
            | Self::RadialGradient { stops, .. }
            | Self::ConicalGradient { stops, .. }
            | Self::SweepGradient { stops, .. } => Some(stops),
            _ => None,
        }
    }
}
