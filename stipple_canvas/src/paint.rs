// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The paint model attached to every canvas draw call.

use kurbo::{Cap, Join};
use peniko::Color;

use crate::{ColorFilter, ColorSource, ImageFilterProc};

/// Whether a shape is filled or stroked.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PaintStyle {
    /// Fill the interior.
    #[default]
    Fill,
    /// Stroke the outline.
    Stroke,
}

/// Blend modes understood by canvases.
///
/// The first fourteen are Porter-Duff operators (plus `Modulate`); the rest
/// are the separable and non-separable "advanced" modes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[expect(missing_docs, reason = "standard compositing operator names")]
pub enum BlendMode {
    Clear,
    Source,
    Destination,
    #[default]
    SourceOver,
    DestinationOver,
    SourceIn,
    DestinationIn,
    SourceOut,
    DestinationOut,
    SourceATop,
    DestinationATop,
    Xor,
    Plus,
    Modulate,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Multiply,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

/// How a mask blur treats the inside and outside of the shape.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlurStyle {
    /// Blurred inside and outside.
    #[default]
    Normal,
    /// Solid inside, blurred outside.
    Solid,
    /// Nothing inside, blurred outside.
    Outer,
    /// Blurred inside, nothing outside.
    Inner,
}

/// Ratio between a blur's kernel radius and its standard deviation.
pub const KERNEL_RADIUS_PER_SIGMA: f32 = 1.732_050_8;

/// Gaussian standard deviation.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Sigma(pub f32);

/// Blur kernel radius.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Radius(pub f32);

impl From<Radius> for Sigma {
    fn from(radius: Radius) -> Self {
        if radius.0 > 0.0 {
            Self(radius.0 / KERNEL_RADIUS_PER_SIGMA + 0.5)
        } else {
            Self(0.0)
        }
    }
}

impl From<Sigma> for Radius {
    fn from(sigma: Sigma) -> Self {
        if sigma.0 > 0.5 {
            Self((sigma.0 - 0.5) * KERNEL_RADIUS_PER_SIGMA)
        } else {
            Self(0.0)
        }
    }
}

/// Mask blur applied to the coverage of a draw.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MaskBlurDescriptor {
    /// Blur style.
    pub style: BlurStyle,
    /// Blur standard deviation in local units.
    pub sigma: Sigma,
}

/// Style attributes applied to a single draw call.
///
/// A `Paint` is a plain value: canvases copy what they need from it and never
/// keep references into the caller's paint.
#[derive(Clone, Debug, PartialEq)]
pub struct Paint {
    /// Solid color, also used as the modulation color for other sources.
    pub color: Color,
    /// What paints the covered region.
    pub color_source: ColorSource,
    /// Whether gradients should be dithered.
    pub dither: bool,
    /// Stroke width; zero means hairline.
    pub stroke_width: f32,
    /// Stroke end cap.
    pub stroke_cap: Cap,
    /// Stroke corner join.
    pub stroke_join: Join,
    /// Miter limit for [`Join::Miter`].
    pub stroke_miter: f32,
    /// Fill or stroke.
    pub style: PaintStyle,
    /// Blend mode used when compositing the draw.
    pub blend_mode: BlendMode,
    /// Invert colors after all other filters.
    pub invert_colors: bool,
    /// Image filter applied to the draw's output.
    pub image_filter: Option<ImageFilterProc>,
    /// Color filter applied to the draw's output.
    pub color_filter: Option<ColorFilter>,
    /// Mask blur applied to the draw's coverage.
    pub mask_blur_descriptor: Option<MaskBlurDescriptor>,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            color_source: ColorSource::Color,
            dither: false,
            stroke_width: 0.0,
            stroke_cap: Cap::Butt,
            stroke_join: Join::Miter,
            stroke_miter: 4.0,
            style: PaintStyle::Fill,
            blend_mode: BlendMode::SourceOver,
            invert_colors: false,
            image_filter: None,
            color_filter: None,
            mask_blur_descriptor: None,
        }
    }
}

impl Paint {
    /// A default fill paint with the given color.
    pub fn with_color(color: Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    /// Returns `true` if the covered region is painted with [`Paint::color`].
    pub fn is_solid_color(&self) -> bool {
        matches!(self.color_source, ColorSource::Color)
    }

    /// Whether this paint has a color filter that can apply opacity.
    pub fn has_color_filter(&self) -> bool {
        self.color_filter.is_some() || self.invert_colors
    }
}
