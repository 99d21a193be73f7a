// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Colors and the enumerations carried by display-list commands.

/// A packed 8-bit-per-channel ARGB color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DlColor(pub u32);

impl DlColor {
    /// Opaque black.
    pub const BLACK: Self = Self(0xFF00_0000);
    /// Opaque white.
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    /// Opaque red.
    pub const RED: Self = Self(0xFFFF_0000);
    /// Opaque green.
    pub const GREEN: Self = Self(0xFF00_FF00);
    /// Opaque blue.
    pub const BLUE: Self = Self(0xFF00_00FF);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0);

    /// Pack channels.
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(u32::from_be_bytes([a, r, g, b]))
    }

    /// Alpha channel.
    pub const fn alpha(self) -> u8 {
        self.0.to_be_bytes()[0]
    }

    /// Red channel.
    pub const fn red(self) -> u8 {
        self.0.to_be_bytes()[1]
    }

    /// Green channel.
    pub const fn green(self) -> u8 {
        self.0.to_be_bytes()[2]
    }

    /// Blue channel.
    pub const fn blue(self) -> u8 {
        self.0.to_be_bytes()[3]
    }

    /// Alpha in `[0, 1]`.
    pub fn alpha_f(self) -> f32 {
        f32::from(self.alpha()) / 255.0
    }

    /// Red in `[0, 1]`.
    pub fn red_f(self) -> f32 {
        f32::from(self.red()) / 255.0
    }

    /// Green in `[0, 1]`.
    pub fn green_f(self) -> f32 {
        f32::from(self.green()) / 255.0
    }

    /// Blue in `[0, 1]`.
    pub fn blue_f(self) -> f32 {
        f32::from(self.blue()) / 255.0
    }

    /// Same color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, alpha: u8) -> Self {
        let [_, r, g, b] = self.0.to_be_bytes();
        Self(u32::from_be_bytes([alpha, r, g, b]))
    }
}

/// Porter-Duff and separable/non-separable blend modes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[expect(missing_docs, reason = "standard blend mode names")]
pub enum DlBlendMode {
    Clear,
    Src,
    Dst,
    #[default]
    SrcOver,
    DstOver,
    SrcIn,
    DstIn,
    SrcOut,
    DstOut,
    SrcATop,
    DstATop,
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

/// Behavior of a shader outside its natural extent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DlTileMode {
    /// Extend the edge color.
    #[default]
    Clamp,
    /// Repeat.
    Repeat,
    /// Repeat, mirroring every other tile.
    Mirror,
    /// Transparent outside.
    Decal,
}

/// Stroke end cap.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[expect(missing_docs, reason = "standard cap names")]
pub enum DlStrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Stroke corner join.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[expect(missing_docs, reason = "standard join names")]
pub enum DlStrokeJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Whether shapes are filled, stroked, or both.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DlDrawStyle {
    /// Fill the interior.
    #[default]
    Fill,
    /// Stroke the outline.
    Stroke,
    /// Fill and stroke.
    StrokeAndFill,
}

/// How a clip combines with the current clip.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DlClipOp {
    /// Remove the shape from the clip.
    Difference,
    /// Keep only the overlap.
    #[default]
    Intersect,
}

/// How `drawPoints` interprets its points.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DlPointMode {
    /// Each point is drawn on its own.
    #[default]
    Points,
    /// Each pair of points is a line segment.
    Lines,
    /// Consecutive points are connected.
    Polygon,
}

/// Image sampling quality.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DlImageSampling {
    /// Nearest texel.
    #[default]
    NearestNeighbor,
    /// Bilinear.
    Linear,
    /// Bilinear with linear mip interpolation.
    MipmapLinear,
    /// Bicubic.
    Cubic,
}

/// Texture filter mode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DlFilterMode {
    /// Nearest texel.
    #[default]
    Nearest,
    /// Bilinear.
    Linear,
}

/// Mask blur style.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DlBlurStyle {
    /// Blur inside and outside.
    #[default]
    Normal,
    /// Solid inside, blurred outside.
    Solid,
    /// Nothing inside, blurred outside.
    Outer,
    /// Blurred inside, nothing outside.
    Inner,
}

/// Whether an image source rect may be sampled outside its bounds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DlSrcRectConstraint {
    /// Sampling stays strictly within the source rect.
    Strict,
    /// Sampling may bleed outside the source rect.
    #[default]
    Fast,
}

/// Path fill rule.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DlPathFillType {
    /// Non-zero winding.
    #[default]
    Winding,
    /// Even-odd.
    EvenOdd,
}
