// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color filters: pure functions over a single color.

use std::sync::Arc;

use peniko::Color;

use crate::{BlendMode, FilterContents, FilterInput};

/// A 4x5 row-major color matrix.
///
/// Each output channel is `m[i*5] * r + m[i*5+1] * g + m[i*5+2] * b + m[i*5+3] * a + m[i*5+4]`,
/// evaluated on unpremultiplied color.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ColorMatrix {
    /// Matrix entries, row by row.
    pub array: [f32; 20],
}

impl ColorMatrix {
    /// The matrix that leaves colors unchanged.
    pub const IDENTITY: Self = Self {
        array: [
            1.0, 0.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, 0.0,
        ],
    };
}

/// A color filter.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorFilter {
    /// Blend a constant color (as source) over the input (as destination).
    Blend {
        /// Blend operator.
        blend_mode: BlendMode,
        /// Constant source color.
        color: Color,
    },
    /// Apply a [`ColorMatrix`].
    Matrix(ColorMatrix),
    /// Decode sRGB-encoded channels to linear.
    SrgbToLinear,
    /// Encode linear channels as sRGB.
    LinearToSrgb,
}

impl ColorFilter {
    /// Apply the filter to one color.
    pub fn apply(&self, color: Color) -> Color {
        match self {
            Self::Blend {
                blend_mode,
                color: source,
            } => blend_colors(color, *source, *blend_mode),
            Self::Matrix(matrix) => {
                let c = color.components;
                let m = &matrix.array;
                let row = |i: usize| {
                    (m[i * 5] * c[0]
                        + m[i * 5 + 1] * c[1]
                        + m[i * 5 + 2] * c[2]
                        + m[i * 5 + 3] * c[3]
                        + m[i * 5 + 4])
                        .clamp(0.0, 1.0)
                };
                Color::new([row(0), row(1), row(2), row(3)])
            }
            Self::SrgbToLinear => map_rgb(color, |c| {
                if c <= 0.04045 {
                    c / 12.92
                } else {
                    ((c + 0.055) / 1.055).powf(2.4)
                }
            }),
            Self::LinearToSrgb => map_rgb(color, |c| {
                if c <= 0.003_130_8 {
                    c * 12.92
                } else {
                    1.055 * c.powf(1.0 / 2.4) - 0.055
                }
            }),
        }
    }

    /// Wrap `input` so this filter is applied on the GPU.
    ///
    /// `absorb_opacity` lets the filter fold the input snapshot's opacity into
    /// its result; image-filter chains pass `false` so opacity is applied when
    /// the chain's result is blended into the layer.
    pub fn wrap_with_gpu_color_filter(
        &self,
        input: FilterInput,
        absorb_opacity: bool,
    ) -> Arc<FilterContents> {
        Arc::new(FilterContents::ColorFilter {
            input,
            filter: self.clone(),
            absorb_opacity,
        })
    }
}

fn map_rgb(color: Color, f: impl Fn(f32) -> f32) -> Color {
    let [r, g, b, a] = color.components;
    Color::new([f(r), f(g), f(b), a])
}

/// Composite `src` onto `dst` with `mode`, returning an unpremultiplied color.
pub fn blend_colors(dst: Color, src: Color, mode: BlendMode) -> Color {
    let [sr, sg, sb, sa] = src.components;
    let [dr, dg, db, da] = dst.components;
    let s = [sr * sa, sg * sa, sb * sa, sa];
    let d = [dr * da, dg * da, db * da, da];

    let porter_duff = |fs: f32, fd: f32| -> [f32; 4] {
        [
            s[0] * fs + d[0] * fd,
            s[1] * fs + d[1] * fd,
            s[2] * fs + d[2] * fd,
            s[3] * fs + d[3] * fd,
        ]
    };

    let premul = match mode {
        BlendMode::Clear => [0.0; 4],
        BlendMode::Source => s,
        BlendMode::Destination => d,
        BlendMode::SourceOver => porter_duff(1.0, 1.0 - sa),
        BlendMode::DestinationOver => porter_duff(1.0 - da, 1.0),
        BlendMode::SourceIn => porter_duff(da, 0.0),
        BlendMode::DestinationIn => porter_duff(0.0, sa),
        BlendMode::SourceOut => porter_duff(1.0 - da, 0.0),
        BlendMode::DestinationOut => porter_duff(0.0, 1.0 - sa),
        BlendMode::SourceATop => porter_duff(da, 1.0 - sa),
        BlendMode::DestinationATop => porter_duff(1.0 - da, sa),
        BlendMode::Xor => porter_duff(1.0 - da, 1.0 - sa),
        BlendMode::Plus => [
            (s[0] + d[0]).min(1.0),
            (s[1] + d[1]).min(1.0),
            (s[2] + d[2]).min(1.0),
            (s[3] + d[3]).min(1.0),
        ],
        BlendMode::Modulate => [s[0] * d[0], s[1] * d[1], s[2] * d[2], s[3] * d[3]],
        advanced => {
            let cs = [sr, sg, sb];
            let cb = [dr, dg, db];
            let mixed = mix(advanced, cb, cs);
            let alpha = sa + da - sa * da;
            let channel = |i: usize| s[i] * (1.0 - da) + d[i] * (1.0 - sa) + sa * da * mixed[i];
            [channel(0), channel(1), channel(2), alpha]
        }
    };

    let alpha = premul[3].clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return Color::new([0.0, 0.0, 0.0, 0.0]);
    }
    Color::new([
        (premul[0] / alpha).clamp(0.0, 1.0),
        (premul[1] / alpha).clamp(0.0, 1.0),
        (premul[2] / alpha).clamp(0.0, 1.0),
        alpha,
    ])
}

/// The blend function `B(cb, cs)` of the separable and non-separable modes.
fn mix(mode: BlendMode, cb: [f32; 3], cs: [f32; 3]) -> [f32; 3] {
    let separable = |f: fn(f32, f32) -> f32| [f(cb[0], cs[0]), f(cb[1], cs[1]), f(cb[2], cs[2])];
    match mode {
        BlendMode::Multiply => separable(|b, s| b * s),
        BlendMode::Screen => separable(screen),
        BlendMode::Overlay => separable(|b, s| hard_light(s, b)),
        BlendMode::Darken => separable(f32::min),
        BlendMode::Lighten => separable(f32::max),
        BlendMode::ColorDodge => separable(|b, s| {
            if b == 0.0 {
                0.0
            } else if s >= 1.0 {
                1.0
            } else {
                (b / (1.0 - s)).min(1.0)
            }
        }),
        BlendMode::ColorBurn => separable(|b, s| {
            if b >= 1.0 {
                1.0
            } else if s <= 0.0 {
                0.0
            } else {
                1.0 - ((1.0 - b) / s).min(1.0)
            }
        }),
        BlendMode::HardLight => separable(hard_light),
        BlendMode::SoftLight => separable(|b, s| {
            if s <= 0.5 {
                b - (1.0 - 2.0 * s) * b * (1.0 - b)
            } else {
                let d = if b <= 0.25 {
                    ((16.0 * b - 12.0) * b + 4.0) * b
                } else {
                    b.sqrt()
                };
                b + (2.0 * s - 1.0) * (d - b)
            }
        }),
        BlendMode::Difference => separable(|b, s| (b - s).abs()),
        BlendMode::Exclusion => separable(|b, s| b + s - 2.0 * b * s),
        BlendMode::Hue => set_lum(set_sat(cs, sat(cb)), lum(cb)),
        BlendMode::Saturation => set_lum(set_sat(cb, sat(cs)), lum(cb)),
        BlendMode::Color => set_lum(cs, lum(cb)),
        BlendMode::Luminosity => set_lum(cb, lum(cs)),
        _ => cs,
    }
}

fn screen(b: f32, s: f32) -> f32 {
    b + s - b * s
}

fn hard_light(b: f32, s: f32) -> f32 {
    if s <= 0.5 {
        b * 2.0 * s
    } else {
        screen(b, 2.0 * s - 1.0)
    }
}

fn lum(c: [f32; 3]) -> f32 {
    0.3 * c[0] + 0.59 * c[1] + 0.11 * c[2]
}

fn sat(c: [f32; 3]) -> f32 {
    c[0].max(c[1]).max(c[2]) - c[0].min(c[1]).min(c[2])
}

fn clip_color(c: [f32; 3]) -> [f32; 3] {
    let l = lum(c);
    let n = c[0].min(c[1]).min(c[2]);
    let x = c[0].max(c[1]).max(c[2]);
    let mut out = c;
    if n < 0.0 {
        for v in &mut out {
            *v = l + (*v - l) * l / (l - n);
        }
    }
    if x > 1.0 {
        for v in &mut out {
            *v = l + (*v - l) * (1.0 - l) / (x - l);
        }
    }
    out
}

fn set_lum(c: [f32; 3], l: f32) -> [f32; 3] {
    let d = l - lum(c);
    clip_color([c[0] + d, c[1] + d, c[2] + d])
}

fn set_sat(c: [f32; 3], s: f32) -> [f32; 3] {
    let mut idx = [0_usize, 1, 2];
    idx.sort_by(|&a, &b| c[a].total_cmp(&c[b]));
    let [min, mid, max] = idx;
    let mut out = [0.0; 3];
    if c[max] > c[min] {
        out[mid] = (c[mid] - c[min]) * s / (c[max] - c[min]);
        out[max] = s;
    }
    out
}
