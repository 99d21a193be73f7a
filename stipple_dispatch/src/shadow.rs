// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop shadow approximation.
//!
//! Shadows are not lit. The occluder shape is pushed down by its height and
//! drawn with a blurred, tonally adjusted copy of the shadow color.

use peniko::Color;
use stipple_canvas::{BlurStyle, MaskBlurDescriptor, Radius, Sigma};

/// Position of the synthetic light, relative to the occluder.
pub const LIGHT_POSITION: [f32; 3] = [0.0, -1.0, 1.0];

/// Light radius over light height; both are integers, so this is `1`.
pub const LIGHT_RADIUS: f32 = (800 / 600) as f32;

/// Alpha scale applied to the shadow color before tonal adjustment.
pub const SPOT_ALPHA_SCALE: f32 = 0.25;

/// The spot color drawn for a shadow of `color`.
pub fn spot_color(color: Color) -> Color {
    let [r, g, b, a] = color.components;
    tonal_color(Color::new([r, g, b, a * SPOT_ALPHA_SCALE]))
}

/// Adjust a translucent color so lighter colors cast weaker shadows.
///
/// The returned color is unpremultiplied.
pub fn tonal_color(color: Color) -> Color {
    let [r, g, b, a] = color.components;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let luminance = (min + max) * 0.5;

    let alpha_adjust = (2.6_f32 + (-2.66667_f32 + 1.06667_f32 * a) * a) * a;
    let color_alpha = (3.544762_f32 + (-4.891428_f32 + 2.3466_f32 * luminance) * luminance)
        * luminance;
    let color_alpha = (alpha_adjust * color_alpha).clamp(0.0, 1.0);

    let greyscale_alpha = (a * (1.0 - 0.4 * luminance)).clamp(0.0, 1.0);

    let color_scale = color_alpha * (1.0 - greyscale_alpha);
    let tonal_alpha = color_scale + greyscale_alpha;
    let unpremul_scale = if tonal_alpha != 0.0 {
        color_scale / tonal_alpha
    } else {
        0.0
    };
    Color::new([
        unpremul_scale * r,
        unpremul_scale * g,
        unpremul_scale * b,
        tonal_alpha,
    ])
}

/// Height of the occluder above the canvas in device pixels.
pub fn occluder_height(elevation: f32, dpr: f32) -> f32 {
    dpr * elevation
}

/// Vertical device-space offset of the shadow.
pub fn shadow_offset(occluder_z: f32) -> f32 {
    -occluder_z * LIGHT_POSITION[1]
}

/// Mask blur for a shadow cast from `occluder_z`, in local units.
///
/// `y_scale` is the vertical scale of the current transform.
#[expect(
    clippy::cast_possible_truncation,
    reason = "blur radii are f32; the transform scale only divides them"
)]
pub fn shadow_mask_blur(occluder_z: f32, y_scale: f64) -> MaskBlurDescriptor {
    let radius = LIGHT_RADIUS * occluder_z / y_scale as f32;
    MaskBlurDescriptor {
        style: BlurStyle::Normal,
        sigma: Sigma::from(Radius(radius)),
    }
}
