// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;
use stipple_canvas::{ColorSource, Degrees, GradientStops, TextureInput};
use stipple_display_list::{DlColorSource, DlGradientStops, DlRuntimeEffect};

use crate::conversions::{
    convert_stops, to_color, to_matrix, to_point, to_sampler_descriptor, to_tile_mode,
};

/// What a compiled color source does to the current paint.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum PaintUpdate {
    /// Replace the color source.
    Source(ColorSource),
    /// Use the solid color source with this color.
    SolidColor(Color),
    /// Leave the paint alone.
    Unchanged,
}

/// Compile a display-list color source against the paint it will update.
///
/// `None` means the paint's own color.
pub(crate) fn compile_color_source(source: Option<&DlColorSource>) -> PaintUpdate {
    let Some(source) = source else {
        return PaintUpdate::Source(ColorSource::Color);
    };
    match source {
        DlColorSource::Color(color) => PaintUpdate::SolidColor(to_color(*color)),
        DlColorSource::LinearGradient(linear) => gradient(&linear.stops, |stops| {
            ColorSource::LinearGradient {
                start: to_point(linear.start_point),
                end: to_point(linear.end_point),
                stops,
                tile_mode: to_tile_mode(linear.tile_mode),
                effect_transform: to_matrix(&linear.matrix),
            }
        }),
        DlColorSource::RadialGradient(radial) => gradient(&radial.stops, |stops| {
            ColorSource::RadialGradient {
                center: to_point(radial.center),
                radius: f64::from(radial.radius),
                stops,
                tile_mode: to_tile_mode(radial.tile_mode),
                effect_transform: to_matrix(&radial.matrix),
            }
        }),
        // The canvas describes a conical gradient from its end circle, with
        // the start circle as the focus.
        DlColorSource::ConicalGradient(conical) => gradient(&conical.stops, |stops| {
            ColorSource::ConicalGradient {
                center: to_point(conical.end_center),
                radius: f64::from(conical.end_radius),
                focus_center: to_point(conical.start_center),
                focus_radius: f64::from(conical.start_radius),
                stops,
                tile_mode: to_tile_mode(conical.tile_mode),
                effect_transform: to_matrix(&conical.matrix),
            }
        }),
        DlColorSource::SweepGradient(sweep) => gradient(&sweep.stops, |stops| {
            ColorSource::SweepGradient {
                center: to_point(sweep.center),
                start_angle: Degrees(sweep.start),
                end_angle: Degrees(sweep.end),
                stops,
                tile_mode: to_tile_mode(sweep.tile_mode),
                effect_transform: to_matrix(&sweep.matrix),
            }
        }),
        DlColorSource::Image(image) => {
            let texture = image.image.texture();
            debug_assert!(texture.is_some(), "image color source without a texture");
            let Some(texture) = texture else {
                tracing::error!("image color source has no realized texture");
                return PaintUpdate::Unchanged;
            };
            PaintUpdate::Source(ColorSource::Image {
                texture: texture.clone(),
                x_tile_mode: to_tile_mode(image.horizontal_tile_mode),
                y_tile_mode: to_tile_mode(image.vertical_tile_mode),
                sampler: to_sampler_descriptor(image.sampling),
                effect_transform: to_matrix(&image.matrix),
            })
        }
        DlColorSource::RuntimeEffect(effect) => runtime_effect(effect),
        DlColorSource::Scene(scene) => scene_source(scene),
        _ => {
            tracing::error!(?source, "unknown color source type");
            PaintUpdate::Source(ColorSource::Color)
        }
    }
}

fn gradient(
    stops: &DlGradientStops,
    make: impl FnOnce(GradientStops) -> ColorSource,
) -> PaintUpdate {
    match convert_stops(stops) {
        Some(stops) => PaintUpdate::Source(make(stops)),
        None => {
            tracing::warn!(stops = stops.len(), "gradient has too few stops");
            PaintUpdate::Source(ColorSource::Color)
        }
    }
}

// Every sampler must be a realized image; anything else aborts compilation.
fn runtime_effect(effect: &DlRuntimeEffect) -> PaintUpdate {
    let mut texture_inputs = Vec::with_capacity(effect.samplers.len());
    for sampler in &effect.samplers {
        let Some(sampler) = sampler else {
            return PaintUpdate::Unchanged;
        };
        let DlColorSource::Image(image) = &**sampler else {
            tracing::error!(
                operation = "runtime effect sampler",
                "unimplemented: runtime effect samplers must be images"
            );
            return PaintUpdate::Unchanged;
        };
        debug_assert!(
            image.image.texture().is_some(),
            "runtime effect sampler without a texture"
        );
        let Some(texture) = image.image.texture() else {
            return PaintUpdate::Unchanged;
        };
        texture_inputs.push(TextureInput {
            sampler_descriptor: to_sampler_descriptor(image.sampling),
            texture: texture.clone(),
        });
    }
    PaintUpdate::Source(ColorSource::RuntimeEffect {
        runtime_stage: effect.runtime_stage.clone(),
        uniform_data: effect.uniform_data.clone(),
        texture_inputs,
    })
}

#[cfg(feature = "scene")]
fn scene_source(scene: &stipple_display_list::DlSceneSource) -> PaintUpdate {
    PaintUpdate::Source(ColorSource::Scene {
        scene_node: scene.scene_node.clone(),
        camera_transform: scene.camera_matrix,
    })
}

#[cfg(not(feature = "scene"))]
fn scene_source(_scene: &stipple_display_list::DlSceneSource) -> PaintUpdate {
    tracing::error!(
        operation = "scene color source",
        "scene color sources require the `scene` feature"
    );
    PaintUpdate::Unchanged
}
