// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color, image and mask filter compilation.
//!
//! Image filters compile to an [`ImageFilterProc`]: a closure that builds a
//! [`FilterContents`] graph for whatever input the canvas supplies later.
//! Composed filters compile to nested closures.
//!
//! [`FilterContents`]: stipple_canvas::FilterContents

use std::sync::Arc;

use stipple_canvas::{
    BlurStyle, ColorFilter, ColorMatrix, FilterContents, FilterInput, ImageFilterProc,
    MaskBlurDescriptor, Matrix, MorphType, Sigma,
};
use stipple_display_list::{DlColorFilter, DlImageFilter, DlMaskFilter};

use crate::conversions::{
    to_blend_mode, to_blur_style, to_color, to_matrix, to_sampler_descriptor, to_tile_mode,
};

/// Compile a color filter. Returns `None` for filters the canvas cannot express.
pub fn to_color_filter(filter: &DlColorFilter) -> Option<ColorFilter> {
    match filter {
        DlColorFilter::Blend { color, mode } => Some(ColorFilter::Blend {
            blend_mode: to_blend_mode(*mode),
            color: to_color(*color),
        }),
        DlColorFilter::Matrix(array) => Some(ColorFilter::Matrix(ColorMatrix { array: *array })),
        DlColorFilter::SrgbToLinearGamma => Some(ColorFilter::SrgbToLinear),
        DlColorFilter::LinearToSrgbGamma => Some(ColorFilter::LinearToSrgb),
        _ => {
            tracing::error!(?filter, "unsupported color filter");
            None
        }
    }
}

/// Compile a mask filter.
pub fn to_mask_blur_descriptor(filter: &DlMaskFilter) -> Option<MaskBlurDescriptor> {
    match *filter {
        DlMaskFilter::Blur { style, sigma } => Some(MaskBlurDescriptor {
            style: to_blur_style(style),
            sigma: Sigma(sigma),
        }),
        _ => {
            tracing::error!(?filter, "unsupported mask filter");
            None
        }
    }
}

/// Compile an image filter into a deferred filter-graph builder.
///
/// Returns `None` when the filter is a no-op: morphology with a negative
/// radius, a color filter that cannot be expressed, or a wrapper around such
/// a filter. A compose with one side missing compiles to the other side.
pub fn to_image_filter_proc(filter: &DlImageFilter) -> Option<ImageFilterProc> {
    match filter {
        DlImageFilter::Blur {
            sigma_x,
            sigma_y,
            tile_mode,
        } => {
            let sigma_x = Sigma(*sigma_x);
            let sigma_y = Sigma(*sigma_y);
            let tile_mode = to_tile_mode(*tile_mode);
            Some(ImageFilterProc::new(
                move |input, effect_transform: &Matrix, _is_subpass| {
                    Arc::new(FilterContents::GaussianBlur {
                        input,
                        sigma_x,
                        sigma_y,
                        blur_style: BlurStyle::Normal,
                        tile_mode,
                        effect_transform: *effect_transform,
                    })
                },
            ))
        }
        DlImageFilter::Dilate { radius_x, radius_y } => {
            morphology(*radius_x, *radius_y, MorphType::Dilate)
        }
        DlImageFilter::Erode { radius_x, radius_y } => {
            morphology(*radius_x, *radius_y, MorphType::Erode)
        }
        DlImageFilter::Matrix { matrix, sampling } => {
            let matrix = to_matrix(matrix);
            let sampler = to_sampler_descriptor(*sampling);
            Some(ImageFilterProc::new(
                move |input, effect_transform: &Matrix, is_subpass| {
                    Arc::new(FilterContents::Matrix {
                        input,
                        matrix,
                        sampler,
                        effect_transform: *effect_transform,
                        is_subpass,
                    })
                },
            ))
        }
        DlImageFilter::Compose { outer, inner } => {
            let outer = outer.as_deref().and_then(to_image_filter_proc);
            let inner = inner.as_deref().and_then(to_image_filter_proc);
            match (outer, inner) {
                (None, inner) => inner,
                (outer, None) => outer,
                (Some(outer), Some(inner)) => Some(ImageFilterProc::new(
                    move |input, effect_transform: &Matrix, is_subpass| {
                        let contents = inner.apply(input, effect_transform, is_subpass);
                        outer.apply(FilterInput::Filter(contents), effect_transform, is_subpass)
                    },
                )),
            }
        }
        DlImageFilter::ColorFilter(color_filter) => {
            let color_filter = to_color_filter(color_filter)?;
            // Opacity is applied when the chain's result is blended, not here.
            Some(ImageFilterProc::new(move |input, _effect_transform, _is_subpass| {
                color_filter.wrap_with_gpu_color_filter(input, false)
            }))
        }
        DlImageFilter::LocalMatrix { matrix, filter } => {
            let inner = to_image_filter_proc(filter)?;
            let matrix = to_matrix(matrix);
            Some(ImageFilterProc::new(
                move |input, effect_transform: &Matrix, is_subpass| {
                    let contents = inner.apply(input, effect_transform, is_subpass);
                    Arc::new(FilterContents::LocalMatrix {
                        input: FilterInput::Filter(contents),
                        matrix,
                    })
                },
            ))
        }
        _ => {
            tracing::error!(?filter, "unsupported image filter");
            None
        }
    }
}

fn morphology(radius_x: f32, radius_y: f32, morph_type: MorphType) -> Option<ImageFilterProc> {
    if radius_x < 0.0 || radius_y < 0.0 {
        return None;
    }
    Some(ImageFilterProc::new(
        move |input, effect_transform: &Matrix, _is_subpass| {
            Arc::new(FilterContents::Morphology {
                input,
                radius_x,
                radius_y,
                morph_type,
                effect_transform: *effect_transform,
            })
        },
    ))
}
