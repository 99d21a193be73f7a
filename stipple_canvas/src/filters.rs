// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Image filter graphs.
//!
//! A filter graph is a tree of [`FilterContents`] nodes whose leaves are
//! [`FilterInput`]s. Draws and layers do not carry a graph directly; they
//! carry an [`ImageFilterProc`] that builds one on demand for a given input,
//! effect transform, and subpass flag.

use core::fmt;
use std::sync::Arc;

use crate::{BlurStyle, ColorFilter, Matrix, SamplerDescriptor, Sigma, Texture, TileMode};

/// The input to a filter node.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterInput {
    /// The content the filter is applied to (the layer or draw output).
    Source,
    /// A fixed texture.
    Texture(Arc<Texture>),
    /// The output of another filter.
    Filter(Arc<FilterContents>),
}

/// Morphology operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MorphType {
    /// Grow coverage.
    Dilate,
    /// Shrink coverage.
    Erode,
}

/// One node of a filter graph.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterContents {
    /// Separable gaussian blur.
    GaussianBlur {
        /// Filtered input.
        input: FilterInput,
        /// Horizontal standard deviation.
        sigma_x: Sigma,
        /// Vertical standard deviation.
        sigma_y: Sigma,
        /// Blur style.
        blur_style: BlurStyle,
        /// Edge behavior.
        tile_mode: TileMode,
        /// Transform from filter space to the input's space.
        effect_transform: Matrix,
    },
    /// Dilate or erode.
    Morphology {
        /// Filtered input.
        input: FilterInput,
        /// Horizontal radius.
        radius_x: f32,
        /// Vertical radius.
        radius_y: f32,
        /// Operator.
        morph_type: MorphType,
        /// Transform from filter space to the input's space.
        effect_transform: Matrix,
    },
    /// Resample the input through a transform.
    Matrix {
        /// Filtered input.
        input: FilterInput,
        /// Transform applied to the input.
        matrix: Matrix,
        /// Sampling used when resampling.
        sampler: SamplerDescriptor,
        /// Transform from filter space to the input's space.
        effect_transform: Matrix,
        /// Whether the filter runs inside a save-layer subpass.
        is_subpass: bool,
    },
    /// Apply a color filter per pixel.
    ColorFilter {
        /// Filtered input.
        input: FilterInput,
        /// The filter.
        filter: ColorFilter,
        /// Whether the input's opacity is folded into the result.
        absorb_opacity: bool,
    },
    /// Evaluate `input` in a locally transformed space.
    LocalMatrix {
        /// Filtered input.
        input: FilterInput,
        /// Local transform.
        matrix: Matrix,
    },
}

impl FilterContents {
    /// The node's direct input.
    pub fn input(&self) -> &FilterInput {
        match self {
            Self::GaussianBlur { input, .. }
            | Self::Morphology { input, .. }
            | Self::Matrix { input, .. }
            | Self::ColorFilter { input, .. }
            | Self::LocalMatrix { input, .. } => input,
        }
    }

    /// Number of filter nodes along the input chain, including this one.
    pub fn depth(&self) -> usize {
        match self.input() {
            FilterInput::Filter(inner) => 1 + inner.depth(),
            _ => 1,
        }
    }
}

type FilterFn = dyn Fn(FilterInput, &Matrix, bool) -> Arc<FilterContents> + Send + Sync;

/// A deferred filter graph builder.
///
/// Called with the input to filter, the effect transform, and whether the
/// filter is evaluated inside a save-layer subpass. Two procs compare equal
/// only if they share the same closure.
#[derive(Clone)]
pub struct ImageFilterProc(Arc<FilterFn>);

impl ImageFilterProc {
    /// Wrap a closure.
    pub fn new(
        f: impl Fn(FilterInput, &Matrix, bool) -> Arc<FilterContents> + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(f))
    }

    /// Build the filter graph for `input`.
    pub fn apply(
        &self,
        input: FilterInput,
        effect_transform: &Matrix,
        is_subpass: bool,
    ) -> Arc<FilterContents> {
        (self.0)(input, effect_transform, is_subpass)
    }

    /// Returns `true` if both procs share the same closure.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ImageFilterProc {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ImageFilterProc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ImageFilterProc").finish_non_exhaustive()
    }
}
