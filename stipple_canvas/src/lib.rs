// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stipple Canvas: the drawing-surface abstraction that display lists are
//! dispatched into.
//!
//! A [`Canvas`] owns a save/restore-counted stack of transform and clip
//! frames and accepts a family of draw calls, each carrying a [`Paint`]
//! value. Canvases never hold on to the caller's paint; every draw call gets
//! its own copy.
//!
//! # Core concepts
//!
//! - **Paint model**: [`Paint`], with its [`ColorSource`], [`ColorFilter`],
//!   [`MaskBlurDescriptor`] and deferred image filter ([`ImageFilterProc`]).
//! - **Filter graphs**: [`FilterContents`] trees over [`FilterInput`] leaves,
//!   built on demand by an [`ImageFilterProc`].
//! - **Transforms**: a column-major 4x4 [`Matrix`]. Canvases concatenate
//!   matrices; they never see row-major data.
//! - **Resources**: [`Texture`], [`RuntimeStage`] and [`SceneNode`] are
//!   shared by `Arc`. Canvases borrow them and never allocate or free the
//!   underlying GPU objects.
//!
//! Geometry and color come from [`kurbo`] and [`peniko`].
//!
//! # Features
//!
//! - `scene` (off by default): enables the `ColorSource::Scene` variant.
//!
//! See the `stipple_canvas_ref` crate for a recording implementation used in
//! tests.

mod color_filter;
mod color_source;
mod filters;
mod geometry;
mod matrix;
mod paint;
mod resources;

use std::sync::Arc;

use kurbo::{Point, Rect};

pub use color_filter::{ColorFilter, ColorMatrix, blend_colors};
pub use color_source::{
    ColorSource, ColorSourceType, Degrees, GradientStops, MinMagFilter, MipFilter,
    SamplerDescriptor, TextureInput, TileMode,
};
pub use filters::{FilterContents, FilterInput, ImageFilterProc, MorphType};
pub use geometry::{
    Atlas, ClipOperation, Font, GlyphPosition, Path, PointStyle, RSTransform, TextFrame, TextRun,
    VertexMode, Vertices,
};
pub use matrix::Matrix;
pub use paint::{
    BlendMode, BlurStyle, KERNEL_RADIUS_PER_SIGMA, MaskBlurDescriptor, Paint, PaintStyle, Radius,
    Sigma,
};
pub use peniko::{Color, Fill as FillRule};
pub use resources::{RuntimeStage, SceneNode, Texture, TextureId};

/// A drawing surface that accumulates operations into a picture.
///
/// The save stack starts at depth 1. [`Canvas::save`] and
/// [`Canvas::save_layer`] push a frame holding the current transform and
/// clip; [`Canvas::restore`] pops it. The bottom frame can never be popped.
///
/// Transforms use the column-major [`Matrix`] convention. `concat` post-
/// multiplies (the new matrix applies to local coordinates first);
/// `pre_concat` pre-multiplies (the new matrix applies in device space).
pub trait Canvas {
    /// Finalized output of a recording pass.
    type Picture;

    /// Push a frame holding the current transform and clip.
    fn save(&mut self);

    /// Push a frame whose content is composited with `paint` on restore.
    ///
    /// `bounds` optionally limits the layer's extent in local coordinates.
    /// `backdrop` filters what is already drawn beneath the layer before the
    /// layer content is composited over it.
    fn save_layer(
        &mut self,
        paint: &Paint,
        bounds: Option<Rect>,
        backdrop: Option<ImageFilterProc>,
    );

    /// Pop the top frame. Returns `false` if only the bottom frame remains.
    fn restore(&mut self) -> bool;

    /// Current stack depth, starting at 1.
    fn save_count(&self) -> usize;

    /// Pop frames until the depth is at most `count`.
    fn restore_to_count(&mut self, count: usize) {
        while self.save_count() > count {
            if !self.restore() {
                break;
            }
        }
    }

    /// The accumulated transform.
    fn current_transform(&self) -> Matrix;

    /// Set the current transform to identity.
    fn reset_transform(&mut self);

    /// `current = current * matrix`.
    fn concat(&mut self, matrix: &Matrix);

    /// `current = matrix * current`.
    fn pre_concat(&mut self, matrix: &Matrix);

    /// The device culling rectangle mapped into local coordinates, if the
    /// canvas tracks one and the current transform is invertible.
    fn current_local_culling_bounds(&self) -> Option<Rect>;

    /// Combine the clip with a rectangle.
    fn clip_rect(&mut self, rect: Rect, op: ClipOperation);

    /// Combine the clip with a rectangle whose corners all have `radius`.
    fn clip_rrect(&mut self, rect: Rect, radius: f64, op: ClipOperation);

    /// Combine the clip with an arbitrary path.
    fn clip_path(&mut self, path: Path, op: ClipOperation);

    /// Fill the whole clip.
    fn draw_paint(&mut self, paint: &Paint);

    /// Draw an axis-aligned rectangle.
    fn draw_rect(&mut self, rect: Rect, paint: &Paint);

    /// Draw a rectangle whose corners all have `radius`.
    fn draw_rrect(&mut self, rect: Rect, radius: f64, paint: &Paint);

    /// Draw a circle.
    fn draw_circle(&mut self, center: Point, radius: f64, paint: &Paint);

    /// Draw an arbitrary path.
    fn draw_path(&mut self, path: Path, paint: &Paint);

    /// Draw one sprite of `radius` per point.
    fn draw_points(&mut self, points: Vec<Point>, radius: f64, paint: &Paint, style: PointStyle);

    /// Draw the `src` region of `texture` into `dst`.
    fn draw_image_rect(
        &mut self,
        texture: Arc<Texture>,
        src: Rect,
        dst: Rect,
        paint: &Paint,
        sampler: SamplerDescriptor,
    );

    /// Draw a triangle mesh, combining vertex colors with the paint via `blend_mode`.
    fn draw_vertices(&mut self, vertices: Vertices, blend_mode: BlendMode, paint: &Paint);

    /// Draw a batch of sprites.
    fn draw_atlas(&mut self, atlas: Atlas, paint: &Paint);

    /// Draw shaped text with its baseline origin at `position`.
    fn draw_text_frame(&mut self, frame: TextFrame, position: Point, paint: &Paint);

    /// Finish recording and return the picture.
    fn end_recording_as_picture(&mut self) -> Self::Picture;
}
