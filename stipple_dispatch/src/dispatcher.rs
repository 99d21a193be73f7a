// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::mem;
use core::ops::{Deref, DerefMut};
use std::sync::Arc;

use kurbo::{BezPath, Cap, Line, Point, Rect};
use peniko::Color;
use stipple_canvas::{
    Atlas, Canvas, ColorSource, FillRule, Matrix, Paint, PaintStyle, Path, PointStyle, Texture,
};
use stipple_display_list::{
    DisplayList, DlAtlas, DlBlendMode, DlClipOp, DlColor, DlColorFilter, DlColorSource,
    DlDrawStyle, DlFilterMode, DlIRect, DlImage, DlImageFilter, DlImageSampling, DlMaskFilter,
    DlOpReceiver, DlPath, DlPathEffect, DlPoint, DlPointMode, DlRRect, DlRect,
    DlSrcRectConstraint, DlStrokeCap, DlStrokeJoin, DlTextBlob, DlVertices, SaveLayerOptions,
};

use crate::color_source::{PaintUpdate, compile_color_source};
use crate::conversions::{
    arc_path, circle_in, oval_path, path_from_text_blob, rrect_path, text_frame_from_blob,
    to_blend_mode, to_clip_operation, to_color, to_dl_rect, to_filter_sampler_descriptor, to_path,
    to_point, to_rect, to_rs_transform, to_sampler_descriptor, to_stroke_cap, to_stroke_join,
    to_vertices,
};
use crate::filters::{to_color_filter, to_image_filter_proc, to_mask_blur_descriptor};
use crate::nine_patch::nine_patch_rects;
use crate::shadow::{occluder_height, shadow_mask_blur, shadow_offset, spot_color};

fn unimplemented(operation: &'static str) {
    tracing::error!(operation, "unimplemented");
}

/// Plays display-list commands into a [`Canvas`].
///
/// The dispatcher owns the canvas for the duration of a recording pass and
/// keeps the paint that display-list attribute setters build up. Draws hand a
/// copy of that paint to the canvas.
///
/// The *initial matrix* is the transform in effect when playback of the
/// current display list began. `transform_reset` returns to it rather than to
/// identity, so a nested list cannot escape the transform of the op that
/// embedded it.
///
/// ```
/// use stipple_canvas_ref::RefCanvas;
/// use stipple_display_list::{DisplayListBuilder, DlColor, DlOpReceiver, DlRect};
/// use stipple_dispatch::Dispatcher;
///
/// let mut builder = DisplayListBuilder::new();
/// builder.set_color(DlColor::RED);
/// builder.draw_rect(&DlRect::from_ltrb(0.0, 0.0, 10.0, 10.0));
/// let display_list = builder.build();
///
/// let mut dispatcher = Dispatcher::new(RefCanvas::new());
/// display_list.dispatch(&mut dispatcher);
/// let picture = dispatcher.end_recording_as_picture();
/// assert_eq!(picture.draws().count(), 1);
/// ```
#[derive(Debug)]
pub struct Dispatcher<C: Canvas> {
    canvas: C,
    paint: Paint,
    initial_matrix: Matrix,
}

impl<C: Canvas> Dispatcher<C> {
    /// Start a recording pass on `canvas` with a default paint.
    pub fn new(canvas: C) -> Self {
        Self {
            canvas,
            paint: Paint::default(),
            initial_matrix: Matrix::IDENTITY,
        }
    }

    /// The paint that the next draw will use.
    pub fn paint(&self) -> &Paint {
        &self.paint
    }

    /// Transform in effect when playback of the current list began.
    pub fn initial_matrix(&self) -> Matrix {
        self.initial_matrix
    }

    /// The target canvas.
    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// The target canvas, mutably.
    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    /// Give up the dispatcher and return the canvas.
    pub fn into_canvas(self) -> C {
        self.canvas
    }

    /// Finish the pass and return the canvas's picture.
    pub fn end_recording_as_picture(&mut self) -> C::Picture {
        let _span = tracing::trace_span!("end_recording_as_picture").entered();
        self.canvas.end_recording_as_picture()
    }

    fn draw_image_texture(
        &mut self,
        texture: &Arc<Texture>,
        src: Rect,
        dst: Rect,
        sampling: DlImageSampling,
        render_with_attributes: bool,
    ) {
        let default_paint;
        let paint = if render_with_attributes {
            &self.paint
        } else {
            default_paint = Paint::default();
            &default_paint
        };
        self.canvas.draw_image_rect(
            texture.clone(),
            src,
            dst,
            paint,
            to_sampler_descriptor(sampling),
        );
    }
}

// Draw `path` through the cheapest canvas primitive that matches its shape.
fn draw_shape<C: Canvas>(canvas: &mut C, path: &DlPath, paint: &Paint) {
    if let Some(rect) = path.is_rect() {
        canvas.draw_rect(to_rect(&rect), paint);
    } else if let Some(rrect) = path.is_rrect()
        && rrect.is_simple()
    {
        canvas.draw_rrect(to_rect(&rrect.rect), f64::from(rrect.simple_radius()), paint);
    } else if let Some((center, radius)) = path.is_oval().as_ref().and_then(circle_in) {
        canvas.draw_circle(center, radius, paint);
    } else {
        canvas.draw_path(to_path(path), paint);
    }
}

fn line_path(p0: DlPoint, p1: DlPoint) -> Path {
    Path::from_shape(&Line::new(to_point(p0), to_point(p1)))
}

/// Saved dispatcher state for the duration of a nested playback.
///
/// Dropping the scope restores the canvas to the save depth it had on entry
/// and puts back the paint and initial matrix, even if playback unwinds.
struct PlaybackScope<'a, C: Canvas> {
    dispatcher: &'a mut Dispatcher<C>,
    saved_paint: Paint,
    saved_initial_matrix: Matrix,
    saved_save_count: usize,
}

impl<'a, C: Canvas> PlaybackScope<'a, C> {
    fn enter(dispatcher: &'a mut Dispatcher<C>) -> Self {
        Self {
            saved_paint: dispatcher.paint.clone(),
            saved_initial_matrix: dispatcher.initial_matrix,
            saved_save_count: dispatcher.canvas.save_count(),
            dispatcher,
        }
    }
}

impl<C: Canvas> Deref for PlaybackScope<'_, C> {
    type Target = Dispatcher<C>;

    fn deref(&self) -> &Dispatcher<C> {
        self.dispatcher
    }
}

impl<C: Canvas> DerefMut for PlaybackScope<'_, C> {
    fn deref_mut(&mut self) -> &mut Dispatcher<C> {
        self.dispatcher
    }
}

impl<C: Canvas> Drop for PlaybackScope<'_, C> {
    fn drop(&mut self) {
        self.dispatcher.canvas.restore_to_count(self.saved_save_count);
        self.dispatcher.initial_matrix = self.saved_initial_matrix;
        self.dispatcher.paint = mem::take(&mut self.saved_paint);
    }
}

impl<C: Canvas> DlOpReceiver for Dispatcher<C> {
    fn set_anti_alias(&mut self, _aa: bool) {}

    fn set_dither(&mut self, dither: bool) {
        self.paint.dither = dither;
    }

    fn set_draw_style(&mut self, style: DlDrawStyle) {
        match style {
            DlDrawStyle::Fill => self.paint.style = PaintStyle::Fill,
            DlDrawStyle::Stroke => self.paint.style = PaintStyle::Stroke,
            DlDrawStyle::StrokeAndFill => unimplemented("stroke and fill draw style"),
        }
    }

    fn set_color(&mut self, color: DlColor) {
        self.paint.color = to_color(color);
    }

    fn set_stroke_width(&mut self, width: f32) {
        self.paint.stroke_width = width;
    }

    fn set_stroke_miter(&mut self, limit: f32) {
        self.paint.stroke_miter = limit;
    }

    fn set_stroke_cap(&mut self, cap: DlStrokeCap) {
        self.paint.stroke_cap = to_stroke_cap(cap);
    }

    fn set_stroke_join(&mut self, join: DlStrokeJoin) {
        self.paint.stroke_join = to_stroke_join(join);
    }

    fn set_color_source(&mut self, source: Option<&DlColorSource>) {
        match compile_color_source(source) {
            PaintUpdate::Source(source) => self.paint.color_source = source,
            PaintUpdate::SolidColor(color) => {
                self.paint.color_source = ColorSource::Color;
                self.paint.color = color;
            }
            PaintUpdate::Unchanged => {}
        }
    }

    fn set_color_filter(&mut self, filter: Option<&DlColorFilter>) {
        self.paint.color_filter = filter.and_then(to_color_filter);
    }

    fn set_invert_colors(&mut self, invert: bool) {
        self.paint.invert_colors = invert;
    }

    fn set_blend_mode(&mut self, mode: DlBlendMode) {
        self.paint.blend_mode = to_blend_mode(mode);
    }

    fn set_path_effect(&mut self, _effect: Option<&DlPathEffect>) {
        unimplemented("path effect");
    }

    fn set_mask_filter(&mut self, filter: Option<&DlMaskFilter>) {
        self.paint.mask_blur_descriptor = filter.and_then(to_mask_blur_descriptor);
    }

    fn set_image_filter(&mut self, filter: Option<&DlImageFilter>) {
        self.paint.image_filter = filter.and_then(to_image_filter_proc);
    }

    fn save(&mut self) {
        self.canvas.save();
    }

    fn save_layer(
        &mut self,
        bounds: Option<&DlRect>,
        options: SaveLayerOptions,
        backdrop: Option<&DlImageFilter>,
    ) {
        let paint = if options.renders_with_attributes() {
            self.paint.clone()
        } else {
            Paint::default()
        };
        self.canvas.save_layer(
            &paint,
            bounds.map(to_rect),
            backdrop.and_then(to_image_filter_proc),
        );
    }

    fn restore(&mut self) {
        self.canvas.restore();
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.canvas
            .concat(&Matrix::translation(f64::from(tx), f64::from(ty), 0.0));
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.canvas
            .concat(&Matrix::scale(f64::from(sx), f64::from(sy), 1.0));
    }

    fn rotate(&mut self, degrees: f32) {
        self.canvas
            .concat(&Matrix::rotation_z(f64::from(degrees).to_radians()));
    }

    fn skew(&mut self, sx: f32, sy: f32) {
        self.canvas.concat(&Matrix::skew(f64::from(sx), f64::from(sy)));
    }

    fn transform_2d_affine(&mut self, mxx: f32, mxy: f32, mxt: f32, myx: f32, myy: f32, myt: f32) {
        self.transform_full_perspective(
            mxx, mxy, 0.0, mxt, //
            myx, myy, 0.0, myt, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        );
    }

    fn transform_full_perspective(
        &mut self,
        mxx: f32,
        mxy: f32,
        mxz: f32,
        mxt: f32,
        myx: f32,
        myy: f32,
        myz: f32,
        myt: f32,
        mzx: f32,
        mzy: f32,
        mzz: f32,
        mzt: f32,
        mwx: f32,
        mwy: f32,
        mwz: f32,
        mwt: f32,
    ) {
        #[rustfmt::skip]
        let rows = [
            mxx, mxy, mxz, mxt,
            myx, myy, myz, myt,
            mzx, mzy, mzz, mzt,
            mwx, mwy, mwz, mwt,
        ];
        self.canvas
            .concat(&Matrix::from_row_major(rows.map(f64::from)));
    }

    fn transform_reset(&mut self) {
        self.canvas.reset_transform();
        self.canvas.concat(&self.initial_matrix);
    }

    fn clip_rect(&mut self, rect: &DlRect, op: DlClipOp, _is_aa: bool) {
        self.canvas.clip_rect(to_rect(rect), to_clip_operation(op));
    }

    fn clip_rrect(&mut self, rrect: &DlRRect, op: DlClipOp, _is_aa: bool) {
        let op = to_clip_operation(op);
        if rrect.is_simple() {
            self.canvas
                .clip_rrect(to_rect(&rrect.rect), f64::from(rrect.simple_radius()), op);
        } else {
            self.canvas.clip_path(rrect_path(rrect), op);
        }
    }

    fn clip_path(&mut self, path: &DlPath, op: DlClipOp, _is_aa: bool) {
        self.canvas.clip_path(to_path(path), to_clip_operation(op));
    }

    fn draw_color(&mut self, color: DlColor, mode: DlBlendMode) {
        let paint = Paint {
            color: to_color(color),
            blend_mode: to_blend_mode(mode),
            ..Paint::default()
        };
        self.canvas.draw_paint(&paint);
    }

    fn draw_paint(&mut self) {
        self.canvas.draw_paint(&self.paint);
    }

    fn draw_line(&mut self, p0: DlPoint, p1: DlPoint) {
        let paint = Paint {
            style: PaintStyle::Stroke,
            ..self.paint.clone()
        };
        self.canvas.draw_path(line_path(p0, p1), &paint);
    }

    fn draw_rect(&mut self, rect: &DlRect) {
        self.canvas.draw_rect(to_rect(rect), &self.paint);
    }

    fn draw_oval(&mut self, bounds: &DlRect) {
        match circle_in(bounds) {
            Some((center, radius)) => self.canvas.draw_circle(center, radius, &self.paint),
            None => self.canvas.draw_path(oval_path(bounds), &self.paint),
        }
    }

    fn draw_circle(&mut self, center: DlPoint, radius: f32) {
        self.canvas
            .draw_circle(to_point(center), f64::from(radius), &self.paint);
    }

    fn draw_rrect(&mut self, rrect: &DlRRect) {
        if rrect.is_simple() {
            self.canvas.draw_rrect(
                to_rect(&rrect.rect),
                f64::from(rrect.simple_radius()),
                &self.paint,
            );
        } else {
            self.canvas.draw_path(rrect_path(rrect), &self.paint);
        }
    }

    fn draw_drrect(&mut self, outer: &DlRRect, inner: &DlRRect) {
        let mut bez = BezPath::new();
        bez.extend(rrect_path(outer).bez);
        bez.extend(rrect_path(inner).bez);
        let path = Path::new(bez).with_fill(FillRule::EvenOdd);
        self.canvas.draw_path(path, &self.paint);
    }

    fn draw_path(&mut self, path: &DlPath) {
        draw_shape(&mut self.canvas, path, &self.paint);
    }

    fn draw_arc(
        &mut self,
        oval_bounds: &DlRect,
        start_degrees: f32,
        sweep_degrees: f32,
        use_center: bool,
    ) {
        let path = arc_path(oval_bounds, start_degrees, sweep_degrees, use_center);
        self.canvas.draw_path(path, &self.paint);
    }

    fn draw_points(&mut self, mode: DlPointMode, points: &[DlPoint]) {
        let paint = Paint {
            style: PaintStyle::Stroke,
            ..self.paint.clone()
        };
        match mode {
            DlPointMode::Points => {
                // Butt caps draw squares too.
                let style = if paint.stroke_cap == Cap::Round {
                    PointStyle::Round
                } else {
                    PointStyle::Square
                };
                let mut radius = f64::from(paint.stroke_width);
                if radius > 0.0 {
                    radius /= 2.0;
                }
                let points = points.iter().copied().map(to_point).collect();
                self.canvas.draw_points(points, radius, &paint, style);
            }
            DlPointMode::Lines => {
                for pair in points.chunks_exact(2) {
                    self.canvas.draw_path(line_path(pair[0], pair[1]), &paint);
                }
            }
            DlPointMode::Polygon => {
                for segment in points.windows(2) {
                    self.canvas
                        .draw_path(line_path(segment[0], segment[1]), &paint);
                }
            }
        }
    }

    fn draw_vertices(&mut self, vertices: &DlVertices, mode: DlBlendMode) {
        self.canvas
            .draw_vertices(to_vertices(vertices), to_blend_mode(mode), &self.paint);
    }

    fn draw_image(
        &mut self,
        image: Option<&DlImage>,
        point: DlPoint,
        sampling: DlImageSampling,
        render_with_attributes: bool,
    ) {
        let Some(texture) = image.and_then(DlImage::texture) else {
            return;
        };
        let size = texture.size();
        let src = Rect::from_origin_size(Point::ZERO, size);
        let dst = Rect::from_origin_size(to_point(point), size);
        self.draw_image_rect(
            image,
            &to_dl_rect(src),
            &to_dl_rect(dst),
            sampling,
            render_with_attributes,
            DlSrcRectConstraint::Strict,
        );
    }

    fn draw_image_rect(
        &mut self,
        image: Option<&DlImage>,
        src: &DlRect,
        dst: &DlRect,
        sampling: DlImageSampling,
        render_with_attributes: bool,
        _constraint: DlSrcRectConstraint,
    ) {
        let Some(texture) = image.and_then(DlImage::texture) else {
            return;
        };
        self.draw_image_texture(
            texture,
            to_rect(src),
            to_rect(dst),
            sampling,
            render_with_attributes,
        );
    }

    fn draw_image_nine(
        &mut self,
        image: Option<&DlImage>,
        center: &DlIRect,
        dst: &DlRect,
        filter: DlFilterMode,
        _render_with_attributes: bool,
    ) {
        let Some(texture) = image.and_then(DlImage::texture) else {
            return;
        };
        let center = Rect::new(
            f64::from(center.left),
            f64::from(center.top),
            f64::from(center.right),
            f64::from(center.bottom),
        );
        let sampler = to_filter_sampler_descriptor(filter);
        for (src, dst) in nine_patch_rects(texture.size(), center, to_rect(dst)) {
            self.canvas
                .draw_image_rect(texture.clone(), src, dst, &self.paint, sampler);
        }
    }

    fn draw_atlas(&mut self, atlas: &DlAtlas, _render_with_attributes: bool) {
        let Some(texture) = atlas.image().and_then(DlImage::texture) else {
            return;
        };
        let atlas = Atlas {
            texture: texture.clone(),
            transforms: atlas.transforms().iter().map(to_rs_transform).collect(),
            texture_rects: atlas.texture_rects().iter().map(to_rect).collect(),
            colors: atlas
                .colors()
                .map(|colors| colors.iter().copied().map(to_color).collect())
                .unwrap_or_default(),
            blend_mode: to_blend_mode(atlas.blend_mode()),
            sampler: to_sampler_descriptor(atlas.sampling()),
            cull_rect: atlas.cull_rect().as_ref().map(to_rect),
        };
        self.canvas.draw_atlas(atlas, &self.paint);
    }

    fn draw_display_list(&mut self, display_list: &DisplayList, opacity: f32) {
        let mut scope = PlaybackScope::enter(self);

        // Clip and transform changes made by the nested list are undone when
        // the scope restores to its entry depth.
        scope.canvas.save();
        scope.initial_matrix = scope.canvas.current_transform();
        scope.paint = Paint::default();

        if opacity < 1.0 {
            let layer_paint = Paint::with_color(Color::new([0.0, 0.0, 0.0, opacity]));
            scope.canvas.save_layer(&layer_paint, None, None);
        }

        // TODO: cull under perspective once local culling bounds can be
        // computed for projective transforms.
        let cull_rect = if display_list.has_rtree() && !scope.initial_matrix.has_perspective() {
            scope.canvas.current_local_culling_bounds()
        } else {
            None
        };

        let dispatcher: &mut Self = &mut scope;
        match cull_rect {
            Some(cull_rect) => display_list.dispatch_culled(dispatcher, &to_dl_rect(cull_rect)),
            None => display_list.dispatch(dispatcher),
        }
    }

    fn draw_text_blob(&mut self, blob: &DlTextBlob, x: f32, y: f32) {
        let Some(frame) = text_frame_from_blob(blob) else {
            return;
        };
        // The glyph fast path only fills with a solid color.
        if self.paint.style == PaintStyle::Stroke || !self.paint.is_solid_color() {
            let bounds = blob.bounds();
            let shift = Point::new(f64::from(x + bounds.left), f64::from(y + bounds.top));
            self.canvas
                .draw_path(path_from_text_blob(blob, shift), &self.paint);
            return;
        }
        self.canvas.draw_text_frame(
            frame,
            Point::new(f64::from(x), f64::from(y)),
            &self.paint,
        );
    }

    fn draw_shadow(
        &mut self,
        path: &DlPath,
        color: DlColor,
        elevation: f32,
        _transparent_occluder: bool,
        dpr: f32,
    ) {
        let occluder_z = occluder_height(elevation, dpr);
        let y_scale = self.canvas.current_transform().basis_scale()[1];
        let paint = Paint {
            style: PaintStyle::Fill,
            color: spot_color(to_color(color)),
            mask_blur_descriptor: Some(shadow_mask_blur(occluder_z, y_scale)),
            ..Paint::default()
        };

        self.canvas.save();
        self.canvas.pre_concat(&Matrix::translation(
            0.0,
            f64::from(shadow_offset(occluder_z)),
            0.0,
        ));
        draw_shape(&mut self.canvas, path, &paint);
        self.canvas.restore();
    }
}
