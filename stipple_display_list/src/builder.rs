// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use stipple_canvas::{Radius, Sigma};

use crate::{
    DisplayList, DlAtlas, DlBlendMode, DlClipOp, DlColor, DlColorFilter, DlColorSource,
    DlDrawStyle, DlFilterMode, DlIRect, DlImage, DlImageFilter, DlImageSampling, DlMaskFilter,
    DlMatrix, DlOp, DlOpReceiver, DlPath, DlPathEffect, DlPoint, DlPointMode, DlRRect, DlRTree,
    DlRect, DlSrcRectConstraint, DlStrokeCap, DlStrokeJoin, DlTextBlob, DlVertices,
    SaveLayerOptions,
};

const UNBOUNDED: DlRect = DlRect::from_ltrb(
    f32::NEG_INFINITY,
    f32::NEG_INFINITY,
    f32::INFINITY,
    f32::INFINITY,
);

// The subset of paint state that affects how far a draw reaches.
#[derive(Clone, Debug)]
struct BoundsState {
    style: DlDrawStyle,
    stroke_width: f32,
    stroke_join: DlStrokeJoin,
    stroke_miter: f32,
    mask_sigma: f32,
    has_image_filter: bool,
}

impl Default for BoundsState {
    fn default() -> Self {
        Self {
            style: DlDrawStyle::Fill,
            stroke_width: 0.0,
            stroke_join: DlStrokeJoin::Miter,
            stroke_miter: 4.0,
            mask_sigma: 0.0,
            has_image_filter: false,
        }
    }
}

impl BoundsState {
    fn stroke_outset(&self) -> f32 {
        let half = self.stroke_width.max(1.0) * 0.5;
        if self.stroke_join == DlStrokeJoin::Miter {
            half * self.stroke_miter.max(1.0)
        } else {
            half
        }
    }
}

// What `restore` brings back.
#[derive(Copy, Clone, Debug)]
struct SaveFrame {
    transform: DlMatrix,
    in_filtered_layer: bool,
}

/// Records [`DlOpReceiver`] calls into a [`DisplayList`].
///
/// The builder tracks its own transform and enough paint state to compute
/// conservative bounds for each drawing command. Anything drawn inside a
/// layer that is filtered when composited is recorded as unbounded.
#[derive(Debug)]
pub struct DisplayListBuilder {
    ops: Vec<DlOp>,
    op_bounds: Vec<(usize, DlRect)>,
    bounds: Option<DlRect>,
    use_rtree: bool,
    transform: DlMatrix,
    save_stack: Vec<SaveFrame>,
    in_filtered_layer: bool,
    paint: BoundsState,
}

impl Default for DisplayListBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayListBuilder {
    /// A builder that records no culling index.
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            op_bounds: Vec::new(),
            bounds: None,
            use_rtree: false,
            transform: DlMatrix::IDENTITY,
            save_stack: Vec::new(),
            in_filtered_layer: false,
            paint: BoundsState::default(),
        }
    }

    /// A builder that records an R-tree of drawing command bounds.
    pub fn with_rtree() -> Self {
        Self {
            use_rtree: true,
            ..Self::new()
        }
    }

    /// Finish recording.
    pub fn build(self) -> DisplayList {
        let rtree = self.use_rtree.then(|| DlRTree::new(self.op_bounds));
        DisplayList {
            ops: self.ops,
            bounds: self.bounds.unwrap_or_default(),
            rtree,
        }
    }

    fn push(&mut self, op: DlOp) {
        self.ops.push(op);
    }

    fn push_draw(&mut self, op: DlOp, local: Option<DlRect>) {
        let device = match local {
            Some(rect)
                if !self.paint.has_image_filter
                    && !self.in_filtered_layer
                    && rect.left.is_finite() =>
            {
                let sigma = self.paint.mask_sigma;
                let rect = if sigma > 0.0 {
                    rect.outset(3.0 * sigma, 3.0 * sigma)
                } else {
                    rect
                };
                self.transform.map_rect(&rect)
            }
            _ => UNBOUNDED,
        };
        self.bounds = Some(match self.bounds {
            Some(bounds) => bounds.union(&device),
            None => device,
        });
        self.op_bounds.push((self.ops.len(), device));
        self.ops.push(op);
    }

    fn styled(&self, rect: DlRect) -> DlRect {
        match self.paint.style {
            DlDrawStyle::Fill => rect,
            DlDrawStyle::Stroke | DlDrawStyle::StrokeAndFill => {
                let outset = self.paint.stroke_outset();
                rect.outset(outset, outset)
            }
        }
    }

    fn stroked(&self, rect: DlRect) -> DlRect {
        let outset = self.paint.stroke_outset();
        rect.outset(outset, outset)
    }

    fn concat(&mut self, matrix: &DlMatrix) {
        self.transform = self.transform.concat(matrix);
    }

    fn push_save_frame(&mut self) {
        self.save_stack.push(SaveFrame {
            transform: self.transform,
            in_filtered_layer: self.in_filtered_layer,
        });
    }
}

impl DlOpReceiver for DisplayListBuilder {
    fn set_anti_alias(&mut self, aa: bool) {
        self.push(DlOp::SetAntiAlias(aa));
    }

    fn set_dither(&mut self, dither: bool) {
        self.push(DlOp::SetDither(dither));
    }

    fn set_draw_style(&mut self, style: DlDrawStyle) {
        self.paint.style = style;
        self.push(DlOp::SetDrawStyle(style));
    }

    fn set_color(&mut self, color: DlColor) {
        self.push(DlOp::SetColor(color));
    }

    fn set_stroke_width(&mut self, width: f32) {
        self.paint.stroke_width = width;
        self.push(DlOp::SetStrokeWidth(width));
    }

    fn set_stroke_miter(&mut self, limit: f32) {
        self.paint.stroke_miter = limit;
        self.push(DlOp::SetStrokeMiter(limit));
    }

    fn set_stroke_cap(&mut self, cap: DlStrokeCap) {
        self.push(DlOp::SetStrokeCap(cap));
    }

    fn set_stroke_join(&mut self, join: DlStrokeJoin) {
        self.paint.stroke_join = join;
        self.push(DlOp::SetStrokeJoin(join));
    }

    fn set_color_source(&mut self, source: Option<&DlColorSource>) {
        self.push(DlOp::SetColorSource(source.cloned()));
    }

    fn set_color_filter(&mut self, filter: Option<&DlColorFilter>) {
        self.push(DlOp::SetColorFilter(filter.cloned()));
    }

    fn set_invert_colors(&mut self, invert: bool) {
        self.push(DlOp::SetInvertColors(invert));
    }

    fn set_blend_mode(&mut self, mode: DlBlendMode) {
        self.push(DlOp::SetBlendMode(mode));
    }

    fn set_path_effect(&mut self, effect: Option<&DlPathEffect>) {
        self.push(DlOp::SetPathEffect(effect.cloned()));
    }

    fn set_mask_filter(&mut self, filter: Option<&DlMaskFilter>) {
        self.paint.mask_sigma = match filter {
            Some(DlMaskFilter::Blur { sigma, .. }) => *sigma,
            None => 0.0,
        };
        self.push(DlOp::SetMaskFilter(filter.copied()));
    }

    fn set_image_filter(&mut self, filter: Option<&DlImageFilter>) {
        self.paint.has_image_filter = filter.is_some();
        self.push(DlOp::SetImageFilter(filter.cloned()));
    }

    fn save(&mut self) {
        self.push_save_frame();
        self.push(DlOp::Save);
    }

    fn save_layer(
        &mut self,
        bounds: Option<&DlRect>,
        options: SaveLayerOptions,
        backdrop: Option<&DlImageFilter>,
    ) {
        self.push_save_frame();
        // Filters spread layer content past the bounds of what was drawn.
        if (options.renders_with_attributes() && self.paint.has_image_filter)
            || backdrop.is_some()
        {
            self.in_filtered_layer = true;
        }
        self.push(DlOp::SaveLayer {
            bounds: bounds.copied(),
            options,
            backdrop: backdrop.cloned(),
        });
    }

    fn restore(&mut self) {
        if let Some(frame) = self.save_stack.pop() {
            self.transform = frame.transform;
            self.in_filtered_layer = frame.in_filtered_layer;
            self.push(DlOp::Restore);
        }
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.concat(&DlMatrix::translate(tx, ty));
        self.push(DlOp::Translate(tx, ty));
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.concat(&DlMatrix::scale(sx, sy));
        self.push(DlOp::Scale(sx, sy));
    }

    fn rotate(&mut self, degrees: f32) {
        self.concat(&DlMatrix::rotate(degrees));
        self.push(DlOp::Rotate(degrees));
    }

    fn skew(&mut self, sx: f32, sy: f32) {
        self.concat(&DlMatrix::skew(sx, sy));
        self.push(DlOp::Skew(sx, sy));
    }

    fn transform_2d_affine(&mut self, mxx: f32, mxy: f32, mxt: f32, myx: f32, myy: f32, myt: f32) {
        self.concat(&DlMatrix::new([mxx, mxy, mxt, myx, myy, myt, 0.0, 0.0, 1.0]));
        self.push(DlOp::Transform2DAffine([mxx, mxy, mxt, myx, myy, myt]));
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
        // Bounds live in the z = 0 plane, so the z row and column drop out.
        self.concat(&DlMatrix::new([mxx, mxy, mxt, myx, myy, myt, mwx, mwy, mwt]));
        self.push(DlOp::TransformFullPerspective([
            mxx, mxy, mxz, mxt, myx, myy, myz, myt, mzx, mzy, mzz, mzt, mwx, mwy, mwz, mwt,
        ]));
    }

    fn transform_reset(&mut self) {
        self.transform = DlMatrix::IDENTITY;
        self.push(DlOp::TransformReset);
    }

    fn clip_rect(&mut self, rect: &DlRect, op: DlClipOp, is_aa: bool) {
        self.push(DlOp::ClipRect {
            rect: *rect,
            op,
            is_aa,
        });
    }

    fn clip_rrect(&mut self, rrect: &DlRRect, op: DlClipOp, is_aa: bool) {
        self.push(DlOp::ClipRRect {
            rrect: *rrect,
            op,
            is_aa,
        });
    }

    fn clip_path(&mut self, path: &DlPath, op: DlClipOp, is_aa: bool) {
        self.push(DlOp::ClipPath {
            path: path.clone(),
            op,
            is_aa,
        });
    }

    fn draw_color(&mut self, color: DlColor, mode: DlBlendMode) {
        self.push_draw(DlOp::DrawColor { color, mode }, None);
    }

    fn draw_paint(&mut self) {
        self.push_draw(DlOp::DrawPaint, None);
    }

    fn draw_line(&mut self, p0: DlPoint, p1: DlPoint) {
        let bounds = DlRect::from_points(&[p0, p1]).map(|r| self.stroked(r));
        self.push_draw(DlOp::DrawLine(p0, p1), bounds);
    }

    fn draw_rect(&mut self, rect: &DlRect) {
        self.push_draw(DlOp::DrawRect(*rect), Some(self.styled(*rect)));
    }

    fn draw_oval(&mut self, bounds: &DlRect) {
        self.push_draw(DlOp::DrawOval(*bounds), Some(self.styled(*bounds)));
    }

    fn draw_circle(&mut self, center: DlPoint, radius: f32) {
        let rect = DlRect::from_ltrb(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        );
        self.push_draw(DlOp::DrawCircle { center, radius }, Some(self.styled(rect)));
    }

    fn draw_rrect(&mut self, rrect: &DlRRect) {
        self.push_draw(DlOp::DrawRRect(*rrect), Some(self.styled(rrect.rect)));
    }

    fn draw_drrect(&mut self, outer: &DlRRect, inner: &DlRRect) {
        self.push_draw(
            DlOp::DrawDRRect {
                outer: *outer,
                inner: *inner,
            },
            Some(self.styled(outer.rect)),
        );
    }

    fn draw_path(&mut self, path: &DlPath) {
        let bounds = self.styled(path.bounds());
        self.push_draw(DlOp::DrawPath(path.clone()), Some(bounds));
    }

    fn draw_arc(
        &mut self,
        oval_bounds: &DlRect,
        start_degrees: f32,
        sweep_degrees: f32,
        use_center: bool,
    ) {
        self.push_draw(
            DlOp::DrawArc {
                oval_bounds: *oval_bounds,
                start_degrees,
                sweep_degrees,
                use_center,
            },
            Some(self.styled(*oval_bounds)),
        );
    }

    fn draw_points(&mut self, mode: DlPointMode, points: &[DlPoint]) {
        let bounds = DlRect::from_points(points).map(|r| self.stroked(r));
        self.push_draw(
            DlOp::DrawPoints {
                mode,
                points: points.to_vec(),
            },
            bounds,
        );
    }

    fn draw_vertices(&mut self, vertices: &DlVertices, mode: DlBlendMode) {
        self.push_draw(
            DlOp::DrawVertices {
                vertices: Arc::new(vertices.clone()),
                mode,
            },
            Some(vertices.bounds()),
        );
    }

    fn draw_image(
        &mut self,
        image: Option<&DlImage>,
        point: DlPoint,
        sampling: DlImageSampling,
        render_with_attributes: bool,
    ) {
        let bounds = image.map(|image| {
            DlRect::from_xywh(point.x, point.y, image.width() as f32, image.height() as f32)
        });
        self.push_draw(
            DlOp::DrawImage {
                image: image.cloned(),
                point,
                sampling,
                render_with_attributes,
            },
            Some(bounds.unwrap_or_default()),
        );
    }

    fn draw_image_rect(
        &mut self,
        image: Option<&DlImage>,
        src: &DlRect,
        dst: &DlRect,
        sampling: DlImageSampling,
        render_with_attributes: bool,
        constraint: DlSrcRectConstraint,
    ) {
        self.push_draw(
            DlOp::DrawImageRect {
                image: image.cloned(),
                src: *src,
                dst: *dst,
                sampling,
                render_with_attributes,
                constraint,
            },
            Some(*dst),
        );
    }

    fn draw_image_nine(
        &mut self,
        image: Option<&DlImage>,
        center: &DlIRect,
        dst: &DlRect,
        filter: DlFilterMode,
        render_with_attributes: bool,
    ) {
        self.push_draw(
            DlOp::DrawImageNine {
                image: image.cloned(),
                center: *center,
                dst: *dst,
                filter,
                render_with_attributes,
            },
            Some(*dst),
        );
    }

    fn draw_atlas(&mut self, atlas: &DlAtlas, render_with_attributes: bool) {
        self.push_draw(
            DlOp::DrawAtlas {
                atlas: Arc::new(atlas.clone()),
                render_with_attributes,
            },
            Some(atlas.bounds()),
        );
    }

    fn draw_display_list(&mut self, display_list: &DisplayList, opacity: f32) {
        let bounds = display_list.bounds();
        self.push_draw(
            DlOp::DrawDisplayList {
                display_list: Arc::new(display_list.clone()),
                opacity,
            },
            Some(bounds),
        );
    }

    fn draw_text_blob(&mut self, blob: &DlTextBlob, x: f32, y: f32) {
        let b = blob.bounds();
        let bounds = DlRect::from_ltrb(b.left + x, b.top + y, b.right + x, b.bottom + y);
        self.push_draw(
            DlOp::DrawTextBlob {
                blob: Arc::new(blob.clone()),
                x,
                y,
            },
            Some(self.styled(bounds)),
        );
    }

    fn draw_shadow(
        &mut self,
        path: &DlPath,
        color: DlColor,
        elevation: f32,
        transparent_occluder: bool,
        dpr: f32,
    ) {
        // The shadow is offset by the occluder height and blurred by a radius of
        // the same height in device space, which reaches three sigma.
        let occluder_z = (elevation * dpr).abs();
        let y_scale = self.transform.y_scale();
        let bounds = (y_scale > 0.0).then(|| {
            let reach = 3.0 * Sigma::from(Radius(occluder_z / y_scale)).0;
            let shape = path.bounds();
            let shifted = DlRect::from_ltrb(
                shape.left,
                shape.top + occluder_z,
                shape.right,
                shape.bottom + occluder_z,
            );
            shape.union(&shifted).outset(reach, reach)
        });
        self.push_draw(
            DlOp::DrawShadow {
                path: path.clone(),
                color,
                elevation,
                transparent_occluder,
                dpr,
            },
            bounds,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DlTileMode;

    fn blur(sigma: f32) -> DlImageFilter {
        DlImageFilter::Blur {
            sigma_x: sigma,
            sigma_y: sigma,
            tile_mode: DlTileMode::Decal,
        }
    }

    #[test]
    fn records_ops_in_order() {
        let mut builder = DisplayListBuilder::new();
        builder.set_color(DlColor::RED);
        builder.draw_rect(&DlRect::from_ltrb(0.0, 0.0, 10.0, 10.0));
        let list = builder.build();

        assert_eq!(
            list.ops(),
            &[
                DlOp::SetColor(DlColor::RED),
                DlOp::DrawRect(DlRect::from_ltrb(0.0, 0.0, 10.0, 10.0)),
            ]
        );
        assert!(!list.has_rtree());
        assert_eq!(list.bounds(), DlRect::from_ltrb(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn bounds_follow_transform_and_stroke() {
        let mut builder = DisplayListBuilder::new();
        builder.save();
        builder.translate(100.0, 0.0);
        builder.set_draw_style(DlDrawStyle::Stroke);
        builder.set_stroke_width(4.0);
        builder.set_stroke_join(DlStrokeJoin::Round);
        builder.draw_rect(&DlRect::from_ltrb(0.0, 0.0, 10.0, 10.0));
        builder.restore();
        builder.set_draw_style(DlDrawStyle::Fill);
        builder.draw_circle(DlPoint::new(0.0, 0.0), 5.0);

        let list = builder.build();
        assert_eq!(list.bounds(), DlRect::from_ltrb(-5.0, -5.0, 112.0, 12.0));
    }

    #[test]
    fn unmatched_restore_is_dropped() {
        let mut builder = DisplayListBuilder::new();
        builder.restore();
        assert!(builder.build().is_empty());
    }

    #[test]
    fn draw_paint_is_unbounded() {
        let mut builder = DisplayListBuilder::with_rtree();
        builder.draw_paint();
        let list = builder.build();
        assert!(list.bounds().right.is_infinite());
        assert!(list.has_rtree());
    }

    #[test]
    fn culled_dispatch_skips_offscreen_draws() {
        let mut builder = DisplayListBuilder::with_rtree();
        builder.set_color(DlColor::BLUE);
        builder.draw_rect(&DlRect::from_ltrb(0.0, 0.0, 10.0, 10.0));
        builder.draw_rect(&DlRect::from_ltrb(200.0, 200.0, 210.0, 210.0));
        builder.draw_paint();
        let list = builder.build();

        let mut sink = DisplayListBuilder::new();
        list.dispatch_culled(&mut sink, &DlRect::from_ltrb(0.0, 0.0, 50.0, 50.0));
        let replayed = sink.build();
        assert_eq!(
            replayed.ops(),
            &[
                DlOp::SetColor(DlColor::BLUE),
                DlOp::DrawRect(DlRect::from_ltrb(0.0, 0.0, 10.0, 10.0)),
                DlOp::DrawPaint,
            ]
        );

        let mut everything = DisplayListBuilder::new();
        list.dispatch(&mut everything);
        assert_eq!(everything.build().len(), 4);
    }

    #[test]
    fn shadow_bounds_cover_three_sigma_of_blur() {
        let mut builder = DisplayListBuilder::new();
        let path = DlPath::rect(DlRect::from_ltrb(0.0, 0.0, 10.0, 10.0));
        builder.draw_shadow(&path, DlColor::BLACK, 10.0, false, 1.0);
        let bounds = builder.build().bounds();

        let reach = 3.0 * (10.0 / stipple_canvas::KERNEL_RADIUS_PER_SIGMA + 0.5);
        assert!(bounds.right >= 10.0 + reach - 1e-4, "right edge {}", bounds.right);
        assert!(bounds.left <= -reach + 1e-4, "left edge {}", bounds.left);
        assert!(bounds.bottom >= 20.0 + reach - 1e-4, "bottom edge {}", bounds.bottom);
    }

    #[test]
    fn shadow_blur_grows_under_downscale() {
        let path = DlPath::rect(DlRect::from_ltrb(0.0, 0.0, 10.0, 10.0));
        let mut unscaled = DisplayListBuilder::new();
        unscaled.draw_shadow(&path, DlColor::BLACK, 4.0, false, 1.0);
        let mut scaled = DisplayListBuilder::new();
        scaled.scale(0.5, 0.5);
        scaled.draw_shadow(&path, DlColor::BLACK, 4.0, false, 1.0);

        // Device bounds halve, but the local blur doubles to keep its device size.
        let unscaled = unscaled.build().bounds();
        let scaled = scaled.build().bounds();
        assert!(scaled.right > unscaled.right * 0.5);
    }

    #[test]
    fn filtered_layer_content_is_unbounded() {
        let mut builder = DisplayListBuilder::with_rtree();
        builder.set_image_filter(Some(&blur(10.0)));
        builder.save_layer(None, SaveLayerOptions::WITH_ATTRIBUTES, None);
        builder.set_image_filter(None);
        builder.draw_rect(&DlRect::from_ltrb(0.0, 0.0, 10.0, 10.0));
        builder.restore();
        builder.draw_rect(&DlRect::from_ltrb(0.0, 0.0, 10.0, 10.0));
        let list = builder.build();
        assert!(list.bounds().right.is_infinite());

        let mut sink = DisplayListBuilder::new();
        list.dispatch_culled(&mut sink, &DlRect::from_ltrb(22.0, 0.0, 60.0, 60.0));
        let draws = sink
            .build()
            .ops()
            .iter()
            .filter(|op| matches!(op, DlOp::DrawRect(_)))
            .count();
        assert_eq!(draws, 1, "only the draw inside the layer can reach the cull rect");
    }

    #[test]
    fn backdrop_layer_content_is_unbounded() {
        let mut builder = DisplayListBuilder::new();
        builder.save_layer(None, SaveLayerOptions::NO_ATTRIBUTES, Some(&blur(2.0)));
        builder.save();
        builder.draw_rect(&DlRect::from_ltrb(0.0, 0.0, 10.0, 10.0));
        builder.restore();
        builder.restore();
        assert!(builder.build().bounds().left.is_infinite());
    }

    #[test]
    fn layers_without_filters_keep_tight_bounds() {
        let mut builder = DisplayListBuilder::new();
        // Without attributes the layer ignores the current image filter.
        builder.set_image_filter(Some(&blur(10.0)));
        builder.save_layer(None, SaveLayerOptions::NO_ATTRIBUTES, None);
        builder.set_image_filter(None);
        builder.draw_rect(&DlRect::from_ltrb(0.0, 0.0, 10.0, 10.0));
        builder.restore();
        assert_eq!(builder.build().bounds(), DlRect::from_ltrb(0.0, 0.0, 10.0, 10.0));
    }
}
