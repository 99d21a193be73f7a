// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use crate::{
    DisplayList, DlAtlas, DlBlendMode, DlClipOp, DlColor, DlColorFilter, DlColorSource,
    DlDrawStyle, DlFilterMode, DlIRect, DlImage, DlImageFilter, DlImageSampling, DlMaskFilter,
    DlOpReceiver, DlPath, DlPathEffect, DlPoint, DlPointMode, DlRRect, DlRect,
    DlSrcRectConstraint, DlStrokeCap, DlStrokeJoin, DlTextBlob, DlVertices, SaveLayerOptions,
};

/// One recorded command.
///
/// Variants mirror the methods of [`DlOpReceiver`].
#[derive(Clone, Debug, PartialEq)]
#[expect(missing_docs, reason = "variants mirror the DlOpReceiver methods")]
pub enum DlOp {
    SetAntiAlias(bool),
    SetDither(bool),
    SetDrawStyle(DlDrawStyle),
    SetColor(DlColor),
    SetStrokeWidth(f32),
    SetStrokeMiter(f32),
    SetStrokeCap(DlStrokeCap),
    SetStrokeJoin(DlStrokeJoin),
    SetColorSource(Option<DlColorSource>),
    SetColorFilter(Option<DlColorFilter>),
    SetInvertColors(bool),
    SetBlendMode(DlBlendMode),
    SetPathEffect(Option<DlPathEffect>),
    SetMaskFilter(Option<DlMaskFilter>),
    SetImageFilter(Option<DlImageFilter>),
    Save,
    SaveLayer {
        bounds: Option<DlRect>,
        options: SaveLayerOptions,
        backdrop: Option<DlImageFilter>,
    },
    Restore,
    Translate(f32, f32),
    Scale(f32, f32),
    Rotate(f32),
    Skew(f32, f32),
    Transform2DAffine([f32; 6]),
    TransformFullPerspective([f32; 16]),
    TransformReset,
    ClipRect {
        rect: DlRect,
        op: DlClipOp,
        is_aa: bool,
    },
    ClipRRect {
        rrect: DlRRect,
        op: DlClipOp,
        is_aa: bool,
    },
    ClipPath {
        path: DlPath,
        op: DlClipOp,
        is_aa: bool,
    },
    DrawColor {
        color: DlColor,
        mode: DlBlendMode,
    },
    DrawPaint,
    DrawLine(DlPoint, DlPoint),
    DrawRect(DlRect),
    DrawOval(DlRect),
    DrawCircle {
        center: DlPoint,
        radius: f32,
    },
    DrawRRect(DlRRect),
    DrawDRRect {
        outer: DlRRect,
        inner: DlRRect,
    },
    DrawPath(DlPath),
    DrawArc {
        oval_bounds: DlRect,
        start_degrees: f32,
        sweep_degrees: f32,
        use_center: bool,
    },
    DrawPoints {
        mode: DlPointMode,
        points: Vec<DlPoint>,
    },
    DrawVertices {
        vertices: Arc<DlVertices>,
        mode: DlBlendMode,
    },
    DrawImage {
        image: Option<DlImage>,
        point: DlPoint,
        sampling: DlImageSampling,
        render_with_attributes: bool,
    },
    DrawImageRect {
        image: Option<DlImage>,
        src: DlRect,
        dst: DlRect,
        sampling: DlImageSampling,
        render_with_attributes: bool,
        constraint: DlSrcRectConstraint,
    },
    DrawImageNine {
        image: Option<DlImage>,
        center: DlIRect,
        dst: DlRect,
        filter: DlFilterMode,
        render_with_attributes: bool,
    },
    DrawAtlas {
        atlas: Arc<DlAtlas>,
        render_with_attributes: bool,
    },
    DrawDisplayList {
        display_list: Arc<DisplayList>,
        opacity: f32,
    },
    DrawTextBlob {
        blob: Arc<DlTextBlob>,
        x: f32,
        y: f32,
    },
    DrawShadow {
        path: DlPath,
        color: DlColor,
        elevation: f32,
        transparent_occluder: bool,
        dpr: f32,
    },
}

impl DlOp {
    /// Returns `true` for commands that produce pixels.
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            Self::DrawColor { .. }
                | Self::DrawPaint
                | Self::DrawLine(..)
                | Self::DrawRect(_)
                | Self::DrawOval(_)
                | Self::DrawCircle { .. }
                | Self::DrawRRect(_)
                | Self::DrawDRRect { .. }
                | Self::DrawPath(_)
                | Self::DrawArc { .. }
                | Self::DrawPoints { .. }
                | Self::DrawVertices { .. }
                | Self::DrawImage { .. }
                | Self::DrawImageRect { .. }
                | Self::DrawImageNine { .. }
                | Self::DrawAtlas { .. }
                | Self::DrawDisplayList { .. }
                | Self::DrawTextBlob { .. }
                | Self::DrawShadow { .. }
        )
    }

    /// Deliver this command to `receiver`.
    pub fn dispatch<R: DlOpReceiver + ?Sized>(&self, receiver: &mut R) {
        match self {
            Self::SetAntiAlias(aa) => receiver.set_anti_alias(*aa),
            Self::SetDither(dither) => receiver.set_dither(*dither),
            Self::SetDrawStyle(style) => receiver.set_draw_style(*style),
            Self::SetColor(color) => receiver.set_color(*color),
            Self::SetStrokeWidth(width) => receiver.set_stroke_width(*width),
            Self::SetStrokeMiter(limit) => receiver.set_stroke_miter(*limit),
            Self::SetStrokeCap(cap) => receiver.set_stroke_cap(*cap),
            Self::SetStrokeJoin(join) => receiver.set_stroke_join(*join),
            Self::SetColorSource(source) => receiver.set_color_source(source.as_ref()),
            Self::SetColorFilter(filter) => receiver.set_color_filter(filter.as_ref()),
            Self::SetInvertColors(invert) => receiver.set_invert_colors(*invert),
            Self::SetBlendMode(mode) => receiver.set_blend_mode(*mode),
            Self::SetPathEffect(effect) => receiver.set_path_effect(effect.as_ref()),
            Self::SetMaskFilter(filter) => receiver.set_mask_filter(filter.as_ref()),
            Self::SetImageFilter(filter) => receiver.set_image_filter(filter.as_ref()),
            Self::Save => receiver.save(),
            Self::SaveLayer {
                bounds,
                options,
                backdrop,
            } => receiver.save_layer(bounds.as_ref(), *options, backdrop.as_ref()),
            Self::Restore => receiver.restore(),
            Self::Translate(tx, ty) => receiver.translate(*tx, *ty),
            Self::Scale(sx, sy) => receiver.scale(*sx, *sy),
            Self::Rotate(degrees) => receiver.rotate(*degrees),
            Self::Skew(sx, sy) => receiver.skew(*sx, *sy),
            Self::Transform2DAffine([mxx, mxy, mxt, myx, myy, myt]) => {
                receiver.transform_2d_affine(*mxx, *mxy, *mxt, *myx, *myy, *myt);
            }
            Self::TransformFullPerspective(m) => receiver.transform_full_perspective(
                m[0], m[1], m[2], m[3], m[4], m[5], m[6], m[7], m[8], m[9], m[10], m[11], m[12],
                m[13], m[14], m[15],
            ),
            Self::TransformReset => receiver.transform_reset(),
            Self::ClipRect { rect, op, is_aa } => receiver.clip_rect(rect, *op, *is_aa),
            Self::ClipRRect { rrect, op, is_aa } => receiver.clip_rrect(rrect, *op, *is_aa),
            Self::ClipPath { path, op, is_aa } => receiver.clip_path(path, *op, *is_aa),
            Self::DrawColor { color, mode } => receiver.draw_color(*color, *mode),
            Self::DrawPaint => receiver.draw_paint(),
            Self::DrawLine(p0, p1) => receiver.draw_line(*p0, *p1),
            Self::DrawRect(rect) => receiver.draw_rect(rect),
            Self::DrawOval(bounds) => receiver.draw_oval(bounds),
            Self::DrawCircle { center, radius } => receiver.draw_circle(*center, *radius),
            Self::DrawRRect(rrect) => receiver.draw_rrect(rrect),
            Self::DrawDRRect { outer, inner } => receiver.draw_drrect(outer, inner),
            Self::DrawPath(path) => receiver.draw_path(path),
            Self::DrawArc {
                oval_bounds,
                start_degrees,
                sweep_degrees,
                use_center,
            } => receiver.draw_arc(oval_bounds, *start_degrees, *sweep_degrees, *use_center),
            Self::DrawPoints { mode, points } => receiver.draw_points(*mode, points),
            Self::DrawVertices { vertices, mode } => receiver.draw_vertices(vertices, *mode),
            Self::DrawImage {
                image,
                point,
                sampling,
                render_with_attributes,
            } => receiver.draw_image(image.as_ref(), *point, *sampling, *render_with_attributes),
            Self::DrawImageRect {
                image,
                src,
                dst,
                sampling,
                render_with_attributes,
                constraint,
            } => receiver.draw_image_rect(
                image.as_ref(),
                src,
                dst,
                *sampling,
                *render_with_attributes,
                *constraint,
            ),
            Self::DrawImageNine {
                image,
                center,
                dst,
                filter,
                render_with_attributes,
            } => receiver.draw_image_nine(
                image.as_ref(),
                center,
                dst,
                *filter,
                *render_with_attributes,
            ),
            Self::DrawAtlas {
                atlas,
                render_with_attributes,
            } => receiver.draw_atlas(atlas, *render_with_attributes),
            Self::DrawDisplayList {
                display_list,
                opacity,
            } => receiver.draw_display_list(display_list, *opacity),
            Self::DrawTextBlob { blob, x, y } => receiver.draw_text_blob(blob, *x, *y),
            Self::DrawShadow {
                path,
                color,
                elevation,
                transparent_occluder,
                dpr,
            } => receiver.draw_shadow(path, *color, *elevation, *transparent_occluder, *dpr),
        }
    }
}
