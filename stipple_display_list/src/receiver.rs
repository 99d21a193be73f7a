// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    DisplayList, DlAtlas, DlBlendMode, DlClipOp, DlColor, DlColorFilter, DlColorSource,
    DlDrawStyle, DlFilterMode, DlIRect, DlImage, DlImageFilter, DlImageSampling, DlMaskFilter,
    DlPath, DlPathEffect, DlPoint, DlPointMode, DlRRect, DlRect, DlSrcRectConstraint,
    DlStrokeCap, DlStrokeJoin, DlTextBlob, DlVertices,
};

/// Flags describing a save layer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SaveLayerOptions {
    renders_with_attributes: bool,
}

impl SaveLayerOptions {
    /// The layer is composited without the current paint attributes.
    pub const NO_ATTRIBUTES: Self = Self {
        renders_with_attributes: false,
    };

    /// The layer is composited with the current paint attributes.
    pub const WITH_ATTRIBUTES: Self = Self {
        renders_with_attributes: true,
    };

    /// Whether the current paint applies when the layer is composited.
    pub const fn renders_with_attributes(self) -> bool {
        self.renders_with_attributes
    }
}

/// A visitor over display-list commands.
///
/// [`DisplayList::dispatch`] calls one method per recorded command, in order.
/// Attribute setters change the paint used by subsequent draws; `render_with_attributes`
/// flags on image draws say whether that paint applies to the draw at all.
pub trait DlOpReceiver {
    /// Anti-aliasing hint.
    fn set_anti_alias(&mut self, aa: bool);
    /// Gradient dithering.
    fn set_dither(&mut self, dither: bool);
    /// Fill, stroke, or both.
    fn set_draw_style(&mut self, style: DlDrawStyle);
    /// Solid color.
    fn set_color(&mut self, color: DlColor);
    /// Stroke width; `0` means hairline.
    fn set_stroke_width(&mut self, width: f32);
    /// Miter limit.
    fn set_stroke_miter(&mut self, limit: f32);
    /// Stroke end cap.
    fn set_stroke_cap(&mut self, cap: DlStrokeCap);
    /// Stroke corner join.
    fn set_stroke_join(&mut self, join: DlStrokeJoin);
    /// Shader; `None` restores the solid color.
    fn set_color_source(&mut self, source: Option<&DlColorSource>);
    /// Color filter; `None` clears it.
    fn set_color_filter(&mut self, filter: Option<&DlColorFilter>);
    /// Invert colors after filtering.
    fn set_invert_colors(&mut self, invert: bool);
    /// Blend mode.
    fn set_blend_mode(&mut self, mode: DlBlendMode);
    /// Path effect; `None` clears it.
    fn set_path_effect(&mut self, effect: Option<&DlPathEffect>);
    /// Mask filter; `None` clears it.
    fn set_mask_filter(&mut self, filter: Option<&DlMaskFilter>);
    /// Image filter; `None` clears it.
    fn set_image_filter(&mut self, filter: Option<&DlImageFilter>);

    /// Push a save frame.
    fn save(&mut self);
    /// Push a compositing layer.
    fn save_layer(
        &mut self,
        bounds: Option<&DlRect>,
        options: SaveLayerOptions,
        backdrop: Option<&DlImageFilter>,
    );
    /// Pop the most recent save frame or layer.
    fn restore(&mut self);

    /// Concatenate a translation.
    fn translate(&mut self, tx: f32, ty: f32);
    /// Concatenate a scale.
    fn scale(&mut self, sx: f32, sy: f32);
    /// Concatenate a rotation in degrees.
    fn rotate(&mut self, degrees: f32);
    /// Concatenate a skew.
    fn skew(&mut self, sx: f32, sy: f32);
    /// Concatenate a row-major 2x3 affine transform.
    fn transform_2d_affine(&mut self, mxx: f32, mxy: f32, mxt: f32, myx: f32, myy: f32, myt: f32);
    /// Concatenate a row-major 4x4 transform.
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
    );
    /// Return to the transform in effect when playback of this list started.
    fn transform_reset(&mut self);

    /// Clip to a rectangle.
    fn clip_rect(&mut self, rect: &DlRect, op: DlClipOp, is_aa: bool);
    /// Clip to a round rect.
    fn clip_rrect(&mut self, rrect: &DlRRect, op: DlClipOp, is_aa: bool);
    /// Clip to a path.
    fn clip_path(&mut self, path: &DlPath, op: DlClipOp, is_aa: bool);

    /// Fill the clip with a color, ignoring the current paint.
    fn draw_color(&mut self, color: DlColor, mode: DlBlendMode);
    /// Fill the clip with the current paint.
    fn draw_paint(&mut self);
    /// Stroke a line segment.
    fn draw_line(&mut self, p0: DlPoint, p1: DlPoint);
    /// Draw a rectangle.
    fn draw_rect(&mut self, rect: &DlRect);
    /// Draw an ellipse inscribed in `bounds`.
    fn draw_oval(&mut self, bounds: &DlRect);
    /// Draw a circle.
    fn draw_circle(&mut self, center: DlPoint, radius: f32);
    /// Draw a round rect.
    fn draw_rrect(&mut self, rrect: &DlRRect);
    /// Draw the region between two round rects.
    fn draw_drrect(&mut self, outer: &DlRRect, inner: &DlRRect);
    /// Draw a path.
    fn draw_path(&mut self, path: &DlPath);
    /// Draw an arc of the ellipse inscribed in `oval_bounds`.
    fn draw_arc(
        &mut self,
        oval_bounds: &DlRect,
        start_degrees: f32,
        sweep_degrees: f32,
        use_center: bool,
    );
    /// Draw points, line pairs, or a polyline.
    fn draw_points(&mut self, mode: DlPointMode, points: &[DlPoint]);
    /// Draw a mesh.
    fn draw_vertices(&mut self, vertices: &DlVertices, mode: DlBlendMode);
    /// Draw an image at its natural size.
    fn draw_image(
        &mut self,
        image: Option<&DlImage>,
        point: DlPoint,
        sampling: DlImageSampling,
        render_with_attributes: bool,
    );
    /// Draw part of an image into a rectangle.
    fn draw_image_rect(
        &mut self,
        image: Option<&DlImage>,
        src: &DlRect,
        dst: &DlRect,
        sampling: DlImageSampling,
        render_with_attributes: bool,
        constraint: DlSrcRectConstraint,
    );
    /// Draw a nine-patch image.
    fn draw_image_nine(
        &mut self,
        image: Option<&DlImage>,
        center: &DlIRect,
        dst: &DlRect,
        filter: DlFilterMode,
        render_with_attributes: bool,
    );
    /// Draw sprites from an atlas.
    fn draw_atlas(&mut self, atlas: &DlAtlas, render_with_attributes: bool);
    /// Play back a nested display list at the given group opacity.
    fn draw_display_list(&mut self, display_list: &DisplayList, opacity: f32);
    /// Draw text with its origin at `(x, y)`.
    fn draw_text_blob(&mut self, blob: &DlTextBlob, x: f32, y: f32);
    /// Draw the shadow cast by `path` at `elevation`.
    fn draw_shadow(
        &mut self,
        path: &DlPath,
        color: DlColor,
        elevation: f32,
        transparent_occluder: bool,
        dpr: f32,
    );
}
