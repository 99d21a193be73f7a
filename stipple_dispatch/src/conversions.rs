// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure mappings from display-list values to canvas values.
//!
//! Display-list geometry is `f32` and row-major; canvas geometry is `f64`
//! kurbo types and column-major [`Matrix`]. Nothing here touches a canvas.

use kurbo::{Arc, BezPath, Cap, Ellipse, Join, Point, Rect, Vec2};
use peniko::Color;
use stipple_canvas::{
    BlendMode, BlurStyle, ClipOperation, FillRule, Font, GlyphPosition, GradientStops, Matrix,
    MinMagFilter, MipFilter, Path, RSTransform, SamplerDescriptor, TextFrame, TextRun, TileMode,
    VertexMode, Vertices,
};
use stipple_display_list::{
    DlBlendMode, DlBlurStyle, DlClipOp, DlColor, DlFilterMode, DlGradientStops, DlImageSampling,
    DlMatrix, DlPath, DlPathFillType, DlPathVerb, DlPoint, DlRRect, DlRSTransform, DlRect,
    DlStrokeCap, DlStrokeJoin, DlTextBlob, DlTileMode, DlVertexMode, DlVertices,
};

/// Tolerance used when flattening kurbo shapes into paths.
const SHAPE_TOLERANCE: f64 = 0.1;

/// Map a display-list blend mode onto the canvas's equivalent.
pub fn to_blend_mode(mode: DlBlendMode) -> BlendMode {
    match mode {
        DlBlendMode::Clear => BlendMode::Clear,
        DlBlendMode::Src => BlendMode::Source,
        DlBlendMode::Dst => BlendMode::Destination,
        DlBlendMode::SrcOver => BlendMode::SourceOver,
        DlBlendMode::DstOver => BlendMode::DestinationOver,
        DlBlendMode::SrcIn => BlendMode::SourceIn,
        DlBlendMode::DstIn => BlendMode::DestinationIn,
        DlBlendMode::SrcOut => BlendMode::SourceOut,
        DlBlendMode::DstOut => BlendMode::DestinationOut,
        DlBlendMode::SrcATop => BlendMode::SourceATop,
        DlBlendMode::DstATop => BlendMode::DestinationATop,
        DlBlendMode::Xor => BlendMode::Xor,
        DlBlendMode::Plus => BlendMode::Plus,
        DlBlendMode::Modulate => BlendMode::Modulate,
        DlBlendMode::Screen => BlendMode::Screen,
        DlBlendMode::Overlay => BlendMode::Overlay,
        DlBlendMode::Darken => BlendMode::Darken,
        DlBlendMode::Lighten => BlendMode::Lighten,
        DlBlendMode::ColorDodge => BlendMode::ColorDodge,
        DlBlendMode::ColorBurn => BlendMode::ColorBurn,
        DlBlendMode::HardLight => BlendMode::HardLight,
        DlBlendMode::SoftLight => BlendMode::SoftLight,
        DlBlendMode::Difference => BlendMode::Difference,
        DlBlendMode::Exclusion => BlendMode::Exclusion,
        DlBlendMode::Multiply => BlendMode::Multiply,
        DlBlendMode::Hue => BlendMode::Hue,
        DlBlendMode::Saturation => BlendMode::Saturation,
        DlBlendMode::Color => BlendMode::Color,
        DlBlendMode::Luminosity => BlendMode::Luminosity,
    }
}

/// Map a tile mode.
pub fn to_tile_mode(mode: DlTileMode) -> TileMode {
    match mode {
        DlTileMode::Clamp => TileMode::Clamp,
        DlTileMode::Repeat => TileMode::Repeat,
        DlTileMode::Mirror => TileMode::Mirror,
        DlTileMode::Decal => TileMode::Decal,
    }
}

/// Map a stroke cap.
pub fn to_stroke_cap(cap: DlStrokeCap) -> Cap {
    match cap {
        DlStrokeCap::Butt => Cap::Butt,
        DlStrokeCap::Round => Cap::Round,
        DlStrokeCap::Square => Cap::Square,
    }
}

/// Map a stroke join.
pub fn to_stroke_join(join: DlStrokeJoin) -> Join {
    match join {
        DlStrokeJoin::Miter => Join::Miter,
        DlStrokeJoin::Round => Join::Round,
        DlStrokeJoin::Bevel => Join::Bevel,
    }
}

/// Map a clip operation.
pub fn to_clip_operation(op: DlClipOp) -> ClipOperation {
    match op {
        DlClipOp::Difference => ClipOperation::Difference,
        DlClipOp::Intersect => ClipOperation::Intersect,
    }
}

/// Map a mask blur style.
pub fn to_blur_style(style: DlBlurStyle) -> BlurStyle {
    match style {
        DlBlurStyle::Normal => BlurStyle::Normal,
        DlBlurStyle::Solid => BlurStyle::Solid,
        DlBlurStyle::Outer => BlurStyle::Outer,
        DlBlurStyle::Inner => BlurStyle::Inner,
    }
}

/// Map a path fill type.
pub fn to_fill_rule(fill_type: DlPathFillType) -> FillRule {
    match fill_type {
        DlPathFillType::Winding => FillRule::NonZero,
        DlPathFillType::EvenOdd => FillRule::EvenOdd,
    }
}

/// Sampler for image draws and image color sources.
///
/// Cubic sampling has no dedicated sampler and falls back to linear.
pub fn to_sampler_descriptor(sampling: DlImageSampling) -> SamplerDescriptor {
    match sampling {
        DlImageSampling::NearestNeighbor => SamplerDescriptor {
            label: "Nearest Sampler",
            min_filter: MinMagFilter::Nearest,
            mag_filter: MinMagFilter::Nearest,
            mip_filter: MipFilter::Nearest,
        },
        DlImageSampling::Linear | DlImageSampling::Cubic => SamplerDescriptor {
            label: "Linear Sampler",
            min_filter: MinMagFilter::Linear,
            mag_filter: MinMagFilter::Linear,
            mip_filter: MipFilter::Nearest,
        },
        DlImageSampling::MipmapLinear => SamplerDescriptor {
            label: "Mipmap Linear Sampler",
            min_filter: MinMagFilter::Linear,
            mag_filter: MinMagFilter::Linear,
            mip_filter: MipFilter::Linear,
        },
    }
}

/// Sampler for nine-patch draws.
pub fn to_filter_sampler_descriptor(filter: DlFilterMode) -> SamplerDescriptor {
    match filter {
        DlFilterMode::Nearest => SamplerDescriptor {
            label: "Nearest Sampler",
            min_filter: MinMagFilter::Nearest,
            mag_filter: MinMagFilter::Nearest,
            mip_filter: MipFilter::Nearest,
        },
        DlFilterMode::Linear => SamplerDescriptor {
            label: "Linear Sampler",
            min_filter: MinMagFilter::Linear,
            mag_filter: MinMagFilter::Linear,
            mip_filter: MipFilter::Nearest,
        },
    }
}

/// Normalized RGBA color.
pub fn to_color(color: DlColor) -> Color {
    Color::new([color.red_f(), color.green_f(), color.blue_f(), color.alpha_f()])
}

/// Widen a point.
pub fn to_point(point: DlPoint) -> Point {
    Point::new(f64::from(point.x), f64::from(point.y))
}

/// Widen a rectangle.
pub fn to_rect(rect: &DlRect) -> Rect {
    Rect::new(
        f64::from(rect.left),
        f64::from(rect.top),
        f64::from(rect.right),
        f64::from(rect.bottom),
    )
}

/// Narrow a canvas rectangle back to display-list coordinates.
#[expect(
    clippy::cast_possible_truncation,
    reason = "display-list coordinates are f32 by construction"
)]
pub fn to_dl_rect(rect: Rect) -> DlRect {
    DlRect::from_ltrb(rect.x0 as f32, rect.y0 as f32, rect.x1 as f32, rect.y1 as f32)
}

/// Transpose a row-major 3x3 display-list matrix into a column-major 4x4.
///
/// The 3x3 perspective row becomes the 4x4 `w` row; `z` passes through.
pub fn to_matrix(matrix: &DlMatrix) -> Matrix {
    let m = matrix.m.map(f64::from);
    Matrix::new([
        m[0], m[3], 0.0, m[6], //
        m[1], m[4], 0.0, m[7], //
        0.0, 0.0, 1.0, 0.0, //
        m[2], m[5], 0.0, m[8],
    ])
}

/// Map a sprite transform.
pub fn to_rs_transform(xform: &DlRSTransform) -> RSTransform {
    RSTransform {
        scaled_cos: f64::from(xform.scos),
        scaled_sin: f64::from(xform.ssin),
        translate_x: f64::from(xform.tx),
        translate_y: f64::from(xform.ty),
    }
}

/// Convert a recorded path, keeping its fill rule.
pub fn to_path(path: &DlPath) -> Path {
    let mut bez = BezPath::new();
    append_path(&mut bez, path, Vec2::ZERO);
    Path::new(bez).with_fill(to_fill_rule(path.fill_type()))
}

fn append_path(bez: &mut BezPath, path: &DlPath, offset: Vec2) {
    let p = |point: DlPoint| to_point(point) + offset;
    for verb in path.verbs() {
        match *verb {
            DlPathVerb::MoveTo(p0) => bez.move_to(p(p0)),
            DlPathVerb::LineTo(p1) => bez.line_to(p(p1)),
            DlPathVerb::QuadTo(c, p1) => bez.quad_to(p(c), p(p1)),
            DlPathVerb::CubicTo(c1, c2, p1) => bez.curve_to(p(c1), p(c2), p(p1)),
            DlPathVerb::Close => bez.close_path(),
        }
    }
}

/// A round rect as a path.
pub fn rrect_path(rrect: &DlRRect) -> Path {
    to_path(&DlPath::rrect(*rrect))
}

/// An arc of the ellipse inscribed in `oval_bounds`.
///
/// Angles are in degrees, clockwise from the positive x axis. Sweeps of a full
/// turn or more produce the whole ellipse. With `use_center` the arc is closed
/// through the ellipse's center, forming a wedge.
pub fn arc_path(
    oval_bounds: &DlRect,
    start_degrees: f32,
    sweep_degrees: f32,
    use_center: bool,
) -> Path {
    let bounds = to_rect(oval_bounds);
    if sweep_degrees.abs() >= 360.0 {
        return Path::from_shape(&Ellipse::from_rect(bounds));
    }
    let arc = Arc {
        center: bounds.center(),
        radii: Vec2::new(bounds.width() * 0.5, bounds.height() * 0.5),
        start_angle: f64::from(start_degrees).to_radians(),
        sweep_angle: f64::from(sweep_degrees).to_radians(),
        x_rotation: 0.0,
    };
    let start = arc.center
        + Vec2::new(
            arc.radii.x * arc.start_angle.cos(),
            arc.radii.y * arc.start_angle.sin(),
        );
    let mut bez = BezPath::new();
    if use_center {
        bez.move_to(arc.center);
        bez.line_to(start);
    } else {
        bez.move_to(start);
    }
    bez.extend(arc.append_iter(SHAPE_TOLERANCE));
    if use_center {
        bez.close_path();
    }
    Path::new(bez)
}

/// Normalize gradient stops so they span exactly `[0, 1]`.
///
/// A ramp that starts after `0.0` gets a copy of its first color at `0.0`; one
/// that ends before `1.0` gets a copy of its last color at `1.0`. Returns
/// `None` for ramps with fewer than two stops.
pub fn convert_stops(stops: &DlGradientStops) -> Option<GradientStops> {
    debug_assert!(stops.len() >= 2, "gradients need at least two stops");
    if stops.len() < 2 {
        return None;
    }
    let (&first_stop, &last_stop) = (stops.stops().first()?, stops.stops().last()?);
    let mut colors = Vec::with_capacity(stops.len() + 2);
    let mut offsets = Vec::with_capacity(stops.len() + 2);
    if first_stop != 0.0 {
        colors.push(to_color(stops.colors()[0]));
        offsets.push(0.0);
    }
    for (color, stop) in stops.colors().iter().zip(stops.stops()) {
        colors.push(to_color(*color));
        offsets.push(*stop);
    }
    if last_stop != 1.0 {
        colors.push(to_color(stops.colors()[stops.len() - 1]));
        offsets.push(1.0);
    }
    Some(GradientStops::new(colors, offsets))
}

/// Convert a mesh.
///
/// Canvases have no fan primitive, so fans become indexed triangle lists
/// that reuse the first vertex as the hub.
pub fn to_vertices(vertices: &DlVertices) -> Vertices {
    let positions: Vec<Point> = vertices.vertices().iter().copied().map(to_point).collect();
    let texture_coordinates = vertices
        .texture_coordinates()
        .map(|coords| coords.iter().copied().map(to_point).collect())
        .unwrap_or_default();
    let colors = vertices
        .colors()
        .map(|colors| colors.iter().copied().map(to_color).collect())
        .unwrap_or_default();
    let (mode, indices) = match vertices.mode() {
        DlVertexMode::Triangles => (VertexMode::Triangles, vertices.indices().map(<[u16]>::to_vec)),
        DlVertexMode::TriangleStrip => (
            VertexMode::TriangleStrip,
            vertices.indices().map(<[u16]>::to_vec),
        ),
        DlVertexMode::TriangleFan => (VertexMode::Triangles, Some(fan_indices(vertices))),
    };
    Vertices {
        mode,
        positions,
        texture_coordinates,
        colors,
        indices,
        bounds: to_rect(&vertices.bounds()),
    }
}

fn fan_indices(vertices: &DlVertices) -> Vec<u16> {
    let source: Vec<u16> = match vertices.indices() {
        Some(indices) => indices.to_vec(),
        None => (0..vertices.vertices().len())
            .map_while(|i| u16::try_from(i).ok())
            .collect(),
    };
    let Some((&hub, rest)) = source.split_first() else {
        return Vec::new();
    };
    rest.windows(2)
        .flat_map(|pair| [hub, pair[0], pair[1]])
        .collect()
}

/// Build the glyph fast-path frame for a blob, or `None` if it has no glyphs.
pub fn text_frame_from_blob(blob: &DlTextBlob) -> Option<TextFrame> {
    if blob.glyph_count() == 0 {
        return None;
    }
    let runs = blob
        .runs()
        .iter()
        .map(|run| TextRun {
            font: Font {
                typeface_id: run.font.typeface_id,
                size: run.font.size,
            },
            glyph_positions: run
                .glyphs
                .iter()
                .map(|glyph| GlyphPosition {
                    glyph: glyph.id,
                    position: to_point(glyph.position),
                })
                .collect(),
        })
        .collect();
    Some(TextFrame { runs })
}

/// Union of a blob's glyph outlines as one path.
///
/// Outlines are laid out relative to the top-left of the blob's bounds and
/// then moved by `shift`.
pub fn path_from_text_blob(blob: &DlTextBlob, shift: Point) -> Path {
    let bounds = blob.bounds();
    let origin = Vec2::new(f64::from(bounds.left), f64::from(bounds.top));
    let mut bez = BezPath::new();
    for glyph in blob.runs().iter().flat_map(|run| run.glyphs.iter()) {
        let offset = to_point(glyph.position).to_vec2() - origin + shift.to_vec2();
        append_path(&mut bez, &glyph.outline, offset);
    }
    Path::new(bez)
}

/// The circle inscribed in `bounds`, if the bounds are square.
pub fn circle_in(bounds: &DlRect) -> Option<(Point, f64)> {
    (bounds.width() == bounds.height())
        .then(|| (to_point(bounds.center()), f64::from(bounds.width()) * 0.5))
}

/// An oval as a path.
pub fn oval_path(bounds: &DlRect) -> Path {
    to_path(&DlPath::oval(*bounds))
}
