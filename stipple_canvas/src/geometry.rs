// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry handed to draw and clip calls.

use std::sync::Arc;

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::{Color, Fill as FillRule};

use crate::{BlendMode, SamplerDescriptor, Texture};

/// A fillable path with its fill rule.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    /// Path elements.
    pub bez: BezPath,
    /// Fill rule used to decide interior coverage.
    pub fill: FillRule,
}

impl Path {
    /// A non-zero filled path.
    pub fn new(bez: BezPath) -> Self {
        Self {
            bez,
            fill: FillRule::NonZero,
        }
    }

    /// Sets the fill rule.
    #[must_use]
    pub fn with_fill(mut self, fill: FillRule) -> Self {
        self.fill = fill;
        self
    }

    /// A path built from any kurbo shape.
    pub fn from_shape(shape: &impl Shape) -> Self {
        Self::new(shape.to_path(0.1))
    }

    /// Conservative bounds of the control points.
    pub fn bounds(&self) -> Rect {
        self.bez.control_box()
    }
}

impl Default for Path {
    fn default() -> Self {
        Self::new(BezPath::new())
    }
}

/// How [`Vertices`] positions assemble into triangles.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum VertexMode {
    /// Every three vertices form an independent triangle.
    #[default]
    Triangles,
    /// Each vertex after the second forms a triangle with the previous two.
    TriangleStrip,
}

/// A triangle mesh with optional per-vertex attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Vertices {
    /// Primitive assembly.
    pub mode: VertexMode,
    /// Vertex positions.
    pub positions: Vec<Point>,
    /// Per-vertex texture coordinates, empty if absent.
    pub texture_coordinates: Vec<Point>,
    /// Per-vertex colors, empty if absent.
    pub colors: Vec<Color>,
    /// Index buffer; vertices are used in order when absent.
    pub indices: Option<Vec<u16>>,
    /// Bounds of all positions.
    pub bounds: Rect,
}

impl Vertices {
    /// Number of vertices drawn, after indexing.
    pub fn vertex_count(&self) -> usize {
        self.indices
            .as_ref()
            .map_or(self.positions.len(), |indices| indices.len())
    }
}

/// Positioned glyph.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GlyphPosition {
    /// Glyph id within the run's font.
    pub glyph: u16,
    /// Baseline origin relative to the frame origin.
    pub position: Point,
}

/// Font used by a [`TextRun`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Font {
    /// Opaque typeface identifier.
    pub typeface_id: u32,
    /// Em size in local units.
    pub size: f32,
}

/// Glyphs sharing one font.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    /// Run font.
    pub font: Font,
    /// Glyphs in the run.
    pub glyph_positions: Vec<GlyphPosition>,
}

/// Shaped text ready for the glyph fast path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextFrame {
    /// Runs in drawing order.
    pub runs: Vec<TextRun>,
}

impl TextFrame {
    /// Total number of glyphs.
    pub fn glyph_count(&self) -> usize {
        self.runs.iter().map(|run| run.glyph_positions.len()).sum()
    }
}

/// A compressed rotation + uniform scale + translation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RSTransform {
    /// `scale * cos(angle)`.
    pub scaled_cos: f64,
    /// `scale * sin(angle)`.
    pub scaled_sin: f64,
    /// X translation.
    pub translate_x: f64,
    /// Y translation.
    pub translate_y: f64,
}

impl RSTransform {
    /// The four corners of a `width x height` sprite mapped by this transform,
    /// in top-left, top-right, bottom-right, bottom-left order.
    pub fn quad(&self, width: f64, height: f64) -> [Point; 4] {
        let map = |x: f64, y: f64| {
            Point::new(
                self.scaled_cos * x - self.scaled_sin * y + self.translate_x,
                self.scaled_sin * x + self.scaled_cos * y + self.translate_y,
            )
        };
        [map(0.0, 0.0), map(width, 0.0), map(width, height), map(0.0, height)]
    }
}

/// A batch of sprites cut from one texture.
#[derive(Clone, Debug, PartialEq)]
pub struct Atlas {
    /// Sprite sheet.
    pub texture: Arc<Texture>,
    /// Placement of each sprite.
    pub transforms: Vec<RSTransform>,
    /// Source rect of each sprite within the texture.
    pub texture_rects: Vec<Rect>,
    /// Per-sprite colors, empty if absent.
    pub colors: Vec<Color>,
    /// How per-sprite colors combine with the sampled texture.
    pub blend_mode: BlendMode,
    /// Texture sampling.
    pub sampler: SamplerDescriptor,
    /// Optional conservative bounds of all sprites.
    pub cull_rect: Option<Rect>,
}

impl Atlas {
    /// Number of sprites.
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Returns `true` if there are no sprites.
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

/// Shape of point sprites.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointStyle {
    /// Circles.
    Round,
    /// Axis-aligned squares.
    #[default]
    Square,
}

/// How a clip combines with the current clip.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClipOperation {
    /// Remove the shape from the clip.
    Difference,
    /// Keep only the overlap with the shape.
    #[default]
    Intersect,
}
