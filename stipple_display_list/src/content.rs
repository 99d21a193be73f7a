// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bulk drawing payloads: meshes, sprite atlases and text.

use crate::{
    DisplayListError, DlBlendMode, DlColor, DlImage, DlImageSampling, DlPath, DlPoint,
    DlRSTransform, DlRect,
};

/// How vertex positions assemble into triangles.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DlVertexMode {
    /// Independent triangles.
    #[default]
    Triangles,
    /// Each vertex after the second forms a triangle with the previous two.
    TriangleStrip,
    /// Each vertex after the second forms a triangle with the previous one and
    /// the first.
    TriangleFan,
}

/// A validated triangle mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct DlVertices {
    mode: DlVertexMode,
    vertices: Vec<DlPoint>,
    texture_coordinates: Option<Vec<DlPoint>>,
    colors: Option<Vec<DlColor>>,
    indices: Option<Vec<u16>>,
    bounds: DlRect,
}

impl DlVertices {
    /// Build a mesh.
    ///
    /// Texture coordinates and colors, when present, need one entry per
    /// vertex; indices must refer to existing vertices.
    pub fn new(
        mode: DlVertexMode,
        vertices: Vec<DlPoint>,
        texture_coordinates: Option<Vec<DlPoint>>,
        colors: Option<Vec<DlColor>>,
        indices: Option<Vec<u16>>,
    ) -> Result<Self, DisplayListError> {
        let count = vertices.len();
        if let Some(coords) = &texture_coordinates
            && coords.len() != count
        {
            return Err(DisplayListError::VertexAttributeMismatch {
                attribute: "texture coordinates",
                expected: count,
                actual: coords.len(),
            });
        }
        if let Some(colors) = &colors
            && colors.len() != count
        {
            return Err(DisplayListError::VertexAttributeMismatch {
                attribute: "colors",
                expected: count,
                actual: colors.len(),
            });
        }
        if let Some(bad) = indices
            .iter()
            .flatten()
            .find(|&&index| usize::from(index) >= count)
        {
            return Err(DisplayListError::VertexIndexOutOfRange { index: *bad, count });
        }
        let bounds = DlRect::from_points(&vertices).unwrap_or_default();
        Ok(Self {
            mode,
            vertices,
            texture_coordinates,
            colors,
            indices,
            bounds,
        })
    }

    /// Primitive assembly.
    pub fn mode(&self) -> DlVertexMode {
        self.mode
    }

    /// Positions.
    pub fn vertices(&self) -> &[DlPoint] {
        &self.vertices
    }

    /// Per-vertex texture coordinates.
    pub fn texture_coordinates(&self) -> Option<&[DlPoint]> {
        self.texture_coordinates.as_deref()
    }

    /// Per-vertex colors.
    pub fn colors(&self) -> Option<&[DlColor]> {
        self.colors.as_deref()
    }

    /// Index buffer.
    pub fn indices(&self) -> Option<&[u16]> {
        self.indices.as_deref()
    }

    /// Bounds of all positions.
    pub fn bounds(&self) -> DlRect {
        self.bounds
    }
}

/// A validated batch of sprites.
#[derive(Clone, Debug, PartialEq)]
pub struct DlAtlas {
    image: Option<DlImage>,
    transforms: Vec<DlRSTransform>,
    texture_rects: Vec<DlRect>,
    colors: Option<Vec<DlColor>>,
    blend_mode: DlBlendMode,
    sampling: DlImageSampling,
    cull_rect: Option<DlRect>,
}

impl DlAtlas {
    /// Build an atlas draw. `texture_rects` and `colors` pair up with `transforms`.
    pub fn new(
        image: Option<DlImage>,
        transforms: Vec<DlRSTransform>,
        texture_rects: Vec<DlRect>,
        colors: Option<Vec<DlColor>>,
        blend_mode: DlBlendMode,
        sampling: DlImageSampling,
        cull_rect: Option<DlRect>,
    ) -> Result<Self, DisplayListError> {
        if texture_rects.len() != transforms.len() {
            return Err(DisplayListError::AtlasAttributeMismatch {
                attribute: "texture rects",
                transforms: transforms.len(),
                actual: texture_rects.len(),
            });
        }
        if let Some(colors) = &colors
            && colors.len() != transforms.len()
        {
            return Err(DisplayListError::AtlasAttributeMismatch {
                attribute: "colors",
                transforms: transforms.len(),
                actual: colors.len(),
            });
        }
        Ok(Self {
            image,
            transforms,
            texture_rects,
            colors,
            blend_mode,
            sampling,
            cull_rect,
        })
    }

    /// Sprite sheet.
    pub fn image(&self) -> Option<&DlImage> {
        self.image.as_ref()
    }

    /// Sprite placements.
    pub fn transforms(&self) -> &[DlRSTransform] {
        &self.transforms
    }

    /// Sprite source rects.
    pub fn texture_rects(&self) -> &[DlRect] {
        &self.texture_rects
    }

    /// Per-sprite colors.
    pub fn colors(&self) -> Option<&[DlColor]> {
        self.colors.as_deref()
    }

    /// How sprite colors combine with the texture.
    pub fn blend_mode(&self) -> DlBlendMode {
        self.blend_mode
    }

    /// Sampling quality.
    pub fn sampling(&self) -> DlImageSampling {
        self.sampling
    }

    /// Producer-supplied bounds of all sprites.
    pub fn cull_rect(&self) -> Option<DlRect> {
        self.cull_rect
    }

    /// Bounds of all sprites, preferring the producer's cull rect.
    pub fn bounds(&self) -> DlRect {
        if let Some(cull) = self.cull_rect {
            return cull;
        }
        self.transforms
            .iter()
            .zip(&self.texture_rects)
            .map(|(xform, tex)| xform.bounds(tex.width(), tex.height()))
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default()
    }
}

/// Font reference for a glyph run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DlFont {
    /// Opaque typeface identifier.
    pub typeface_id: u32,
    /// Em size.
    pub size: f32,
}

/// One positioned glyph with its outline.
#[derive(Clone, Debug, PartialEq)]
pub struct DlGlyph {
    /// Glyph id.
    pub id: u16,
    /// Baseline origin relative to the blob origin.
    pub position: DlPoint,
    /// Outline relative to the glyph origin.
    pub outline: DlPath,
}

/// Glyphs sharing a font.
#[derive(Clone, Debug, PartialEq)]
pub struct DlGlyphRun {
    /// Run font.
    pub font: DlFont,
    /// Glyphs.
    pub glyphs: Vec<DlGlyph>,
}

/// Shaped text.
#[derive(Clone, Debug, PartialEq)]
pub struct DlTextBlob {
    runs: Vec<DlGlyphRun>,
    bounds: DlRect,
}

impl DlTextBlob {
    /// Build a blob; bounds cover every glyph outline.
    pub fn new(runs: Vec<DlGlyphRun>) -> Self {
        let bounds = runs
            .iter()
            .flat_map(|run| run.glyphs.iter())
            .filter(|glyph| !glyph.outline.is_empty())
            .map(|glyph| {
                let b = glyph.outline.bounds();
                DlRect::from_ltrb(
                    b.left + glyph.position.x,
                    b.top + glyph.position.y,
                    b.right + glyph.position.x,
                    b.bottom + glyph.position.y,
                )
            })
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default();
        Self { runs, bounds }
    }

    /// Glyph runs.
    pub fn runs(&self) -> &[DlGlyphRun] {
        &self.runs
    }

    /// Bounds relative to the blob origin.
    pub fn bounds(&self) -> DlRect {
        self.bounds
    }

    /// Total number of glyphs.
    pub fn glyph_count(&self) -> usize {
        self.runs.iter().map(|run| run.glyphs.len()).sum()
    }
}
