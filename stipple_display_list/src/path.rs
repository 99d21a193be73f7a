// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{DlPathFillType, DlPoint, DlRRect, DlRect};

/// One path segment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DlPathVerb {
    /// Start a new contour.
    MoveTo(DlPoint),
    /// Straight line.
    LineTo(DlPoint),
    /// Quadratic bezier with one control point.
    QuadTo(DlPoint, DlPoint),
    /// Cubic bezier with two control points.
    CubicTo(DlPoint, DlPoint, DlPoint),
    /// Close the current contour.
    Close,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
enum ShapeHint {
    #[default]
    None,
    Rect(DlRect),
    Oval(DlRect),
    RRect(DlRRect),
}

/// A recorded path.
///
/// Paths built with [`DlPath::rect`], [`DlPath::oval`] or [`DlPath::rrect`]
/// remember the shape they were made from, so consumers can use a cheaper
/// primitive. Appending verbs forgets the shape.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DlPath {
    verbs: Vec<DlPathVerb>,
    fill_type: DlPathFillType,
    shape: ShapeHint,
}

impl DlPath {
    /// An empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// A closed rectangle.
    pub fn rect(rect: DlRect) -> Self {
        let mut path = Self::new();
        path.move_to(DlPoint::new(rect.left, rect.top));
        path.line_to(DlPoint::new(rect.right, rect.top));
        path.line_to(DlPoint::new(rect.right, rect.bottom));
        path.line_to(DlPoint::new(rect.left, rect.bottom));
        path.close();
        path.shape = ShapeHint::Rect(rect);
        path
    }

    /// An ellipse inscribed in `bounds`.
    pub fn oval(bounds: DlRect) -> Self {
        let mut path = Self::new();
        let rrect = DlRRect::from_rect_xy(bounds, bounds.width() * 0.5, bounds.height() * 0.5);
        path.append_rrect(&rrect);
        path.shape = ShapeHint::Oval(bounds);
        path
    }

    /// A round rect.
    pub fn rrect(rrect: DlRRect) -> Self {
        if rrect.is_rect() {
            return Self::rect(rrect.rect);
        }
        let mut path = Self::new();
        path.append_rrect(&rrect);
        path.shape = ShapeHint::RRect(rrect);
        path
    }

    /// Sets the fill rule.
    #[must_use]
    pub fn with_fill_type(mut self, fill_type: DlPathFillType) -> Self {
        self.fill_type = fill_type;
        self
    }

    /// Start a new contour.
    pub fn move_to(&mut self, p: DlPoint) -> &mut Self {
        self.push(DlPathVerb::MoveTo(p))
    }

    /// Add a line.
    pub fn line_to(&mut self, p: DlPoint) -> &mut Self {
        self.push(DlPathVerb::LineTo(p))
    }

    /// Add a quadratic bezier.
    pub fn quad_to(&mut self, c: DlPoint, p: DlPoint) -> &mut Self {
        self.push(DlPathVerb::QuadTo(c, p))
    }

    /// Add a cubic bezier.
    pub fn cubic_to(&mut self, c1: DlPoint, c2: DlPoint, p: DlPoint) -> &mut Self {
        self.push(DlPathVerb::CubicTo(c1, c2, p))
    }

    /// Close the current contour.
    pub fn close(&mut self) -> &mut Self {
        self.push(DlPathVerb::Close)
    }

    fn push(&mut self, verb: DlPathVerb) -> &mut Self {
        self.verbs.push(verb);
        self.shape = ShapeHint::None;
        self
    }

    // Corners as cubic quarter-ellipses, clockwise from the top edge.
    fn append_rrect(&mut self, rrect: &DlRRect) {
        const KAPPA: f32 = 0.552_284_8;
        let r = rrect.rect;
        let [ul, ur, lr, ll] = rrect.radii;
        self.move_to(DlPoint::new(r.left + ul.x, r.top));
        self.line_to(DlPoint::new(r.right - ur.x, r.top));
        self.cubic_to(
            DlPoint::new(r.right - ur.x * (1.0 - KAPPA), r.top),
            DlPoint::new(r.right, r.top + ur.y * (1.0 - KAPPA)),
            DlPoint::new(r.right, r.top + ur.y),
        );
        self.line_to(DlPoint::new(r.right, r.bottom - lr.y));
        self.cubic_to(
            DlPoint::new(r.right, r.bottom - lr.y * (1.0 - KAPPA)),
            DlPoint::new(r.right - lr.x * (1.0 - KAPPA), r.bottom),
            DlPoint::new(r.right - lr.x, r.bottom),
        );
        self.line_to(DlPoint::new(r.left + ll.x, r.bottom));
        self.cubic_to(
            DlPoint::new(r.left + ll.x * (1.0 - KAPPA), r.bottom),
            DlPoint::new(r.left, r.bottom - ll.y * (1.0 - KAPPA)),
            DlPoint::new(r.left, r.bottom - ll.y),
        );
        self.line_to(DlPoint::new(r.left, r.top + ul.y));
        self.cubic_to(
            DlPoint::new(r.left, r.top + ul.y * (1.0 - KAPPA)),
            DlPoint::new(r.left + ul.x * (1.0 - KAPPA), r.top),
            DlPoint::new(r.left + ul.x, r.top),
        );
        self.close();
    }

    /// Segments in order.
    pub fn verbs(&self) -> &[DlPathVerb] {
        &self.verbs
    }

    /// Fill rule.
    pub fn fill_type(&self) -> DlPathFillType {
        self.fill_type
    }

    /// The rectangle this path was built from, if any.
    pub fn is_rect(&self) -> Option<DlRect> {
        match self.shape {
            ShapeHint::Rect(rect) => Some(rect),
            _ => None,
        }
    }

    /// The oval bounds this path was built from, if any.
    pub fn is_oval(&self) -> Option<DlRect> {
        match self.shape {
            ShapeHint::Oval(bounds) => Some(bounds),
            _ => None,
        }
    }

    /// The round rect this path was built from, if any.
    pub fn is_rrect(&self) -> Option<DlRRect> {
        match self.shape {
            ShapeHint::RRect(rrect) => Some(rrect),
            _ => None,
        }
    }

    /// Returns `true` if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Bounds of all end and control points.
    pub fn bounds(&self) -> DlRect {
        let points: Vec<DlPoint> = self
            .verbs
            .iter()
            .flat_map(|verb| match *verb {
                DlPathVerb::MoveTo(p) | DlPathVerb::LineTo(p) => vec![p],
                DlPathVerb::QuadTo(c, p) => vec![c, p],
                DlPathVerb::CubicTo(c1, c2, p) => vec![c1, c2, p],
                DlPathVerb::Close => Vec::new(),
            })
            .collect();
        DlRect::from_points(&points).unwrap_or_default()
    }
}
