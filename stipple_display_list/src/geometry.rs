// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-precision geometry as recorded by display-list producers.

/// A point.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DlPoint {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl DlPoint {
    /// Create a point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle given by its edges.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DlRect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl DlRect {
    /// Create a rectangle from its edges.
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from an origin and a size.
    pub const fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::from_ltrb(x, y, x + width, y + height)
    }

    /// Create a rectangle at the origin.
    pub const fn from_wh(width: f32, height: f32) -> Self {
        Self::from_ltrb(0.0, 0.0, width, height)
    }

    /// Width.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Center point.
    pub fn center(&self) -> DlPoint {
        DlPoint::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// Returns `true` if the rectangle encloses no area.
    pub fn is_empty(&self) -> bool {
        !(self.left < self.right && self.top < self.bottom)
    }

    /// Returns `true` if the interiors overlap.
    pub fn intersects(&self, other: &Self) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Self) -> Self {
        Self::from_ltrb(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Grow every edge outwards by `dx` and `dy`.
    pub fn outset(&self, dx: f32, dy: f32) -> Self {
        Self::from_ltrb(
            self.left - dx,
            self.top - dy,
            self.right + dx,
            self.bottom + dy,
        )
    }

    /// Bounds of a set of points, or `None` if there are none.
    pub fn from_points(points: &[DlPoint]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut rect = Self::from_ltrb(first.x, first.y, first.x, first.y);
        for p in rest {
            rect.left = rect.left.min(p.x);
            rect.top = rect.top.min(p.y);
            rect.right = rect.right.max(p.x);
            rect.bottom = rect.bottom.max(p.y);
        }
        Some(rect)
    }
}

/// An integer rectangle, used for nine-patch centers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[expect(missing_docs, reason = "edges are self-describing")]
pub struct DlIRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl DlIRect {
    /// Create a rectangle from its edges.
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// A rectangle with elliptical corners.
///
/// Radii are stored clockwise from the upper-left corner.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DlRRect {
    /// Bounds.
    pub rect: DlRect,
    /// Upper-left, upper-right, lower-right, lower-left radii.
    pub radii: [DlPoint; 4],
}

impl DlRRect {
    /// Rectangle with every corner rounded by `radius`.
    pub fn from_rect_radius(rect: DlRect, radius: f32) -> Self {
        Self::from_rect_xy(rect, radius, radius)
    }

    /// Rectangle with every corner rounded by an `rx` by `ry` ellipse.
    pub fn from_rect_xy(rect: DlRect, rx: f32, ry: f32) -> Self {
        Self {
            rect,
            radii: [DlPoint::new(rx, ry); 4],
        }
    }

    /// Rectangle with individual corner radii.
    pub fn from_rect_radii(rect: DlRect, radii: [DlPoint; 4]) -> Self {
        Self { rect, radii }
    }

    /// Returns `true` if no corner is rounded.
    pub fn is_rect(&self) -> bool {
        self.radii.iter().all(|r| r.x <= 0.0 || r.y <= 0.0)
    }

    /// Returns `true` if all corners share one circular, non-zero radius.
    pub fn is_simple(&self) -> bool {
        let first = self.radii[0];
        first.x > 0.0 && first.x == first.y && self.radii.iter().all(|r| *r == first)
    }

    /// The shared corner radius of a simple round rect.
    pub fn simple_radius(&self) -> f32 {
        self.radii[0].x
    }
}

/// A compressed rotation + uniform scale + translation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DlRSTransform {
    /// `scale * cos(angle)`.
    pub scos: f32,
    /// `scale * sin(angle)`.
    pub ssin: f32,
    /// X translation.
    pub tx: f32,
    /// Y translation.
    pub ty: f32,
}

impl DlRSTransform {
    /// Build from a scale, a rotation in radians, and a translation.
    pub fn from_radians(scale: f32, radians: f32, tx: f32, ty: f32) -> Self {
        Self {
            scos: scale * radians.cos(),
            ssin: scale * radians.sin(),
            tx,
            ty,
        }
    }

    /// Bounds of a `width x height` sprite placed by this transform.
    pub fn bounds(&self, width: f32, height: f32) -> DlRect {
        let map = |x: f32, y: f32| {
            DlPoint::new(
                self.scos * x - self.ssin * y + self.tx,
                self.ssin * x + self.scos * y + self.ty,
            )
        };
        let corners = [
            map(0.0, 0.0),
            map(width, 0.0),
            map(width, height),
            map(0.0, height),
        ];
        DlRect::from_points(&corners).unwrap_or_default()
    }
}

/// A 3x3 row-major transform.
///
/// Entries are `[scale_x, skew_x, trans_x, skew_y, scale_y, trans_y, persp_0,
/// persp_1, persp_2]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DlMatrix {
    /// Row-major entries.
    pub m: [f32; 9],
}

impl Default for DlMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl DlMatrix {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    /// Create from row-major entries.
    pub const fn new(m: [f32; 9]) -> Self {
        Self { m }
    }

    /// A translation.
    pub const fn translate(tx: f32, ty: f32) -> Self {
        Self::new([1.0, 0.0, tx, 0.0, 1.0, ty, 0.0, 0.0, 1.0])
    }

    /// A scale.
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self::new([sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0])
    }

    /// A rotation by `degrees` clockwise in a y-down space.
    pub fn rotate(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new([cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0])
    }

    /// A skew.
    pub const fn skew(sx: f32, sy: f32) -> Self {
        Self::new([1.0, sx, 0.0, sy, 1.0, 0.0, 0.0, 0.0, 1.0])
    }

    /// Returns `true` if the bottom row is not `[0, 0, 1]`.
    pub fn has_perspective(&self) -> bool {
        self.m[6] != 0.0 || self.m[7] != 0.0 || self.m[8] != 1.0
    }

    /// Length of the mapped y axis.
    pub fn y_scale(&self) -> f32 {
        self.m[1].hypot(self.m[4])
    }

    /// `self * other`: `other` applies first.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        let a = &self.m;
        let b = &other.m;
        let mut out = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                out[row * 3 + col] = a[row * 3] * b[col]
                    + a[row * 3 + 1] * b[3 + col]
                    + a[row * 3 + 2] * b[6 + col];
            }
        }
        Self::new(out)
    }

    /// Map a point, dividing by `w` when perspective is present.
    pub fn map_point(&self, p: DlPoint) -> DlPoint {
        let m = &self.m;
        let x = m[0] * p.x + m[1] * p.y + m[2];
        let y = m[3] * p.x + m[4] * p.y + m[5];
        let w = m[6] * p.x + m[7] * p.y + m[8];
        if w != 0.0 && w != 1.0 {
            DlPoint::new(x / w, y / w)
        } else {
            DlPoint::new(x, y)
        }
    }

    /// Bounds of the mapped corners of `rect`.
    pub fn map_rect(&self, rect: &DlRect) -> DlRect {
        let corners = [
            self.map_point(DlPoint::new(rect.left, rect.top)),
            self.map_point(DlPoint::new(rect.right, rect.top)),
            self.map_point(DlPoint::new(rect.right, rect.bottom)),
            self.map_point(DlPoint::new(rect.left, rect.bottom)),
        ];
        DlRect::from_points(&corners).unwrap_or_default()
    }
}
