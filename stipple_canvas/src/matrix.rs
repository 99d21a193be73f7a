// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column-major 4x4 transform used by canvases.

use core::ops::Mul;

use kurbo::{Point, Rect};

/// A 4x4 transform stored in column-major order.
///
/// `m[12]`, `m[13]` and `m[14]` hold the translation. Points are treated as
/// column vectors, so `a * b` applies `b` first and then `a`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix {
    /// Matrix entries, column by column.
    pub m: [f64; 16],
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    /// The identity transform.
    pub const IDENTITY: Self = Self::new([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// Create a matrix from entries given in column-major order.
    #[inline]
    pub const fn new(m: [f64; 16]) -> Self {
        Self { m }
    }

    /// Create a matrix from entries given in row-major order.
    pub const fn from_row_major(r: [f64; 16]) -> Self {
        Self::new([
            r[0], r[4], r[8], r[12], //
            r[1], r[5], r[9], r[13], //
            r[2], r[6], r[10], r[14], //
            r[3], r[7], r[11], r[15],
        ])
    }

    /// A translation.
    pub const fn translation(tx: f64, ty: f64, tz: f64) -> Self {
        Self::new([
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            tx, ty, tz, 1.0,
        ])
    }

    /// A scale about the origin.
    pub const fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self::new([
            sx, 0.0, 0.0, 0.0, //
            0.0, sy, 0.0, 0.0, //
            0.0, 0.0, sz, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// A rotation about the Z axis, in radians.
    pub fn rotation_z(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self::new([
            c, s, 0.0, 0.0, //
            -s, c, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// A 2D skew with the given X and Y shear factors.
    pub const fn skew(sx: f64, sy: f64) -> Self {
        Self::new([
            1.0, sy, 0.0, 0.0, //
            sx, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Returns the entry at `row`, `column`.
    #[inline]
    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.m[column * 4 + row]
    }

    /// Returns `self * other`.
    pub fn multiply(&self, other: &Self) -> Self {
        let mut out = [0.0; 16];
        for column in 0..4 {
            for row in 0..4 {
                out[column * 4 + row] = (0..4)
                    .map(|k| self.m[k * 4 + row] * other.m[column * 4 + k])
                    .sum();
            }
        }
        Self::new(out)
    }

    /// Returns the transpose.
    pub fn transpose(&self) -> Self {
        let m = &self.m;
        Self::from_row_major(*m)
    }

    /// Returns `true` if the bottom row is not `[0, 0, 0, 1]`.
    pub fn has_perspective(&self) -> bool {
        let m = &self.m;
        m[3] != 0.0 || m[7] != 0.0 || m[11] != 0.0 || m[15] != 1.0
    }

    /// Returns `true` if this is exactly the identity.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Length of each basis vector, i.e. the scale applied along X, Y and Z.
    pub fn basis_scale(&self) -> [f64; 3] {
        let m = &self.m;
        let len = |a: f64, b: f64, c: f64| (a * a + b * b + c * c).sqrt();
        [
            len(m[0], m[1], m[2]),
            len(m[4], m[5], m[6]),
            len(m[8], m[9], m[10]),
        ]
    }

    /// Map a point, performing the perspective divide when needed.
    pub fn transform_point(&self, point: Point) -> Point {
        let m = &self.m;
        let x = m[0] * point.x + m[4] * point.y + m[12];
        let y = m[1] * point.x + m[5] * point.y + m[13];
        let w = m[3] * point.x + m[7] * point.y + m[15];
        if w != 0.0 && w != 1.0 {
            Point::new(x / w, y / w)
        } else {
            Point::new(x, y)
        }
    }

    /// Bounds of `rect` after mapping its four corners.
    pub fn transform_bounds(&self, rect: Rect) -> Rect {
        let corners = [
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
        ];
        let first = self.transform_point(corners[0]);
        corners[1..].iter().fold(
            Rect::from_points(first, first),
            |bounds, corner| bounds.union_pt(self.transform_point(*corner)),
        )
    }

    /// Returns the inverse, or `None` when the matrix is singular.
    pub fn invert(&self) -> Option<Self> {
        let m = &self.m;
        let mut inv = [0.0; 16];

        inv[0] = m[5] * m[10] * m[15] - m[5] * m[11] * m[14] - m[9] * m[6] * m[15]
            + m[9] * m[7] * m[14]
            + m[13] * m[6] * m[11]
            - m[13] * m[7] * m[10];
        inv[4] = -m[4] * m[10] * m[15] + m[4] * m[11] * m[14] + m[8] * m[6] * m[15]
            - m[8] * m[7] * m[14]
            - m[12] * m[6] * m[11]
            + m[12] * m[7] * m[10];
        inv[8] = m[4] * m[9] * m[15] - m[4] * m[11] * m[13] - m[8] * m[5] * m[15]
            + m[8] * m[7] * m[13]
            + m[12] * m[5] * m[11]
            - m[12] * m[7] * m[9];
        inv[12] = -m[4] * m[9] * m[14] + m[4] * m[10] * m[13] + m[8] * m[5] * m[14]
            - m[8] * m[6] * m[13]
            - m[12] * m[5] * m[10]
            + m[12] * m[6] * m[9];
        inv[1] = -m[1] * m[10] * m[15] + m[1] * m[11] * m[14] + m[9] * m[2] * m[15]
            - m[9] * m[3] * m[14]
            - m[13] * m[2] * m[11]
            + m[13] * m[3] * m[10];
        inv[5] = m[0] * m[10] * m[15] - m[0] * m[11] * m[14] - m[8] * m[2] * m[15]
            + m[8] * m[3] * m[14]
            + m[12] * m[2] * m[11]
            - m[12] * m[3] * m[10];
        inv[9] = -m[0] * m[9] * m[15] + m[0] * m[11] * m[13] + m[8] * m[1] * m[15]
            - m[8] * m[3] * m[13]
            - m[12] * m[1] * m[11]
            + m[12] * m[3] * m[9];
        inv[13] = m[0] * m[9] * m[14] - m[0] * m[10] * m[13] - m[8] * m[1] * m[14]
            + m[8] * m[2] * m[13]
            + m[12] * m[1] * m[10]
            - m[12] * m[2] * m[9];
        inv[2] = m[1] * m[6] * m[15] - m[1] * m[7] * m[14] - m[5] * m[2] * m[15]
            + m[5] * m[3] * m[14]
            + m[13] * m[2] * m[7]
            - m[13] * m[3] * m[6];
        inv[6] = -m[0] * m[6] * m[15] + m[0] * m[7] * m[14] + m[4] * m[2] * m[15]
            - m[4] * m[3] * m[14]
            - m[12] * m[2] * m[7]
            + m[12] * m[3] * m[6];
        inv[10] = m[0] * m[5] * m[15] - m[0] * m[7] * m[13] - m[4] * m[1] * m[15]
            + m[4] * m[3] * m[13]
            + m[12] * m[1] * m[7]
            - m[12] * m[3] * m[5];
        inv[14] = -m[0] * m[5] * m[14] + m[0] * m[6] * m[13] + m[4] * m[1] * m[14]
            - m[4] * m[2] * m[13]
            - m[12] * m[1] * m[6]
            + m[12] * m[2] * m[5];
        inv[3] = -m[1] * m[6] * m[11] + m[1] * m[7] * m[10] + m[5] * m[2] * m[11]
            - m[5] * m[3] * m[10]
            - m[9] * m[2] * m[7]
            + m[9] * m[3] * m[6];
        inv[7] = m[0] * m[6] * m[11] - m[0] * m[7] * m[10] - m[4] * m[2] * m[11]
            + m[4] * m[3] * m[10]
            + m[8] * m[2] * m[7]
            - m[8] * m[3] * m[6];
        inv[11] = -m[0] * m[5] * m[11] + m[0] * m[7] * m[9] + m[4] * m[1] * m[11]
            - m[4] * m[3] * m[9]
            - m[8] * m[1] * m[7]
            + m[8] * m[3] * m[5];
        inv[15] = m[0] * m[5] * m[10] - m[0] * m[6] * m[9] - m[4] * m[1] * m[10]
            + m[4] * m[2] * m[9]
            + m[8] * m[1] * m[6]
            - m[8] * m[2] * m[5];

        let det = m[0] * inv[0] + m[1] * inv[4] + m[2] * inv[8] + m[3] * inv[12];
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv_det = 1.0 / det;
        for value in &mut inv {
            *value *= inv_det;
        }
        Some(Self::new(inv))
    }
}

impl Mul for Matrix {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}
