// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nine-patch decomposition.
//!
//! An image is cut into a 3x3 grid by its center rect. Corners keep their
//! size, edges stretch along one axis, and the center stretches along both.
//! When the destination is too small for the fixed edges, the edges shrink
//! proportionally and the center disappears.

use kurbo::{Rect, Size};

#[derive(Copy, Clone, Debug, PartialEq)]
struct Slice {
    src: (f64, f64),
    dst: (f64, f64),
}

impl Slice {
    fn is_empty(&self) -> bool {
        self.src.0 >= self.src.1 || self.dst.0 >= self.dst.1
    }
}

// Slices along one axis: [0, src_size] cut at [center_start, center_end] and
// laid out over [dst_start, dst_end].
fn slices(
    src_size: f64,
    center_start: f64,
    center_end: f64,
    dst_start: f64,
    dst_end: f64,
) -> [Slice; 3] {
    let center_start = center_start.clamp(0.0, src_size);
    let center_end = center_end.clamp(center_start, src_size);
    let fixed_start = center_start;
    let fixed_end = src_size - center_end;
    let fixed = fixed_start + fixed_end;
    let dst_size = dst_end - dst_start;
    let scale = if fixed > dst_size && fixed > 0.0 {
        dst_size / fixed
    } else {
        1.0
    };
    let dst_center_start = dst_start + fixed_start * scale;
    let dst_center_end = dst_end - fixed_end * scale;
    [
        Slice {
            src: (0.0, center_start),
            dst: (dst_start, dst_center_start),
        },
        Slice {
            src: (center_start, center_end),
            dst: (dst_center_start, dst_center_end),
        },
        Slice {
            src: (center_end, src_size),
            dst: (dst_center_end, dst_end),
        },
    ]
}

/// Source and destination rects of each non-empty patch, row by row.
///
/// `center` is in image pixels and is clamped to the image.
pub fn nine_patch_rects(image_size: Size, center: Rect, dst: Rect) -> Vec<(Rect, Rect)> {
    if dst.is_zero_area() || dst.width() < 0.0 || dst.height() < 0.0 {
        return Vec::new();
    }
    let columns = slices(image_size.width, center.x0, center.x1, dst.x0, dst.x1);
    let rows = slices(image_size.height, center.y0, center.y1, dst.y0, dst.y1);
    let mut patches = Vec::with_capacity(9);
    for row in rows.iter().filter(|slice| !slice.is_empty()) {
        for column in columns.iter().filter(|slice| !slice.is_empty()) {
            patches.push((
                Rect::new(column.src.0, row.src.0, column.src.1, row.src.1),
                Rect::new(column.dst.0, row.dst.0, column.dst.1, row.dst.1),
            ));
        }
    }
    patches
}
