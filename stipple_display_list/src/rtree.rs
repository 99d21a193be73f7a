// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A static, bulk-loaded R-tree over recorded op bounds.

use core::fmt;

use crate::DlRect;

const FAN_OUT: usize = 11;

#[derive(Copy, Clone, Debug, PartialEq)]
struct Node {
    bounds: DlRect,
    // Range into the level below, or into `entries` for the leaf level.
    start: usize,
    end: usize,
}

/// Spatial index mapping rectangles to op indices.
///
/// Built once from all entries; queries visit every entry whose rectangle
/// overlaps the query rectangle.
#[derive(Clone, PartialEq)]
pub struct DlRTree {
    entries: Vec<(usize, DlRect)>,
    // levels[0] groups entries; the last level has a single root.
    levels: Vec<Vec<Node>>,
}

impl fmt::Debug for DlRTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DlRTree")
            .field("entries", &self.entries.len())
            .field("levels", &self.levels.len())
            .finish()
    }
}

impl DlRTree {
    /// Build from `(op index, bounds)` pairs.
    pub fn new(mut entries: Vec<(usize, DlRect)>) -> Self {
        // Sort into horizontal bands, then left to right, so siblings are close.
        entries.sort_by(|(_, a), (_, b)| {
            let (ca, cb) = (a.center(), b.center());
            ca.y.total_cmp(&cb.y).then(ca.x.total_cmp(&cb.x))
        });

        let mut levels = Vec::new();
        let mut bounds: Vec<DlRect> = entries.iter().map(|(_, rect)| *rect).collect();
        while !bounds.is_empty() {
            let level: Vec<Node> = bounds
                .chunks(FAN_OUT)
                .enumerate()
                .map(|(i, chunk)| Node {
                    bounds: chunk.iter().skip(1).fold(chunk[0], |acc, r| acc.union(r)),
                    start: i * FAN_OUT,
                    end: i * FAN_OUT + chunk.len(),
                })
                .collect();
            let done = level.len() == 1;
            bounds = level.iter().map(|node| node.bounds).collect();
            levels.push(level);
            if done {
                break;
            }
        }
        Self { entries, levels }
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Union of all indexed rectangles.
    pub fn bounds(&self) -> Option<DlRect> {
        self.levels.last().and_then(|root| root.first()).map(|node| node.bounds)
    }

    /// Visit the index of every entry overlapping `query`.
    pub fn search<F: FnMut(usize)>(&self, query: &DlRect, mut f: F) {
        let Some(top) = self.levels.len().checked_sub(1) else {
            return;
        };
        for node in &self.levels[top] {
            self.visit(top, node, query, &mut f);
        }
    }

    fn visit<F: FnMut(usize)>(&self, level: usize, node: &Node, query: &DlRect, f: &mut F) {
        if !node.bounds.intersects(query) {
            return;
        }
        if level == 0 {
            for (index, rect) in &self.entries[node.start..node.end] {
                if rect.intersects(query) {
                    f(*index);
                }
            }
        } else {
            for child in &self.levels[level - 1][node.start..node.end] {
                self.visit(level - 1, child, query, f);
            }
        }
    }
}
