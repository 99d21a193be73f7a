// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{DlOp, DlOpReceiver, DlRTree, DlRect};

/// An immutable, ordered sequence of drawing commands.
///
/// Produced by [`crate::DisplayListBuilder`]. Lists recorded with an R-tree
/// can skip drawing commands outside a culling rectangle during playback.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayList {
    pub(crate) ops: Vec<DlOp>,
    pub(crate) bounds: DlRect,
    pub(crate) rtree: Option<DlRTree>,
}

impl DisplayList {
    /// Recorded commands in order.
    pub fn ops(&self) -> &[DlOp] {
        &self.ops
    }

    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Conservative bounds of everything drawn, in the list's coordinates.
    ///
    /// Lists containing unbounded draws (such as `draw_paint`) have infinite
    /// bounds.
    pub fn bounds(&self) -> DlRect {
        self.bounds
    }

    /// Returns `true` if the list carries a culling index.
    pub fn has_rtree(&self) -> bool {
        self.rtree.is_some()
    }

    /// The culling index, if recorded.
    pub fn rtree(&self) -> Option<&DlRTree> {
        self.rtree.as_ref()
    }

    /// Deliver every command to `receiver`.
    pub fn dispatch<R: DlOpReceiver + ?Sized>(&self, receiver: &mut R) {
        for op in &self.ops {
            op.dispatch(receiver);
        }
    }

    /// Deliver every non-drawing command, and the drawing commands whose
    /// bounds overlap `cull_rect`.
    ///
    /// Without an R-tree this is the same as [`DisplayList::dispatch`].
    pub fn dispatch_culled<R: DlOpReceiver + ?Sized>(&self, receiver: &mut R, cull_rect: &DlRect) {
        let Some(rtree) = &self.rtree else {
            self.dispatch(receiver);
            return;
        };
        let mut visible: Vec<bool> = self.ops.iter().map(|op| !op.is_draw()).collect();
        rtree.search(cull_rect, |index| {
            if let Some(slot) = visible.get_mut(index) {
                *slot = true;
            }
        });
        let skipped = visible.iter().filter(|v| !**v).count();
        if skipped > 0 {
            tracing::trace!(skipped, total = self.ops.len(), "culled display list playback");
        }
        for (op, visible) in self.ops.iter().zip(visible) {
            if visible {
                op.dispatch(receiver);
            }
        }
    }
}
