// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stipple Display List: recorded drawing commands.
//!
//! A [`DisplayList`] is an immutable, ordered sequence of [`DlOp`]s: paint
//! attribute setters, save/restore and transform commands, clips, and draws.
//! It is replayed by handing a [`DlOpReceiver`] to [`DisplayList::dispatch`],
//! which calls one receiver method per command.
//!
//! Lists are recorded with a [`DisplayListBuilder`], which is itself a
//! receiver. A builder created with [`DisplayListBuilder::with_rtree`] also
//! records the bounds of every drawing command in a [`DlRTree`], so playback
//! can skip commands outside a culling rectangle
//! ([`DisplayList::dispatch_culled`]).
//!
//! Values here use the producer's conventions: single-precision geometry,
//! packed ARGB colors ([`DlColor`]) and row-major 3x3 matrices
//! ([`DlMatrix`]). Values that carry invariants (gradient stops, vertices,
//! atlases) validate them on construction and report a [`DisplayListError`].
//!
//! ```
//! use stipple_display_list::{DisplayListBuilder, DlColor, DlOpReceiver, DlRect};
//!
//! let mut builder = DisplayListBuilder::new();
//! builder.set_color(DlColor::RED);
//! builder.draw_rect(&DlRect::from_ltrb(0.0, 0.0, 10.0, 10.0));
//! let list = builder.build();
//! assert_eq!(list.len(), 2);
//! ```

mod builder;
mod content;
mod display_list;
mod effects;
mod error;
mod geometry;
mod op;
mod path;
mod receiver;
mod rtree;
mod types;

pub use builder::DisplayListBuilder;
pub use content::{
    DlAtlas, DlFont, DlGlyph, DlGlyphRun, DlTextBlob, DlVertexMode, DlVertices,
};
pub use display_list::DisplayList;
pub use effects::{
    DlColorFilter, DlColorSource, DlConicalGradient, DlGradientStops, DlImage,
    DlImageColorSource, DlImageFilter, DlLinearGradient, DlMaskFilter, DlPathEffect,
    DlRadialGradient, DlRuntimeEffect, DlSceneSource, DlSweepGradient,
};
pub use error::DisplayListError;
pub use geometry::{DlIRect, DlMatrix, DlPoint, DlRRect, DlRSTransform, DlRect};
pub use op::DlOp;
pub use path::{DlPath, DlPathVerb};
pub use receiver::{DlOpReceiver, SaveLayerOptions};
pub use rtree::DlRTree;
pub use types::{
    DlBlendMode, DlBlurStyle, DlClipOp, DlColor, DlDrawStyle, DlFilterMode, DlImageSampling,
    DlPathFillType, DlPointMode, DlSrcRectConstraint, DlStrokeCap, DlStrokeJoin, DlTileMode,
};
