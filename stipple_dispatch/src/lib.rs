// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stipple Dispatch: plays display lists into a canvas.
//!
//! [`Dispatcher`] implements [`DlOpReceiver`], so any [`DisplayList`] can be
//! dispatched straight into it. Each command becomes zero or more calls on the
//! wrapped [`Canvas`]:
//!
//! - Attribute setters update the dispatcher's current [`Paint`].
//! - Transform ops are transposed from the display list's row-major layout
//!   into column-major [`Matrix`] values and concatenated.
//! - Draws specialize to the cheapest matching canvas primitive: a path that
//!   is really a rectangle becomes a rect draw, a square oval a circle.
//! - Nested display lists play back against the same dispatcher, sandboxed so
//!   that paint, initial matrix and save depth are restored afterwards.
//!
//! Features the canvas cannot express are logged with [`tracing`] and skipped.
//! Nothing here returns an error; a bad command only affects itself.
//!
//! The value converters used by the dispatcher are public too, for canvases
//! and tools that want the same mappings.
//!
//! # Features
//!
//! - `scene` (off by default): compile 3D scene color sources. Without it they
//!   are logged and ignored.
//!
//! [`DlOpReceiver`]: stipple_display_list::DlOpReceiver
//! [`DisplayList`]: stipple_display_list::DisplayList
//! [`Canvas`]: stipple_canvas::Canvas
//! [`Paint`]: stipple_canvas::Paint
//! [`Matrix`]: stipple_canvas::Matrix

mod color_source;
mod conversions;
mod dispatcher;
mod filters;
mod nine_patch;
mod shadow;

pub use conversions::{
    arc_path, circle_in, convert_stops, oval_path, path_from_text_blob, rrect_path,
    text_frame_from_blob, to_blend_mode, to_blur_style, to_clip_operation, to_color, to_dl_rect,
    to_fill_rule, to_filter_sampler_descriptor, to_matrix, to_path, to_point, to_rect,
    to_rs_transform, to_sampler_descriptor, to_stroke_cap, to_stroke_join, to_tile_mode,
    to_vertices,
};
pub use dispatcher::Dispatcher;
pub use filters::{to_color_filter, to_image_filter_proc, to_mask_blur_descriptor};
pub use nine_patch::nine_patch_rects;
pub use shadow::{
    LIGHT_POSITION, LIGHT_RADIUS, SPOT_ALPHA_SCALE, occluder_height, shadow_mask_blur,
    shadow_offset, spot_color, tonal_color,
};
