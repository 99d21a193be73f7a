// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stipple Canvas Reference.
//!
//! This crate provides [`RefCanvas`], a small, stateful implementation of
//! [`Canvas`] for **call recording and state tracing**.
//!
//! It is intentionally *not* a renderer:
//! - It does **not** rasterize to pixels.
//! - It tracks only the save stack, the current transform, and a
//!   conservative device-space culling rectangle narrowed by intersect clips.
//! - It is intended for tests and debugging that want to assert on emitted
//!   canvas calls and the canvas state at the time each call was made.

use std::sync::Arc;

use kurbo::{Point, Rect};
use stipple_canvas::{
    Atlas, BlendMode, Canvas, ClipOperation, ImageFilterProc, Matrix, Paint, Path, PointStyle,
    SamplerDescriptor, TextFrame, Texture, Vertices,
};

/// Snapshot of the canvas state when an event was recorded.
#[derive(Clone, Debug, PartialEq)]
pub struct StateSnapshot {
    /// Current transform.
    pub transform: Matrix,
    /// Save stack depth, starting at 1.
    pub save_count: usize,
    /// Device-space culling rectangle, if bounded.
    pub cull_rect: Option<Rect>,
}

/// A state-changing canvas call.
#[derive(Clone, Debug, PartialEq)]
pub enum StateOp {
    /// [`Canvas::save`].
    Save,
    /// [`Canvas::save_layer`].
    SaveLayer {
        /// Layer paint.
        paint: Paint,
        /// Optional layer bounds.
        bounds: Option<Rect>,
        /// Optional backdrop filter.
        backdrop: Option<ImageFilterProc>,
    },
    /// A successful [`Canvas::restore`].
    Restore,
    /// [`Canvas::reset_transform`].
    ResetTransform,
    /// [`Canvas::concat`].
    Concat(Matrix),
    /// [`Canvas::pre_concat`].
    PreConcat(Matrix),
    /// [`Canvas::clip_rect`].
    ClipRect {
        /// Clip rectangle.
        rect: Rect,
        /// Clip operation.
        op: ClipOperation,
    },
    /// [`Canvas::clip_rrect`].
    ClipRRect {
        /// Clip rectangle.
        rect: Rect,
        /// Corner radius.
        radius: f64,
        /// Clip operation.
        op: ClipOperation,
    },
    /// [`Canvas::clip_path`].
    ClipPath {
        /// Clip path.
        path: Path,
        /// Clip operation.
        op: ClipOperation,
    },
}

/// A drawing canvas call.
#[derive(Clone, Debug, PartialEq)]
#[expect(missing_docs, reason = "fields mirror the Canvas method parameters")]
pub enum DrawOp {
    Paint {
        paint: Paint,
    },
    Rect {
        rect: Rect,
        paint: Paint,
    },
    RRect {
        rect: Rect,
        radius: f64,
        paint: Paint,
    },
    Circle {
        center: Point,
        radius: f64,
        paint: Paint,
    },
    Path {
        path: Path,
        paint: Paint,
    },
    Points {
        points: Vec<Point>,
        radius: f64,
        paint: Paint,
        style: PointStyle,
    },
    ImageRect {
        texture: Arc<Texture>,
        src: Rect,
        dst: Rect,
        paint: Paint,
        sampler: SamplerDescriptor,
    },
    Vertices {
        vertices: Vertices,
        blend_mode: BlendMode,
        paint: Paint,
    },
    Atlas {
        atlas: Atlas,
        paint: Paint,
    },
    TextFrame {
        frame: TextFrame,
        position: Point,
        paint: Paint,
    },
}

impl DrawOp {
    /// The paint the draw was issued with.
    pub fn paint(&self) -> &Paint {
        match self {
            Self::Paint { paint }
            | Self::Rect { paint, .. }
            | Self::RRect { paint, .. }
            | Self::Circle { paint, .. }
            | Self::Path { paint, .. }
            | Self::Points { paint, .. }
            | Self::ImageRect { paint, .. }
            | Self::Vertices { paint, .. }
            | Self::Atlas { paint, .. }
            | Self::TextFrame { paint, .. } => paint,
        }
    }
}

/// Event recorded by the reference canvas.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// State operation and the resulting state snapshot.
    State {
        /// State operation that was applied.
        op: StateOp,
        /// Snapshot after applying the state operation.
        state: StateSnapshot,
    },
    /// Draw operation and the state snapshot used for drawing.
    Draw {
        /// Draw operation that was applied.
        op: DrawOp,
        /// Snapshot at the time of drawing.
        state: StateSnapshot,
    },
}

impl Event {
    /// The state snapshot attached to this event.
    pub fn state(&self) -> &StateSnapshot {
        match self {
            Self::State { state, .. } | Self::Draw { state, .. } => state,
        }
    }

    /// The draw operation, if this is a draw event.
    pub fn as_draw(&self) -> Option<&DrawOp> {
        match self {
            Self::Draw { op, .. } => Some(op),
            Self::State { .. } => None,
        }
    }
}

/// The finalized recording of a [`RefCanvas`].
#[derive(Clone, Debug, PartialEq)]
pub struct RefPicture {
    /// Recorded events in order.
    pub events: Arc<[Event]>,
}

impl RefPicture {
    /// Iterate over the draw operations only.
    pub fn draws(&self) -> impl Iterator<Item = &DrawOp> {
        self.events.iter().filter_map(Event::as_draw)
    }
}

#[derive(Clone, Debug)]
struct Frame {
    transform: Matrix,
    cull_rect: Option<Rect>,
    is_layer: bool,
}

/// Simple recording implementation of [`Canvas`].
#[derive(Debug)]
pub struct RefCanvas {
    stack: Vec<Frame>,
    /// Log of events in the order they were applied.
    events: Vec<Event>,
}

impl Default for RefCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl RefCanvas {
    /// A canvas with no culling rectangle.
    pub fn new() -> Self {
        Self::with_initial_frame(None)
    }

    /// A canvas whose device-space culling rectangle starts as `cull_rect`.
    pub fn with_cull_rect(cull_rect: Rect) -> Self {
        Self::with_initial_frame(Some(cull_rect))
    }

    fn with_initial_frame(cull_rect: Option<Rect>) -> Self {
        Self {
            stack: vec![Frame {
                transform: Matrix::IDENTITY,
                cull_rect,
                is_layer: false,
            }],
            events: Vec::new(),
        }
    }

    /// Returns a slice of recorded events.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Iterate over recorded draw operations.
    pub fn draws(&self) -> impl Iterator<Item = &DrawOp> {
        self.events.iter().filter_map(Event::as_draw)
    }

    /// Clears all recorded events but keeps the current state.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Number of open save layers.
    pub fn layer_depth(&self) -> usize {
        self.stack.iter().filter(|frame| frame.is_layer).count()
    }

    fn top(&self) -> &Frame {
        // The bottom frame is never popped.
        &self.stack[self.stack.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Frame {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn snapshot(&self) -> StateSnapshot {
        let top = self.top();
        StateSnapshot {
            transform: top.transform,
            save_count: self.stack.len(),
            cull_rect: top.cull_rect,
        }
    }

    fn state(&mut self, op: StateOp) {
        let state = self.snapshot();
        self.events.push(Event::State { op, state });
    }

    fn draw(&mut self, op: DrawOp) {
        let state = self.snapshot();
        self.events.push(Event::Draw { op, state });
    }

    fn push_frame(&mut self, is_layer: bool) {
        let mut frame = self.top().clone();
        frame.is_layer = is_layer;
        self.stack.push(frame);
    }

    fn intersect_cull(&mut self, local_bounds: Rect, op: ClipOperation) {
        if op != ClipOperation::Intersect {
            return;
        }
        let top = self.top_mut();
        let device = top.transform.transform_bounds(local_bounds);
        top.cull_rect = Some(match top.cull_rect {
            Some(cull) => cull.intersect(device),
            None => device,
        });
    }
}

impl Canvas for RefCanvas {
    type Picture = RefPicture;

    fn save(&mut self) {
        self.push_frame(false);
        self.state(StateOp::Save);
    }

    fn save_layer(
        &mut self,
        paint: &Paint,
        bounds: Option<Rect>,
        backdrop: Option<ImageFilterProc>,
    ) {
        self.push_frame(true);
        self.state(StateOp::SaveLayer {
            paint: paint.clone(),
            bounds,
            backdrop,
        });
    }

    fn restore(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.stack.pop();
        self.state(StateOp::Restore);
        true
    }

    fn save_count(&self) -> usize {
        self.stack.len()
    }

    fn current_transform(&self) -> Matrix {
        self.top().transform
    }

    fn reset_transform(&mut self) {
        self.top_mut().transform = Matrix::IDENTITY;
        self.state(StateOp::ResetTransform);
    }

    fn concat(&mut self, matrix: &Matrix) {
        let top = self.top_mut();
        top.transform = top.transform * *matrix;
        self.state(StateOp::Concat(*matrix));
    }

    fn pre_concat(&mut self, matrix: &Matrix) {
        let top = self.top_mut();
        top.transform = *matrix * top.transform;
        self.state(StateOp::PreConcat(*matrix));
    }

    fn current_local_culling_bounds(&self) -> Option<Rect> {
        let top = self.top();
        let cull = top.cull_rect?;
        let inverse = top.transform.invert()?;
        Some(inverse.transform_bounds(cull))
    }

    fn clip_rect(&mut self, rect: Rect, op: ClipOperation) {
        self.intersect_cull(rect, op);
        self.state(StateOp::ClipRect { rect, op });
    }

    fn clip_rrect(&mut self, rect: Rect, radius: f64, op: ClipOperation) {
        self.intersect_cull(rect, op);
        self.state(StateOp::ClipRRect { rect, radius, op });
    }

    fn clip_path(&mut self, path: Path, op: ClipOperation) {
        self.intersect_cull(path.bounds(), op);
        self.state(StateOp::ClipPath { path, op });
    }

    fn draw_paint(&mut self, paint: &Paint) {
        self.draw(DrawOp::Paint {
            paint: paint.clone(),
        });
    }

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        self.draw(DrawOp::Rect {
            rect,
            paint: paint.clone(),
        });
    }

    fn draw_rrect(&mut self, rect: Rect, radius: f64, paint: &Paint) {
        self.draw(DrawOp::RRect {
            rect,
            radius,
            paint: paint.clone(),
        });
    }

    fn draw_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        self.draw(DrawOp::Circle {
            center,
            radius,
            paint: paint.clone(),
        });
    }

    fn draw_path(&mut self, path: Path, paint: &Paint) {
        self.draw(DrawOp::Path {
            path,
            paint: paint.clone(),
        });
    }

    fn draw_points(&mut self, points: Vec<Point>, radius: f64, paint: &Paint, style: PointStyle) {
        self.draw(DrawOp::Points {
            points,
            radius,
            paint: paint.clone(),
            style,
        });
    }

    fn draw_image_rect(
        &mut self,
        texture: Arc<Texture>,
        src: Rect,
        dst: Rect,
        paint: &Paint,
        sampler: SamplerDescriptor,
    ) {
        self.draw(DrawOp::ImageRect {
            texture,
            src,
            dst,
            paint: paint.clone(),
            sampler,
        });
    }

    fn draw_vertices(&mut self, vertices: Vertices, blend_mode: BlendMode, paint: &Paint) {
        self.draw(DrawOp::Vertices {
            vertices,
            blend_mode,
            paint: paint.clone(),
        });
    }

    fn draw_atlas(&mut self, atlas: Atlas, paint: &Paint) {
        self.draw(DrawOp::Atlas {
            atlas,
            paint: paint.clone(),
        });
    }

    fn draw_text_frame(&mut self, frame: TextFrame, position: Point, paint: &Paint) {
        self.draw(DrawOp::TextFrame {
            frame,
            position,
            paint: paint.clone(),
        });
    }

    fn end_recording_as_picture(&mut self) -> RefPicture {
        let events = core::mem::take(&mut self.events);
        tracing::debug!(events = events.len(), "finished reference recording");
        RefPicture {
            events: events.into(),
        }
    }
}
