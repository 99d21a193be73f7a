// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GPU-side resources referenced (never owned) by paints and draw calls.

use std::sync::Arc;

use kurbo::Size;

/// Identifier for a realized texture.
///
/// This is a small, opaque handle assigned by whatever allocated the texture.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// A realized, GPU-backed texture.
///
/// Textures are shared via [`Arc`]; paints and draw calls hold a reference for
/// as long as they may be drawn.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Texture {
    id: TextureId,
    width: u32,
    height: u32,
}

impl Texture {
    /// Describe a realized texture of the given pixel size.
    pub const fn new(id: TextureId, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    /// Texture handle.
    pub const fn id(&self) -> TextureId {
        self.id
    }

    /// Width in pixels.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Pixel size as a [`kurbo::Size`].
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// A compiled runtime shader program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeStage {
    entrypoint: String,
    code: Arc<[u8]>,
}

impl RuntimeStage {
    /// Wrap compiled shader bytes and their entrypoint.
    pub fn new(entrypoint: impl Into<String>, code: impl Into<Arc<[u8]>>) -> Self {
        Self {
            entrypoint: entrypoint.into(),
            code: code.into(),
        }
    }

    /// Name of the fragment entrypoint.
    pub fn entrypoint(&self) -> &str {
        &self.entrypoint
    }

    /// Compiled program bytes.
    pub fn code(&self) -> &[u8] {
        &self.code
    }
}

/// Root of a 3D scene graph rendered by the scene color source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneNode {
    name: String,
}

impl SceneNode {
    /// Create a named scene node.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Node name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
