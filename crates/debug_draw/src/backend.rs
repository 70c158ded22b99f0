//! Backend abstraction for the debug-draw core
//!
//! This module defines the contract a rendering backend must implement
//! to receive batched debug primitives. The core holds exactly one
//! implementation for its lifetime (bound at `initialize`, released at
//! `shutdown`) and never interprets backend resources beyond routing
//! their handles.
//!
//! All operations are synchronous from the core's point of view: a call
//! returns once the backend has drawn or queued the batch. Whether GPU
//! execution has completed is the backend's concern.

use thiserror::Error;

use crate::vertex::DrawVertex;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors surfaced by a rendering backend
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend failed to create a glyph atlas texture
    #[error("glyph texture creation failed: {0}")]
    TextureCreation(String),

    /// A draw submission was rejected by the backend
    #[error("draw submission failed: {0}")]
    Draw(String),
}

/// Handle to a glyph atlas texture owned by the backend.
///
/// The core never interprets the bits; it only threads the handle from
/// [`RenderInterface::create_glyph_texture`] through glyph batch keys
/// and back into [`RenderInterface::draw_glyph_list`] and
/// [`RenderInterface::destroy_glyph_texture`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlyphTextureId(pub u64);

/// Rendering capability consumed by the flush dispatcher.
///
/// Implemented once per graphics backend. The core guarantees:
/// - every vertex slice passed to a draw call is non-empty;
/// - vertices within a call are in submission order;
/// - `destroy_glyph_texture` is called exactly once per handle the
///   backend returned from `create_glyph_texture`, no later than
///   shutdown of the owning context.
pub trait RenderInterface {
    /// Draw a run of point sprites. Each vertex is one point; its
    /// payload carries the sprite size.
    fn draw_point_list(&mut self, vertices: &[DrawVertex], depth_enabled: bool)
        -> BackendResult<()>;

    /// Draw a run of line segments. Consecutive vertex pairs form one
    /// segment; the slice length is always even.
    fn draw_line_list(&mut self, vertices: &[DrawVertex], depth_enabled: bool)
        -> BackendResult<()>;

    /// Draw a run of glyph quads sampled from the given atlas texture.
    /// Every six vertices form one quad (two triangles); the slice
    /// length is always a multiple of six. Glyphs are expected to be
    /// drawn blended, after all points and lines.
    fn draw_glyph_list(
        &mut self,
        vertices: &[DrawVertex],
        texture: GlyphTextureId,
    ) -> BackendResult<()>;

    /// Upload a glyph atlas and return an opaque handle to it.
    ///
    /// `pixels` holds `width * height` single-channel coverage bytes,
    /// row-major from the top-left.
    fn create_glyph_texture(
        &mut self,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> BackendResult<GlyphTextureId>;

    /// Release a glyph atlas previously returned by
    /// [`create_glyph_texture`](Self::create_glyph_texture).
    fn destroy_glyph_texture(&mut self, texture: GlyphTextureId) -> BackendResult<()>;
}
