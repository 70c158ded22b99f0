//! Vertex layout and batching keys
//!
//! Defines the published vertex structure shared by every primitive kind.
//! The byte-exact layout is the one stable contract between the core and
//! backend implementations: backends read the same stride regardless of
//! whether a batch holds points, lines, or glyphs.
//!
//! # Memory Layout
//!
//! `DrawVertex` is `#[repr(C)]` with the following field order, 36 bytes
//! total, no padding:
//!
//! | offset | field      | type       | meaning                                  |
//! |--------|------------|------------|------------------------------------------|
//! | 0      | `position` | `[f32; 3]` | world position (screen position for text) |
//! | 12     | `color`    | `[f32; 4]` | normalized RGBA                           |
//! | 28     | `payload`  | `[f32; 2]` | kind-dependent, see below                 |
//!
//! Payload interpretation per primitive kind:
//! - **Point**: `[size, 0]` where `size` is the point-sprite size in pixels.
//! - **Line**: unused, written as `[0, 0]`.
//! - **Glyph**: `[u, v]` atlas texture coordinates for this corner.
//!
//! Any change to this layout must bump [`VERTEX_LAYOUT_VERSION`].

use bitflags::bitflags;
use bytemuck::{Pod, Zeroable};

use crate::backend::GlyphTextureId;
use crate::foundation::math::{Color, Vec3};

/// Version of the `DrawVertex` byte layout published to backends.
pub const VERTEX_LAYOUT_VERSION: u32 = 1;

/// A single vertex as handed to the backend.
///
/// One structure serves all primitive kinds so a single vertex buffer
/// layout can be bound for the whole debug pass. See the module docs for
/// the byte-exact layout.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct DrawVertex {
    /// Position in world space (or screen space for glyph vertices).
    pub position: [f32; 3],
    /// Normalized RGBA color.
    pub color: [f32; 4],
    /// Kind-dependent payload: point size, unused, or glyph UV.
    pub payload: [f32; 2],
}

impl DrawVertex {
    /// Build a point vertex carrying its sprite size in the payload.
    pub fn point(position: Vec3, color: Color, size: f32) -> Self {
        Self {
            position: position.into(),
            color: color.into(),
            payload: [size, 0.0],
        }
    }

    /// Build a line endpoint vertex. The payload is unused for lines.
    pub fn line(position: Vec3, color: Color) -> Self {
        Self {
            position: position.into(),
            color: color.into(),
            payload: [0.0, 0.0],
        }
    }

    /// Build a glyph corner vertex carrying its atlas UV in the payload.
    pub fn glyph(position: Vec3, color: Color, uv: [f32; 2]) -> Self {
        Self {
            position: position.into(),
            color: color.into(),
            payload: uv,
        }
    }
}

/// Primitive kinds understood by the dispatcher.
///
/// The discriminant order is the dispatch order: points first, then
/// lines, then glyphs. Glyphs go last because backends typically draw
/// them blended over the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrimitiveKind {
    /// Point sprites, one vertex each.
    Point,
    /// Line segments, two vertices each.
    Line,
    /// Glyph quads, six vertices each (two triangles).
    Glyph,
}

impl PrimitiveKind {
    /// Number of vertices making up one primitive of this kind.
    ///
    /// Draw-call chunking must never split a primitive, so chunk sizes
    /// are aligned down to a multiple of this.
    pub fn vertices_per_primitive(self) -> usize {
        match self {
            Self::Point => 1,
            Self::Line => 2,
            Self::Glyph => 6,
        }
    }
}

bitflags! {
    /// Rasterization toggles used as part of the batching key.
    ///
    /// Currently only the depth test; further toggles extend the flag
    /// set without changing the store or dispatcher.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct RenderState: u32 {
        /// GPU depth testing enabled for this batch.
        const DEPTH_TEST = 1;
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self::DEPTH_TEST
    }
}

impl RenderState {
    /// Build a state from the per-call depth flag of the submission API.
    pub fn with_depth(depth_enabled: bool) -> Self {
        if depth_enabled {
            Self::DEPTH_TEST
        } else {
            Self::empty()
        }
    }

    /// Whether this state has depth testing enabled.
    pub fn depth_enabled(self) -> bool {
        self.contains(Self::DEPTH_TEST)
    }
}

/// Batching key for a primitive group.
///
/// Two submissions with equal keys always land in the same group. The
/// derived `Ord` yields the dispatch order: kind, then render state,
/// then glyph texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    /// Primitive kind of every vertex in the group.
    pub kind: PrimitiveKind,
    /// Rasterization state shared by the group.
    pub state: RenderState,
    /// Atlas texture for glyph groups, `None` for points and lines.
    pub texture: Option<GlyphTextureId>,
}

impl GroupKey {
    /// Key for a point or line group.
    pub fn untextured(kind: PrimitiveKind, state: RenderState) -> Self {
        Self {
            kind,
            state,
            texture: None,
        }
    }

    /// Key for a glyph group bound to an atlas texture.
    pub fn glyph(state: RenderState, texture: GlyphTextureId) -> Self {
        Self {
            kind: PrimitiveKind::Glyph,
            state,
            texture: Some(texture),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_is_stable() {
        // The published ABI: 9 floats, no padding.
        assert_eq!(std::mem::size_of::<DrawVertex>(), 36);
        assert_eq!(std::mem::align_of::<DrawVertex>(), 4);
        assert_eq!(VERTEX_LAYOUT_VERSION, 1);
    }

    #[test]
    fn test_vertex_is_pod() {
        let v = DrawVertex::point(Vec3::new(1.0, 2.0, 3.0), Color::new(1.0, 0.0, 0.0, 1.0), 4.0);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 36);
        // Field order: position, color, payload.
        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 1.0, 0.0, 0.0, 1.0, 4.0, 0.0]);
    }

    #[test]
    fn test_group_key_dispatch_order() {
        let points = GroupKey::untextured(PrimitiveKind::Point, RenderState::default());
        let lines_no_depth = GroupKey::untextured(PrimitiveKind::Line, RenderState::empty());
        let lines_depth = GroupKey::untextured(PrimitiveKind::Line, RenderState::DEPTH_TEST);
        let glyphs = GroupKey::glyph(RenderState::default(), GlyphTextureId(0));

        let mut keys = vec![glyphs, lines_depth, points, lines_no_depth];
        keys.sort();
        assert_eq!(keys, vec![points, lines_no_depth, lines_depth, glyphs]);
    }

    #[test]
    fn test_glyph_texture_orders_within_kind() {
        let a = GroupKey::glyph(RenderState::default(), GlyphTextureId(1));
        let b = GroupKey::glyph(RenderState::default(), GlyphTextureId(2));
        assert!(a < b);
    }
}
