//! Flush dispatch
//!
//! Drains the primitive store into the minimum number of backend draw
//! calls. Groups are visited in the store's key order (points, then
//! lines, then glyphs, sub-ordered by render state and glyph texture)
//! and each non-empty group becomes exactly one backend call, unless a
//! per-call vertex cap is configured, in which case the group is
//! chunked at primitive boundaries with vertex order preserved.

use crate::backend::RenderInterface;
use crate::context::DrawResult;
use crate::store::PrimitiveStore;
use crate::vertex::{DrawVertex, PrimitiveKind};

/// Counters describing one flush.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushStats {
    /// Backend draw calls issued.
    pub draw_calls: usize,
    /// Vertices submitted across all calls.
    pub vertices: usize,
    /// Non-empty groups drained.
    pub groups: usize,
}

/// Issues the draw calls for one flush.
pub(crate) struct FlushDispatcher<'a> {
    backend: &'a mut dyn RenderInterface,
    max_draw_vertices: Option<usize>,
}

impl<'a> FlushDispatcher<'a> {
    pub fn new(backend: &'a mut dyn RenderInterface, max_draw_vertices: Option<usize>) -> Self {
        Self {
            backend,
            max_draw_vertices,
        }
    }

    /// Draw everything currently in the store.
    pub fn dispatch(&mut self, store: &PrimitiveStore) -> DrawResult<FlushStats> {
        let mut stats = FlushStats::default();
        for (key, group) in store.groups() {
            stats.groups += 1;
            for chunk in chunks(&group.vertices, key.kind, self.max_draw_vertices) {
                match key.kind {
                    PrimitiveKind::Point => self
                        .backend
                        .draw_point_list(chunk, key.state.depth_enabled())?,
                    PrimitiveKind::Line => self
                        .backend
                        .draw_line_list(chunk, key.state.depth_enabled())?,
                    PrimitiveKind::Glyph => {
                        // The key always carries a texture for glyph groups;
                        // the submission path cannot construct one without it.
                        let texture = key.texture.ok_or_else(|| {
                            crate::context::DrawError::InvalidShape(
                                "glyph group without texture".to_string(),
                            )
                        })?;
                        self.backend.draw_glyph_list(chunk, texture)?
                    }
                }
                stats.draw_calls += 1;
                stats.vertices += chunk.len();
            }
        }
        Ok(stats)
    }
}

/// Split a group's vertex run at the configured cap, aligned down to
/// whole primitives so no chunk ever splits a segment or quad.
fn chunks(
    vertices: &[DrawVertex],
    kind: PrimitiveKind,
    max_draw_vertices: Option<usize>,
) -> impl Iterator<Item = &[DrawVertex]> {
    let chunk_len = match max_draw_vertices {
        Some(max) => {
            let per_primitive = kind.vertices_per_primitive();
            // Config validation keeps the cap at or above one glyph quad.
            (max / per_primitive).max(1) * per_primitive
        }
        None => vertices.len().max(1),
    };
    vertices.chunks(chunk_len)
}
