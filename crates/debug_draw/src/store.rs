//! Primitive store
//!
//! Accumulates submitted vertices into per-key groups, the single
//! source of truth for what must be drawn. Groups live in a `BTreeMap`
//! keyed by [`GroupKey`], whose ordering is exactly the dispatch order
//! (kind, then render state, then glyph texture), so the dispatcher
//! just walks the map. Vertex and entry vectors keep their allocations
//! across clears and prunes; steady-state frames reuse buffers instead
//! of reallocating them.

use std::collections::BTreeMap;

use crate::lifetime::{Lifetime, TimedEntry};
use crate::vertex::{DrawVertex, GroupKey};

/// Ordered vertices sharing one batching key, with the timed entries
/// tracking which submission produced which range.
#[derive(Debug, Default)]
pub(crate) struct PrimitiveGroup {
    pub vertices: Vec<DrawVertex>,
    pub entries: Vec<TimedEntry>,
}

impl PrimitiveGroup {
    fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Drop expired entries and compact the surviving vertex ranges
    /// down in place, preserving submission order. Returns the number
    /// of vertices removed.
    fn prune(&mut self, now_ms: u64, inclusive: bool) -> usize {
        if self.entries.iter().all(|e| !e.expired(now_ms, inclusive)) {
            return 0;
        }
        let before = self.vertices.len();
        let mut write = 0usize;
        let mut kept = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            if entry.expired(now_ms, inclusive) {
                continue;
            }
            let len = entry.end - entry.start;
            self.vertices.copy_within(entry.start..entry.end, write);
            kept.push(TimedEntry {
                start: write,
                end: write + len,
                expiry: entry.expiry,
            });
            write += len;
        }
        self.vertices.truncate(write);
        self.entries = kept;
        before - write
    }
}

/// Append-only per-frame mapping from batching key to vertex run.
#[derive(Debug, Default)]
pub(crate) struct PrimitiveStore {
    groups: BTreeMap<GroupKey, PrimitiveGroup>,
}

impl PrimitiveStore {
    /// Append vertices under `key`, merging into the existing group for
    /// that key if one exists. Amortized O(1) per vertex.
    pub fn submit(&mut self, key: GroupKey, lifetime: Lifetime, vertices: &[DrawVertex]) {
        if vertices.is_empty() {
            return;
        }
        let group = self.groups.entry(key).or_default();
        let start = group.vertices.len();
        group.vertices.extend_from_slice(vertices);
        group
            .entries
            .push(TimedEntry::new(start, group.vertices.len(), lifetime));
    }

    /// Empty every group unconditionally, keeping buffer allocations.
    pub fn clear(&mut self) {
        for group in self.groups.values_mut() {
            group.vertices.clear();
            group.entries.clear();
        }
    }

    /// Drop any glyph groups routed to `texture`; used when a font is
    /// destroyed with vertices still queued against its atlas.
    pub fn remove_texture(&mut self, texture: crate::backend::GlyphTextureId) -> usize {
        let mut removed = 0;
        self.groups.retain(|key, group| {
            if key.texture == Some(texture) {
                removed += group.vertices.len();
                false
            } else {
                true
            }
        });
        removed
    }

    /// Pin all pending lifetimes to the current flush clock.
    pub fn resolve_pending(&mut self, now_ms: u64) {
        for group in self.groups.values_mut() {
            for entry in &mut group.entries {
                entry.resolve(now_ms);
            }
        }
    }

    /// Remove entries that expired strictly before `now_ms`. Runs ahead
    /// of dispatch so primitives that lapsed between flushes are never
    /// drawn again.
    pub fn prune_before(&mut self, now_ms: u64) -> usize {
        self.groups
            .values_mut()
            .map(|g| g.prune(now_ms, false))
            .sum()
    }

    /// Remove entries whose expiry has been reached, boundary included.
    /// Runs after dispatch, so an entry expiring exactly now gets its
    /// final draw first.
    pub fn prune_through(&mut self, now_ms: u64) -> usize {
        self.groups
            .values_mut()
            .map(|g| g.prune(now_ms, true))
            .sum()
    }

    /// Non-empty groups in dispatch order.
    pub fn groups(&self) -> impl Iterator<Item = (&GroupKey, &PrimitiveGroup)> {
        self.groups.iter().filter(|(_, g)| !g.is_empty())
    }

    /// Total queued vertices across all groups.
    pub fn vertex_count(&self) -> usize {
        self.groups.values().map(|g| g.vertices.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{colors::WHITE, Vec3};
    use crate::vertex::{PrimitiveKind, RenderState};

    fn line_pair(x: f32) -> [DrawVertex; 2] {
        [
            DrawVertex::line(Vec3::new(x, 0.0, 0.0), WHITE),
            DrawVertex::line(Vec3::new(x, 1.0, 0.0), WHITE),
        ]
    }

    fn line_key() -> GroupKey {
        GroupKey::untextured(PrimitiveKind::Line, RenderState::default())
    }

    #[test]
    fn test_same_key_merges_into_one_group() {
        let mut store = PrimitiveStore::default();
        store.submit(line_key(), Lifetime::Frame, &line_pair(0.0));
        store.submit(line_key(), Lifetime::Frame, &line_pair(1.0));

        let groups: Vec<_> = store.groups().collect();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].1.vertices.len(), 4);
        // Submission order preserved within the group.
        assert_eq!(groups[0].1.vertices[0].position[0], 0.0);
        assert_eq!(groups[0].1.vertices[2].position[0], 1.0);
    }

    #[test]
    fn test_distinct_states_get_distinct_groups() {
        let mut store = PrimitiveStore::default();
        store.submit(line_key(), Lifetime::Frame, &line_pair(0.0));
        store.submit(
            GroupKey::untextured(PrimitiveKind::Line, RenderState::empty()),
            Lifetime::Frame,
            &line_pair(1.0),
        );
        assert_eq!(store.groups().count(), 2);
    }

    #[test]
    fn test_empty_submission_creates_nothing() {
        let mut store = PrimitiveStore::default();
        store.submit(line_key(), Lifetime::Frame, &[]);
        assert_eq!(store.groups().count(), 0);
    }

    #[test]
    fn test_prune_compacts_surviving_ranges() {
        let mut store = PrimitiveStore::default();
        store.submit(line_key(), Lifetime::Frame, &line_pair(0.0));
        store.submit(line_key(), Lifetime::Persistent, &line_pair(1.0));
        store.submit(line_key(), Lifetime::Frame, &line_pair(2.0));

        store.resolve_pending(100);
        let removed = store.prune_through(100);
        assert_eq!(removed, 4);

        let groups: Vec<_> = store.groups().collect();
        assert_eq!(groups[0].1.vertices.len(), 2);
        assert_eq!(groups[0].1.vertices[0].position[0], 1.0);
        assert_eq!(groups[0].1.entries.len(), 1);
        assert_eq!(groups[0].1.entries[0].start, 0);
        assert_eq!(groups[0].1.entries[0].end, 2);
    }

    #[test]
    fn test_clear_keeps_allocations() {
        let mut store = PrimitiveStore::default();
        store.submit(line_key(), Lifetime::Frame, &line_pair(0.0));
        let capacity = store.groups.get(&line_key()).unwrap().vertices.capacity();
        store.clear();
        assert_eq!(store.vertex_count(), 0);
        assert_eq!(store.groups().count(), 0);
        assert_eq!(
            store.groups.get(&line_key()).unwrap().vertices.capacity(),
            capacity
        );
    }

    #[test]
    fn test_remove_texture_drops_glyph_group() {
        use crate::backend::GlyphTextureId;
        let mut store = PrimitiveStore::default();
        let glyph_key = GroupKey::glyph(RenderState::default(), GlyphTextureId(7));
        store.submit(glyph_key, Lifetime::Frame, &line_pair(0.0));
        store.submit(line_key(), Lifetime::Frame, &line_pair(1.0));

        assert_eq!(store.remove_texture(GlyphTextureId(7)), 2);
        assert_eq!(store.groups().count(), 1);
    }
}
