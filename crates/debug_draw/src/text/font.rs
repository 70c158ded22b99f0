//! Font metrics tables
//!
//! A [`FontMetrics`] table describes where each character lives in a
//! glyph atlas texture and how far the pen advances past it. The table
//! is supplied once when the atlas is registered; the core performs no
//! rasterization of its own.

use std::collections::HashMap;

use crate::context::{DrawError, DrawResult};
use crate::foundation::math::Vec2;

/// Placement and advance data for a single glyph in the atlas.
#[derive(Debug, Clone, Copy)]
pub struct GlyphMetrics {
    /// Top-left atlas UV, normalized to `[0, 1]`.
    pub uv_min: Vec2,
    /// Bottom-right atlas UV, normalized to `[0, 1]`.
    pub uv_max: Vec2,
    /// Glyph quad size in pixels.
    pub size: Vec2,
    /// Horizontal pen advance past this glyph, in pixels.
    pub advance: f32,
}

/// Per-font glyph lookup table.
///
/// Characters without an entry produce no quad and do not advance the
/// pen; see [`layout_text`](super::layout_text) for the layout rules.
#[derive(Debug, Clone)]
pub struct FontMetrics {
    glyphs: HashMap<char, GlyphMetrics>,
    line_height: f32,
}

impl FontMetrics {
    /// Create an empty table with the given baseline-to-baseline
    /// line height in pixels.
    pub fn new(line_height: f32) -> Self {
        Self {
            glyphs: HashMap::new(),
            line_height,
        }
    }

    /// Insert or replace the metrics for one character.
    pub fn insert(&mut self, ch: char, metrics: GlyphMetrics) {
        self.glyphs.insert(ch, metrics);
    }

    /// Look up the metrics for one character.
    pub fn glyph(&self, ch: char) -> Option<&GlyphMetrics> {
        self.glyphs.get(&ch)
    }

    /// Baseline-to-baseline line height in pixels.
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Number of characters in the table.
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Build a table for an atlas laid out as a uniform character grid.
    ///
    /// Characters starting at `first_char` fill the grid row-major,
    /// `columns` cells per row, each cell `cell_width` by `cell_height`
    /// pixels in an atlas of `atlas_width` by `atlas_height`. Every
    /// glyph advances by its full cell width. This matches the simple
    /// bitmap fonts debug overlays usually ship with.
    ///
    /// Reports [`DrawError::InvalidConfig`] when the cells are empty or
    /// `count` cells do not fit in the atlas, so every table produced
    /// here has UVs inside `[0, 1]`.
    pub fn from_grid_atlas(
        atlas_width: u32,
        atlas_height: u32,
        cell_width: u32,
        cell_height: u32,
        first_char: char,
        count: u32,
    ) -> DrawResult<Self> {
        if cell_width == 0 || cell_height == 0 {
            return Err(DrawError::InvalidConfig(format!(
                "glyph cells must be non-empty, got {cell_width}x{cell_height}"
            )));
        }
        let columns = atlas_width / cell_width;
        let rows = atlas_height / cell_height;
        if count > columns * rows {
            return Err(DrawError::InvalidConfig(format!(
                "{count} glyphs do not fit in a {atlas_width}x{atlas_height} atlas \
                 of {cell_width}x{cell_height} cells ({} cells)",
                columns * rows
            )));
        }

        let mut font = Self::new(cell_height as f32);
        let first = first_char as u32;
        for i in 0..count {
            let Some(ch) = char::from_u32(first + i) else {
                continue;
            };
            let col = i % columns;
            let row = i / columns;
            let u0 = (col * cell_width) as f32 / atlas_width as f32;
            let v0 = (row * cell_height) as f32 / atlas_height as f32;
            let u1 = ((col + 1) * cell_width) as f32 / atlas_width as f32;
            let v1 = ((row + 1) * cell_height) as f32 / atlas_height as f32;
            font.insert(
                ch,
                GlyphMetrics {
                    uv_min: Vec2::new(u0, v0),
                    uv_max: Vec2::new(u1, v1),
                    size: Vec2::new(cell_width as f32, cell_height as f32),
                    advance: cell_width as f32,
                },
            );
        }
        Ok(font)
    }
}
