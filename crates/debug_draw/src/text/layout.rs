//! Glyph layout
//!
//! Converts a string and an anchor position into glyph quad vertices
//! referencing atlas UV rectangles. No kerning and no wrapping; the
//! layout rules are deliberately minimal and fixed:
//!
//! - the pen starts at the anchor and advances right by each glyph's
//!   advance width;
//! - `'\n'` returns the pen to the anchor X and moves it down one line
//!   height (screen space is Y-down);
//! - characters absent from the font table are skipped and do **not**
//!   advance the pen.

use crate::foundation::math::{Color, Vec3};
use crate::text::font::FontMetrics;
use crate::vertex::DrawVertex;

/// Lay out `text` as glyph quads anchored at `anchor` (screen pixels;
/// `anchor.z` is carried through unchanged for backends that want it).
///
/// Each glyph produces six vertices, two counter-clockwise triangles in
/// left-to-right character order: (top-left, bottom-left, bottom-right)
/// then (top-left, bottom-right, top-right). `scale` multiplies glyph
/// sizes and advances uniformly.
pub fn layout_text(
    text: &str,
    anchor: Vec3,
    scale: f32,
    color: Color,
    font: &FontMetrics,
) -> Vec<DrawVertex> {
    let mut out = Vec::with_capacity(text.len() * 6);
    let mut pen_x = anchor.x;
    let mut pen_y = anchor.y;

    for ch in text.chars() {
        if ch == '\n' {
            pen_x = anchor.x;
            pen_y += font.line_height() * scale;
            continue;
        }
        let Some(glyph) = font.glyph(ch) else {
            continue;
        };

        let x0 = pen_x;
        let y0 = pen_y;
        let x1 = pen_x + glyph.size.x * scale;
        let y1 = pen_y + glyph.size.y * scale;
        let (u0, v0) = (glyph.uv_min.x, glyph.uv_min.y);
        let (u1, v1) = (glyph.uv_max.x, glyph.uv_max.y);

        let tl = DrawVertex::glyph(Vec3::new(x0, y0, anchor.z), color, [u0, v0]);
        let bl = DrawVertex::glyph(Vec3::new(x0, y1, anchor.z), color, [u0, v1]);
        let br = DrawVertex::glyph(Vec3::new(x1, y1, anchor.z), color, [u1, v1]);
        let tr = DrawVertex::glyph(Vec3::new(x1, y0, anchor.z), color, [u1, v0]);

        out.extend_from_slice(&[tl, bl, br, tl, br, tr]);
        pen_x += glyph.advance * scale;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::colors::WHITE;
    use approx::assert_relative_eq;

    fn test_font() -> FontMetrics {
        FontMetrics::from_grid_atlas(128, 96, 8, 16, ' ', 95).unwrap()
    }

    #[test]
    fn test_quad_count_and_order() {
        let verts = layout_text("Hi", Vec3::zeros(), 1.0, WHITE, &test_font());
        assert_eq!(verts.len(), 12);
        // Second glyph starts one advance to the right of the first.
        assert_relative_eq!(verts[0].position[0], 0.0);
        assert_relative_eq!(verts[6].position[0], 8.0);
    }

    #[test]
    fn test_newline_returns_to_anchor_x() {
        let anchor = Vec3::new(10.0, 20.0, 0.0);
        let verts = layout_text("a\nb", anchor, 1.0, WHITE, &test_font());
        assert_eq!(verts.len(), 12);
        // 'b' sits at the anchor X, one line height down.
        assert_relative_eq!(verts[6].position[0], 10.0);
        assert_relative_eq!(verts[6].position[1], 36.0);
    }

    #[test]
    fn test_unknown_chars_do_not_advance() {
        let font = test_font();
        let with_unknown = layout_text("a\u{263a}b", Vec3::zeros(), 1.0, WHITE, &font);
        let without = layout_text("ab", Vec3::zeros(), 1.0, WHITE, &font);
        assert_eq!(with_unknown, without);
    }

    #[test]
    fn test_scale_multiplies_advance_and_size() {
        let verts = layout_text("aa", Vec3::zeros(), 2.0, WHITE, &test_font());
        assert_relative_eq!(verts[6].position[0], 16.0);
        // Quad height of the first glyph.
        assert_relative_eq!(verts[1].position[1], 32.0);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let font = test_font();
        let a = layout_text("Hello, world", Vec3::new(5.0, 5.0, 0.0), 1.0, WHITE, &font);
        let b = layout_text("Hello, world", Vec3::new(5.0, 5.0, 0.0), 1.0, WHITE, &font);
        assert_eq!(a, b);
    }
}
