//! Screen-anchored debug text
//!
//! Font metrics tables and the glyph layouter that turns strings into
//! atlas-referencing quad vertices.

pub mod font;
pub mod layout;

pub use font::{FontMetrics, GlyphMetrics};
pub use layout::layout_text;
