//! # Debug Draw
//!
//! An immediate-mode debug-visualization core for real-time
//! applications: issue ephemeral points, lines, wireframe shapes, and
//! screen-anchored text from anywhere in a frame, and flush them once
//! per frame as a minimal set of state-coherent batches through a
//! backend-supplied rendering contract. The core manages no GPU
//! resources of its own.
//!
//! ## Architecture
//!
//! - **Tessellation**: pure shape-to-segments functions ([`tessellation`])
//! - **Text**: font metrics tables and the glyph layouter ([`text`])
//! - **Store**: per-(kind, state, texture) vertex accumulation
//! - **Lifetimes**: per-submission expiry with a caller-supplied clock
//! - **Dispatch**: fixed-order, chunk-aware batch draining
//! - **Backend contract**: the five-operation [`RenderInterface`] trait
//!
//! ## Quick Start
//!
//! ```no_run
//! use debug_draw::{DebugDraw, Lifetime};
//! use debug_draw::foundation::math::{colors, Vec3};
//!
//! # fn my_backend() -> Box<dyn debug_draw::RenderInterface> { unimplemented!() }
//! let mut draw = DebugDraw::new();
//! draw.initialize(my_backend())?;
//!
//! // Game code, anywhere in the frame:
//! draw.draw_xz_square_grid(-10.0, 10.0, 0.0, 1.0, colors::GRAY, Lifetime::Frame, true)?;
//! draw.draw_sphere(Vec3::new(0.0, 1.0, 0.0), colors::CYAN, 1.0, Lifetime::Millis(500), true)?;
//!
//! // Render code, once per frame:
//! # let frame_time_ms = 0u64;
//! draw.flush(frame_time_ms)?;
//! # Ok::<(), debug_draw::DrawError>(())
//! ```
//!
//! ## Threading
//!
//! The core is single-threaded: one logical accumulation stream per
//! frame. Callers submitting and flushing from different threads must
//! serialize access externally; the core performs no locking.

pub mod backend;
pub mod config;
pub mod foundation;
pub mod tessellation;
pub mod text;
pub mod vertex;

mod context;
mod dispatch;
mod lifetime;
mod store;


pub use backend::{BackendError, BackendResult, GlyphTextureId, RenderInterface};
pub use config::DrawConfig;
pub use context::{DebugDraw, DrawError, DrawResult, FontHandle};
pub use dispatch::FlushStats;
pub use lifetime::Lifetime;
pub use vertex::{DrawVertex, GroupKey, PrimitiveKind, RenderState, VERTEX_LAYOUT_VERSION};

/// Common imports for embedding applications
pub mod prelude {
    pub use crate::backend::{GlyphTextureId, RenderInterface};
    pub use crate::foundation::math::{colors, Color, Mat4, Vec2, Vec3};
    pub use crate::text::{FontMetrics, GlyphMetrics};
    pub use crate::{DebugDraw, DrawConfig, DrawError, DrawResult, FlushStats, Lifetime};
}
