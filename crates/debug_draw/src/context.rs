//! Debug-draw context
//!
//! [`DebugDraw`] is the embedding application's entry point: an explicit
//! context object (no process-wide singleton) that accumulates draw
//! requests from anywhere in a frame and flushes them as state-coherent
//! batches through a bound [`RenderInterface`].
//!
//! The context is single-threaded by design: producers and the flush
//! call must be serialized externally if they live on different
//! threads. No submission blocks, and the core never reads a wall
//! clock; the caller supplies the time on every flush.

use slotmap::SlotMap;
use thiserror::Error;

use crate::backend::{BackendError, GlyphTextureId, RenderInterface};
use crate::config::DrawConfig;
use crate::dispatch::{FlushDispatcher, FlushStats};
use crate::foundation::math::{Color, Mat4, Vec3};
use crate::lifetime::Lifetime;
use crate::store::PrimitiveStore;
use crate::tessellation;
use crate::text::{layout_text, FontMetrics};
use crate::vertex::{DrawVertex, GroupKey, PrimitiveKind, RenderState};

/// Result type for debug-draw operations
pub type DrawResult<T> = Result<T, DrawError>;

/// Errors reported by the debug-draw core
#[derive(Debug, Error)]
pub enum DrawError {
    /// A draw or flush call arrived before `initialize` (or after
    /// `shutdown`). Programmer error by contract; never triggered by
    /// correct embedding code.
    #[error("debug draw context is not initialized")]
    NotInitialized,

    /// `initialize` was called twice without an intervening `shutdown`.
    #[error("debug draw context is already initialized")]
    AlreadyInitialized,

    /// Shape parameters describe degenerate geometry (non-positive
    /// radius, inverted grid range, ...). The call queued nothing.
    #[error("invalid shape parameters: {0}")]
    InvalidShape(String),

    /// Configuration values are out of range or unparsable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A font handle that was never registered, or already destroyed.
    #[error("unknown or destroyed font handle")]
    UnknownFont,

    /// The bound backend rejected an operation.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

slotmap::new_key_type! {
    /// Generational handle to a registered font. Stale handles (after
    /// `destroy_font` or `shutdown`) are detected and reported rather
    /// than silently aliasing a newer font.
    pub struct FontHandle;
}

#[derive(Debug)]
struct FontEntry {
    texture: GlyphTextureId,
    metrics: FontMetrics,
}

/// Immediate-mode debug-draw context.
///
/// Accumulates points, lines, wireframe shapes, and screen-anchored
/// text; tracks per-submission lifetimes; and dispatches minimal
/// batched draw calls on [`flush`](Self::flush).
///
/// # Example
///
/// ```no_run
/// use debug_draw::{DebugDraw, Lifetime};
/// use debug_draw::foundation::math::{colors, Vec3};
///
/// # fn backend() -> Box<dyn debug_draw::RenderInterface> { unimplemented!() }
/// let mut draw = DebugDraw::new();
/// draw.initialize(backend())?;
///
/// // Anywhere in the frame:
/// draw.draw_line(
///     Vec3::zeros(),
///     Vec3::new(0.0, 1.0, 0.0),
///     colors::GREEN,
///     Lifetime::Frame,
///     true,
/// )?;
///
/// // Once per frame, render thread:
/// let stats = draw.flush(16)?;
/// log::debug!("debug pass: {} draw calls", stats.draw_calls);
/// # Ok::<(), debug_draw::DrawError>(())
/// ```
pub struct DebugDraw {
    backend: Option<Box<dyn RenderInterface>>,
    config: DrawConfig,
    store: PrimitiveStore,
    fonts: SlotMap<FontHandle, FontEntry>,

    /// Master toggle. While `false`, submissions validate their
    /// parameters and return before any tessellation happens; flush
    /// still drains previously queued work.
    pub enabled: bool,
}

impl Default for DebugDraw {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugDraw {
    /// Create a context with the default configuration. No backend is
    /// bound yet; call [`initialize`](Self::initialize) before drawing.
    pub fn new() -> Self {
        Self {
            backend: None,
            config: DrawConfig::default(),
            store: PrimitiveStore::default(),
            fonts: SlotMap::with_key(),
            enabled: true,
        }
    }

    /// Create a context with a validated configuration.
    pub fn with_config(config: DrawConfig) -> DrawResult<Self> {
        config.validate()?;
        let mut context = Self::new();
        context.config = config;
        Ok(context)
    }

    /// Bind the rendering backend. Fails with
    /// [`DrawError::AlreadyInitialized`] if a backend is already bound.
    pub fn initialize(&mut self, backend: Box<dyn RenderInterface>) -> DrawResult<()> {
        if self.backend.is_some() {
            return Err(DrawError::AlreadyInitialized);
        }
        self.backend = Some(backend);
        log::info!("debug draw context initialized");
        Ok(())
    }

    /// Release the backend: destroys every glyph texture this context
    /// created (exactly once per handle), clears all queued primitives,
    /// and drops the backend reference. Backend failures while
    /// destroying textures are logged and do not abort the teardown.
    pub fn shutdown(&mut self) -> DrawResult<()> {
        let mut backend = self.backend.take().ok_or(DrawError::NotInitialized)?;
        for (_, font) in self.fonts.drain() {
            if let Err(e) = backend.destroy_glyph_texture(font.texture) {
                log::warn!("failed to destroy glyph texture {:?}: {e}", font.texture);
            }
        }
        self.store.clear();
        log::info!("debug draw context shut down");
        Ok(())
    }

    /// Whether a backend is currently bound.
    pub fn is_initialized(&self) -> bool {
        self.backend.is_some()
    }

    /// The active configuration.
    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    /// Discard all queued primitives immediately and unconditionally,
    /// persistent entries included. Vertex buffers keep their
    /// allocations for reuse.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Number of vertices currently queued.
    pub fn queued_vertices(&self) -> usize {
        self.store.vertex_count()
    }

    // === Submission ===

    /// Queue a point sprite of `size` pixels.
    pub fn draw_point(
        &mut self,
        position: Vec3,
        color: Color,
        size: f32,
        lifetime: Lifetime,
        depth_enabled: bool,
    ) -> DrawResult<()> {
        self.ensure_initialized()?;
        if size <= 0.0 {
            return Err(DrawError::InvalidShape(format!(
                "point size must be positive, got {size}"
            )));
        }
        if !self.enabled {
            return Ok(());
        }
        self.store.submit(
            GroupKey::untextured(PrimitiveKind::Point, RenderState::with_depth(depth_enabled)),
            lifetime,
            &[DrawVertex::point(position, color, size)],
        );
        Ok(())
    }

    /// Queue a line segment.
    pub fn draw_line(
        &mut self,
        from: Vec3,
        to: Vec3,
        color: Color,
        lifetime: Lifetime,
        depth_enabled: bool,
    ) -> DrawResult<()> {
        self.ensure_initialized()?;
        if !self.enabled {
            return Ok(());
        }
        self.submit_lines(
            &[DrawVertex::line(from, color), DrawVertex::line(to, color)],
            lifetime,
            depth_enabled,
        );
        Ok(())
    }

    /// Queue the 12 edges of an axis-aligned box.
    pub fn draw_box(
        &mut self,
        center: Vec3,
        half_extents: Vec3,
        color: Color,
        lifetime: Lifetime,
        depth_enabled: bool,
    ) -> DrawResult<()> {
        self.ensure_initialized()?;
        tessellation::check_box(half_extents)?;
        if !self.enabled {
            return Ok(());
        }
        let vertices = tessellation::box_wireframe(center, half_extents, color)?;
        self.submit_lines(&vertices, lifetime, depth_enabled);
        Ok(())
    }

    /// Queue a wireframe sphere. Ring detail comes from the
    /// configuration, so output size is deterministic per context.
    pub fn draw_sphere(
        &mut self,
        center: Vec3,
        color: Color,
        radius: f32,
        lifetime: Lifetime,
        depth_enabled: bool,
    ) -> DrawResult<()> {
        self.ensure_initialized()?;
        tessellation::check_sphere(radius, self.config.sphere_subdivisions)?;
        if !self.enabled {
            return Ok(());
        }
        let vertices =
            tessellation::sphere(center, color, radius, self.config.sphere_subdivisions)?;
        self.submit_lines(&vertices, lifetime, depth_enabled);
        Ok(())
    }

    /// Queue a wireframe cone from `apex` along `direction`.
    pub fn draw_cone(
        &mut self,
        apex: Vec3,
        direction: Vec3,
        color: Color,
        length: f32,
        base_radius: f32,
        lifetime: Lifetime,
        depth_enabled: bool,
    ) -> DrawResult<()> {
        self.ensure_initialized()?;
        tessellation::check_cone(direction, length, base_radius, self.config.cone_segments)?;
        if !self.enabled {
            return Ok(());
        }
        let vertices = tessellation::cone(
            apex,
            direction,
            color,
            length,
            base_radius,
            self.config.cone_segments,
        )?;
        self.submit_lines(&vertices, lifetime, depth_enabled);
        Ok(())
    }

    /// Queue an arrow from `from` to `to` with a cone head.
    pub fn draw_arrow(
        &mut self,
        from: Vec3,
        to: Vec3,
        color: Color,
        head_size: f32,
        lifetime: Lifetime,
        depth_enabled: bool,
    ) -> DrawResult<()> {
        self.ensure_initialized()?;
        tessellation::check_arrow(from, to, head_size)?;
        if !self.enabled {
            return Ok(());
        }
        let vertices =
            tessellation::arrow(from, to, color, head_size, self.config.cone_segments)?;
        self.submit_lines(&vertices, lifetime, depth_enabled);
        Ok(())
    }

    /// Queue three axis-colored segments crossing at `center`.
    pub fn draw_cross(
        &mut self,
        center: Vec3,
        length: f32,
        lifetime: Lifetime,
        depth_enabled: bool,
    ) -> DrawResult<()> {
        self.ensure_initialized()?;
        tessellation::check_cross(length)?;
        if !self.enabled {
            return Ok(());
        }
        let vertices = tessellation::cross(center, length)?;
        self.submit_lines(&vertices, lifetime, depth_enabled);
        Ok(())
    }

    /// Queue an RGB axis triad under `transform`.
    pub fn draw_axis_triad(
        &mut self,
        transform: &Mat4,
        head_size: f32,
        length: f32,
        lifetime: Lifetime,
        depth_enabled: bool,
    ) -> DrawResult<()> {
        self.ensure_initialized()?;
        tessellation::check_axis_triad(head_size, length)?;
        if !self.enabled {
            return Ok(());
        }
        let vertices =
            tessellation::axis_triad(transform, head_size, length, self.config.cone_segments)?;
        self.submit_lines(&vertices, lifetime, depth_enabled);
        Ok(())
    }

    /// Queue a ground grid on the XZ plane.
    pub fn draw_xz_square_grid(
        &mut self,
        mins: f32,
        maxs: f32,
        y_level: f32,
        step: f32,
        color: Color,
        lifetime: Lifetime,
        depth_enabled: bool,
    ) -> DrawResult<()> {
        self.ensure_initialized()?;
        tessellation::check_xz_square_grid(mins, maxs, step)?;
        if !self.enabled {
            return Ok(());
        }
        let vertices = tessellation::xz_square_grid(mins, maxs, y_level, step, color)?;
        self.submit_lines(&vertices, lifetime, depth_enabled);
        Ok(())
    }

    /// Queue a wireframe view frustum from an inverse view-projection
    /// matrix.
    pub fn draw_frustum(
        &mut self,
        inv_clip: &Mat4,
        color: Color,
        lifetime: Lifetime,
        depth_enabled: bool,
    ) -> DrawResult<()> {
        self.ensure_initialized()?;
        if !self.enabled {
            return Ok(());
        }
        let vertices = tessellation::frustum(inv_clip, color)?;
        self.submit_lines(&vertices, lifetime, depth_enabled);
        Ok(())
    }

    // === Text ===

    /// Register a font: uploads its glyph atlas through the backend and
    /// stores the metrics table for layout. On backend failure nothing
    /// is registered and no glyph vertices can ever reference the
    /// failed atlas.
    pub fn register_font(
        &mut self,
        metrics: FontMetrics,
        atlas_width: u32,
        atlas_height: u32,
        pixels: &[u8],
    ) -> DrawResult<FontHandle> {
        let backend = self.backend.as_mut().ok_or(DrawError::NotInitialized)?;
        let texture = backend.create_glyph_texture(atlas_width, atlas_height, pixels)?;
        let handle = self.fonts.insert(FontEntry { texture, metrics });
        log::info!(
            "registered font with {} glyphs as {:?}",
            self.fonts[handle].metrics.glyph_count(),
            texture
        );
        Ok(handle)
    }

    /// Destroy a registered font: releases its atlas texture and drops
    /// any glyph vertices still queued against it. The handle becomes
    /// stale; reusing it reports [`DrawError::UnknownFont`].
    pub fn destroy_font(&mut self, font: FontHandle) -> DrawResult<()> {
        self.ensure_initialized()?;
        let entry = self.fonts.remove(font).ok_or(DrawError::UnknownFont)?;
        let dropped = self.store.remove_texture(entry.texture);
        if dropped > 0 {
            log::warn!("destroyed font with {dropped} glyph vertices still queued");
        }
        if let Some(backend) = self.backend.as_mut() {
            backend.destroy_glyph_texture(entry.texture)?;
        }
        Ok(())
    }

    /// Queue screen-anchored text. `anchor` is in screen pixels with
    /// Y down; `scale` multiplies the font's glyph sizes.
    pub fn draw_text(
        &mut self,
        text: &str,
        anchor: Vec3,
        color: Color,
        scale: f32,
        font: FontHandle,
        lifetime: Lifetime,
        depth_enabled: bool,
    ) -> DrawResult<()> {
        self.ensure_initialized()?;
        let entry = self.fonts.get(font).ok_or(DrawError::UnknownFont)?;
        if !self.enabled {
            return Ok(());
        }
        let vertices = layout_text(text, anchor, scale, color, &entry.metrics);
        self.store.submit(
            GroupKey::glyph(RenderState::with_depth(depth_enabled), entry.texture),
            lifetime,
            &vertices,
        );
        Ok(())
    }

    // === Flush ===

    /// Prune expired primitives and dispatch the rest as batched draw
    /// calls, in fixed kind/state/texture order.
    ///
    /// `current_time_ms` is the caller's frame clock; it is the only
    /// time source the core ever sees. Entries whose lifetime elapses
    /// exactly now are drawn one final time and then pruned; entries
    /// that lapsed between flushes are pruned without being drawn.
    pub fn flush(&mut self, current_time_ms: u64) -> DrawResult<FlushStats> {
        let backend = self.backend.as_mut().ok_or(DrawError::NotInitialized)?;

        self.store.resolve_pending(current_time_ms);
        let stale = self.store.prune_before(current_time_ms);
        if stale > 0 {
            log::debug!("pruned {stale} vertices that expired between flushes");
        }

        let stats =
            FlushDispatcher::new(backend.as_mut(), self.config.max_draw_vertices)
                .dispatch(&self.store)?;

        self.store.prune_through(current_time_ms);
        log::debug!(
            "flush at {current_time_ms}ms: {} calls, {} vertices, {} groups",
            stats.draw_calls,
            stats.vertices,
            stats.groups
        );
        Ok(stats)
    }

    // === Internals ===

    fn ensure_initialized(&self) -> DrawResult<()> {
        if self.backend.is_none() {
            return Err(DrawError::NotInitialized);
        }
        Ok(())
    }

    fn submit_lines(&mut self, vertices: &[DrawVertex], lifetime: Lifetime, depth_enabled: bool) {
        self.store.submit(
            GroupKey::untextured(PrimitiveKind::Line, RenderState::with_depth(depth_enabled)),
            lifetime,
            vertices,
        );
    }
}

impl Drop for DebugDraw {
    fn drop(&mut self) {
        // Contexts should be shut down explicitly; make sure glyph
        // textures are still released if one is dropped while bound.
        if self.backend.is_some() {
            log::warn!("debug draw context dropped while initialized; shutting down");
            let _ = self.shutdown();
        }
    }
}
