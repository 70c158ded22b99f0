//! Headless debug-draw demo
//!
//! Drives the debug-draw core against a backend that logs every draw
//! call instead of touching a GPU. Renders a ground grid, an axis
//! triad, a handful of timed shapes, and a text overlay across a few
//! simulated frames, so the batching and lifetime behavior is visible
//! in the log output.

use debug_draw::prelude::*;
use debug_draw::{BackendResult, DrawVertex};

/// Backend that reports draw calls through the logger.
struct LogInterface {
    next_texture: u64,
}

impl LogInterface {
    fn new() -> Self {
        Self { next_texture: 1 }
    }
}

impl RenderInterface for LogInterface {
    fn draw_point_list(&mut self, vertices: &[DrawVertex], depth_enabled: bool) -> BackendResult<()> {
        log::info!(
            "draw_point_list: {} points, depth={depth_enabled}",
            vertices.len()
        );
        Ok(())
    }

    fn draw_line_list(&mut self, vertices: &[DrawVertex], depth_enabled: bool) -> BackendResult<()> {
        log::info!(
            "draw_line_list: {} segments, depth={depth_enabled}",
            vertices.len() / 2
        );
        Ok(())
    }

    fn draw_glyph_list(
        &mut self,
        vertices: &[DrawVertex],
        texture: GlyphTextureId,
    ) -> BackendResult<()> {
        log::info!(
            "draw_glyph_list: {} quads from {texture:?}",
            vertices.len() / 6
        );
        Ok(())
    }

    fn create_glyph_texture(
        &mut self,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> BackendResult<GlyphTextureId> {
        let id = GlyphTextureId(self.next_texture);
        self.next_texture += 1;
        log::info!(
            "create_glyph_texture: {width}x{height} ({} bytes) -> {id:?}",
            pixels.len()
        );
        Ok(id)
    }

    fn destroy_glyph_texture(&mut self, texture: GlyphTextureId) -> BackendResult<()> {
        log::info!("destroy_glyph_texture: {texture:?}");
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut draw = DebugDraw::new();
    draw.initialize(Box::new(LogInterface::new()))?;

    // A blank 8x16-cell ASCII atlas; a real application would upload
    // rasterized glyph coverage here.
    let metrics = FontMetrics::from_grid_atlas(128, 192, 8, 16, ' ', 95)?;
    let atlas = vec![0u8; 128 * 192];
    let font = draw.register_font(metrics, 128, 192, &atlas)?;

    // Persistent scene furniture: drawn every frame until cleared.
    draw.draw_xz_square_grid(-10.0, 10.0, 0.0, 1.0, colors::GRAY, Lifetime::Persistent, true)?;
    draw.draw_axis_triad(&Mat4::identity(), 0.15, 1.5, Lifetime::Persistent, true)?;

    let frame_ms = 16u64;
    for frame in 0..8u64 {
        let now = frame * frame_ms;

        // Per-frame annotations, rebuilt each iteration.
        let x = frame as f32 * 0.5;
        draw.draw_sphere(Vec3::new(x, 1.0, 0.0), colors::CYAN, 0.5, Lifetime::Frame, true)?;
        draw.draw_point(Vec3::new(x, 2.0, 0.0), colors::YELLOW, 8.0, Lifetime::Frame, true)?;
        draw.draw_text(
            &format!("frame {frame}"),
            Vec3::new(8.0, 8.0, 0.0),
            colors::WHITE,
            1.0,
            font,
            Lifetime::Frame,
            false,
        )?;

        // A marker that outlives its submission frame by ~3 frames.
        if frame == 2 {
            draw.draw_box(
                Vec3::new(0.0, 0.5, 2.0),
                Vec3::new(0.5, 0.5, 0.5),
                colors::MAGENTA,
                Lifetime::Millis(3 * frame_ms),
                true,
            )?;
        }

        let stats = draw.flush(now)?;
        log::info!(
            "frame {frame} ({now}ms): {} draw calls, {} vertices",
            stats.draw_calls,
            stats.vertices
        );
    }

    draw.shutdown()?;
    Ok(())
}
