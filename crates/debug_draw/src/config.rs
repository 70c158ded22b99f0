//! Configuration for the debug-draw core
//!
//! Tessellation detail and dispatch limits are configuration, not
//! per-call parameters: shape output sizes stay deterministic for a
//! given configuration, which is what makes golden-output tests
//! possible. Supports TOML files for tooling that wants to tweak
//! detail levels without recompiling.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::context::{DrawError, DrawResult};

/// Tuning knobs for tessellation detail and draw-call dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawConfig {
    /// Latitude/longitude ring subdivisions per wireframe sphere.
    /// Output segment count is a pure function of this value.
    pub sphere_subdivisions: u32,

    /// Sample points around cone base circles (also used by arrow heads).
    pub cone_segments: u32,

    /// Upper bound on vertices per backend draw call, if the backend
    /// has one. Groups larger than this are chunked at primitive
    /// boundaries; `None` forwards every group as a single call.
    pub max_draw_vertices: Option<usize>,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            sphere_subdivisions: 12,
            cone_segments: 16,
            max_draw_vertices: None,
        }
    }
}

impl DrawConfig {
    /// Validate configuration values.
    ///
    /// Subdivision counts below 3 cannot form closed polylines, and a
    /// draw-call cap below 6 could not hold a single glyph quad.
    pub fn validate(&self) -> DrawResult<()> {
        if self.sphere_subdivisions < 3 {
            return Err(DrawError::InvalidConfig(format!(
                "sphere_subdivisions must be at least 3, got {}",
                self.sphere_subdivisions
            )));
        }
        if self.cone_segments < 3 {
            return Err(DrawError::InvalidConfig(format!(
                "cone_segments must be at least 3, got {}",
                self.cone_segments
            )));
        }
        if let Some(max) = self.max_draw_vertices {
            if max < 6 {
                return Err(DrawError::InvalidConfig(format!(
                    "max_draw_vertices must be at least 6, got {max}"
                )));
            }
        }
        Ok(())
    }

    /// Load and validate a configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> DrawResult<Self> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            DrawError::InvalidConfig(format!(
                "failed to read {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_toml(&text)
    }

    /// Parse and validate a configuration from TOML text.
    pub fn from_toml(text: &str) -> DrawResult<Self> {
        let config: Self = toml::from_str(text)
            .map_err(|e| DrawError::InvalidConfig(format!("invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}
