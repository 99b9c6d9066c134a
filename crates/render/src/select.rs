//! Renderer selection with fallback.
//!
//! The host names a variant in configuration. A rasterized renderer that
//! cannot be built is not fatal: selection logs it and falls back to the
//! surface renderer. Only when no surface exists either does the error reach
//! the caller.

use tracing::{info, warn};

use crate::core::{RenderError, Renderer};
use crate::gpu::GpuContext;
use crate::raster::RasterRenderer;
use crate::surface::{Surface2d, SurfaceRenderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RendererKind {
    #[default]
    Surface,
    Raster,
}

impl RendererKind {
    /// Parse a variant name. Accepts `surface`/`html`/`2d` and
    /// `raster`/`webgl`/`gl`, case-insensitive.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "surface" | "html" | "2d" => Some(RendererKind::Surface),
            "raster" | "webgl" | "gl" => Some(RendererKind::Raster),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RendererKind::Surface => "surface",
            RendererKind::Raster => "raster",
        }
    }
}

/// Build the renderer for `kind` from whatever targets the host has.
pub fn select_renderer<G, T>(
    kind: RendererKind,
    gpu: Option<G>,
    surface: Option<T>,
) -> Result<Box<dyn Renderer>, RenderError>
where
    G: GpuContext + 'static,
    T: Surface2d + 'static,
{
    if kind == RendererKind::Raster {
        let built = gpu
            .ok_or(RenderError::ContextUnavailable("accelerated context"))
            .and_then(RasterRenderer::new);
        match built {
            Ok(renderer) => {
                info!(renderer = "raster", "renderer selected");
                return Ok(Box::new(renderer));
            }
            Err(err) => warn!(%err, "raster renderer unavailable, falling back to surface"),
        }
    }

    let renderer = SurfaceRenderer::from_context(surface)?;
    info!(renderer = "surface", requested = kind.as_str(), "renderer selected");
    Ok(Box::new(renderer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases() {
        assert_eq!(RendererKind::from_str("WebGL"), Some(RendererKind::Raster));
        assert_eq!(RendererKind::from_str("html"), Some(RendererKind::Surface));
        assert_eq!(RendererKind::from_str(" 2d "), Some(RendererKind::Surface));
        assert_eq!(RendererKind::from_str("vulkan"), None);
    }
}
