//! Immediate-mode 2D surface renderer.
//!
//! Clears the frame, paints the well, then one filled rectangle per locked
//! cell, ghost cell and active-piece cell.

use tracing::debug;

use crate::core::{GameSnapshot, RenderError, Renderer, Viewport};
use crate::layout::{BoardLayout, Rect};
use crate::palette::{color_for, ghost_color, Rgb, BACKGROUND, WELL};

/// A host-supplied 2D drawing target.
pub trait Surface2d {
    /// Drawable size in pixels.
    fn size(&self) -> (u32, u32);

    /// Fill the whole surface.
    fn clear(&mut self, color: Rgb);

    /// Fill `rect`, clipped to the surface.
    fn fill_rect(&mut self, rect: Rect, color: Rgb);
}

impl<T: Surface2d + ?Sized> Surface2d for &mut T {
    fn size(&self) -> (u32, u32) {
        (**self).size()
    }

    fn clear(&mut self, color: Rgb) {
        (**self).clear(color)
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        (**self).fill_rect(rect, color)
    }
}

pub struct SurfaceRenderer<T: Surface2d> {
    surface: T,
}

impl<T: Surface2d> SurfaceRenderer<T> {
    pub fn new(surface: T) -> Self {
        Self { surface }
    }

    /// Wrap the host's 2D context, failing if it has none.
    pub fn from_context(context: Option<T>) -> Result<Self, RenderError> {
        context
            .map(Self::new)
            .ok_or(RenderError::ContextUnavailable("2d surface"))
    }

    pub fn surface(&self) -> &T {
        &self.surface
    }
}

/// The viewport, or the surface size when the host passed an empty one.
pub(crate) fn effective_viewport(viewport: Viewport, size: (u32, u32)) -> Viewport {
    if viewport.is_empty() {
        Viewport::new(size.0, size.1)
    } else {
        viewport
    }
}

impl<T: Surface2d> Renderer for SurfaceRenderer<T> {
    fn name(&self) -> &'static str {
        "surface"
    }

    fn render(&mut self, snapshot: &GameSnapshot, viewport: Viewport) -> Result<(), RenderError> {
        let viewport = effective_viewport(viewport, self.surface.size());
        let layout = BoardLayout::fit(viewport);

        self.surface.clear(BACKGROUND);
        self.surface.fill_rect(layout.well(), WELL);

        let mut painted = 0u32;
        for (x, y, kind) in snapshot.filled_cells() {
            if let Some(rect) = layout.cell_rect(x, y) {
                self.surface.fill_rect(rect, color_for(kind));
                painted += 1;
            }
        }

        if let Some(active) = snapshot.active {
            for &(x, y) in &active.ghost {
                if let Some(rect) = layout.cell_rect(x, y) {
                    self.surface.fill_rect(rect, ghost_color(active.kind));
                }
            }
            for &(x, y) in &active.cells {
                if let Some(rect) = layout.cell_rect(x, y) {
                    self.surface.fill_rect(rect, color_for(active.kind));
                    painted += 1;
                }
            }
        }

        debug!(painted, cell = layout.cell, "surface frame");
        Ok(())
    }
}
