//! Renderer capability seam.
//!
//! A renderer only ever sees a [`GameSnapshot`] for the duration of one call.
//! Concrete variants live in `blockfall-render`.

use crate::error::RenderError;
use crate::snapshot::GameSnapshot;

/// Size of the presentation target, in its own pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

pub trait Renderer {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Draw one frame. Must not block longer than a frame.
    fn render(&mut self, snapshot: &GameSnapshot, viewport: Viewport) -> Result<(), RenderError>;
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn render(&mut self, snapshot: &GameSnapshot, viewport: Viewport) -> Result<(), RenderError> {
        (**self).render(snapshot, viewport)
    }
}
