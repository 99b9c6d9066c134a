//! Board placement inside a viewport.
//!
//! Cells are square, `min(width / 10, height / 20)` pixels (at least 1), and
//! the board is centered.

use crate::core::Viewport;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && py >= self.y && px < self.x + self.w && py < self.y + self.h
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub cell: u32,
    pub origin_x: u32,
    pub origin_y: u32,
}

impl BoardLayout {
    pub fn fit(viewport: Viewport) -> Self {
        let cols = BOARD_WIDTH as u32;
        let rows = BOARD_HEIGHT as u32;
        let cell = (viewport.width / cols).min(viewport.height / rows).max(1);
        Self {
            cell,
            origin_x: viewport.width.saturating_sub(cell * cols) / 2,
            origin_y: viewport.height.saturating_sub(cell * rows) / 2,
        }
    }

    /// The whole board area.
    pub fn well(&self) -> Rect {
        Rect::new(
            self.origin_x,
            self.origin_y,
            self.cell * BOARD_WIDTH as u32,
            self.cell * BOARD_HEIGHT as u32,
        )
    }

    /// Pixel rectangle of board cell `(x, y)`, or `None` off the board.
    pub fn cell_rect(&self, x: i8, y: i8) -> Option<Rect> {
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some(Rect::new(
            self.origin_x + x as u32 * self.cell,
            self.origin_y + y as u32 * self.cell,
            self.cell,
            self.cell,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_and_centers() {
        let layout = BoardLayout::fit(Viewport::new(300, 400));
        assert_eq!(layout.cell, 20);
        assert_eq!((layout.origin_x, layout.origin_y), (50, 0));
        assert_eq!(layout.cell_rect(9, 19), Some(Rect::new(230, 380, 20, 20)));
        assert_eq!(layout.cell_rect(10, 0), None);
    }

    #[test]
    fn tiny_viewport_still_gets_one_pixel_cells() {
        let layout = BoardLayout::fit(Viewport::new(5, 5));
        assert_eq!(layout.cell, 1);
        assert_eq!(layout.well(), Rect::new(0, 0, 10, 20));
    }
}
