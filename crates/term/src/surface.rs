//! [`Surface2d`] over a shared terminal framebuffer.
//!
//! One surface pixel is two columns by one row, which keeps board cells
//! roughly square on typical terminal fonts. The rightmost `reserved` columns
//! are left to the HUD.

use std::cell::RefCell;
use std::rc::Rc;

use crate::fb::{CellStyle, FrameBuffer};
use crate::render::{Rect, Rgb, Surface2d};

pub type SharedFrame = Rc<RefCell<FrameBuffer>>;

pub fn shared_frame(width: u16, height: u16) -> SharedFrame {
    Rc::new(RefCell::new(FrameBuffer::new(width, height)))
}

/// Terminal columns per surface pixel.
pub const COLUMNS_PER_PIXEL: u16 = 2;

#[derive(Debug, Clone)]
pub struct FrameSurface {
    frame: SharedFrame,
    reserved: u16,
}

impl FrameSurface {
    pub fn new(frame: SharedFrame, reserved: u16) -> Self {
        Self { frame, reserved }
    }

    pub fn frame(&self) -> &SharedFrame {
        &self.frame
    }

    /// Columns available to the board.
    pub fn columns(&self) -> u16 {
        self.frame.borrow().width().saturating_sub(self.reserved)
    }
}

impl Surface2d for FrameSurface {
    fn size(&self) -> (u32, u32) {
        let height = self.frame.borrow().height();
        ((self.columns() / COLUMNS_PER_PIXEL) as u32, height as u32)
    }

    fn clear(&mut self, color: Rgb) {
        let columns = self.columns();
        let mut fb = self.frame.borrow_mut();
        let height = fb.height();
        fb.fill_rect(0, 0, columns, height, ' ', CellStyle::plain(color, color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let (w, h) = self.size();
        let x_end = rect.x.saturating_add(rect.w).min(w);
        let y_end = rect.y.saturating_add(rect.h).min(h);
        if rect.x >= x_end || rect.y >= y_end {
            return;
        }
        let style = CellStyle::plain(color, color);
        let mut fb = self.frame.borrow_mut();
        fb.fill_rect(
            rect.x as u16 * COLUMNS_PER_PIXEL,
            rect.y as u16,
            (x_end - rect.x) as u16 * COLUMNS_PER_PIXEL,
            (y_end - rect.y) as u16,
            ' ',
            style,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_are_two_columns_wide() {
        let frame = shared_frame(30, 10);
        let mut surface = FrameSurface::new(frame.clone(), 10);
        assert_eq!(surface.size(), (10, 10));

        let red = Rgb::new(255, 0, 0);
        surface.fill_rect(Rect::new(1, 2, 1, 1), red);
        let fb = frame.borrow();
        assert_eq!(fb.get(2, 2).map(|c| c.style.bg), Some(red));
        assert_eq!(fb.get(3, 2).map(|c| c.style.bg), Some(red));
        assert_ne!(fb.get(4, 2).map(|c| c.style.bg), Some(red));
    }

    #[test]
    fn clear_leaves_reserved_columns() {
        let frame = shared_frame(6, 1);
        frame.borrow_mut().put_str(4, 0, "ab", CellStyle::default());
        let mut surface = FrameSurface::new(frame.clone(), 2);
        surface.clear(Rgb::new(1, 2, 3));
        assert_eq!(frame.borrow().row_text(0), "    ab");
    }
}
