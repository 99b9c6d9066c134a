//! In-memory RGB surface.

use crate::layout::Rect;
use crate::palette::Rgb;
use crate::surface::Surface2d;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Pixmap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::default(); (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y as usize) * (self.width as usize) + x as usize])
    }

    /// Number of pixels with exactly `color`.
    pub fn count(&self, color: Rgb) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }
}

impl Surface2d for Pixmap {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let x_end = rect.x.saturating_add(rect.w).min(self.width);
        let y_end = rect.y.saturating_add(rect.h).min(self.height);
        let width = self.width as usize;
        for y in rect.y.min(y_end)..y_end {
            let row = (y as usize) * width;
            self.pixels[row + rect.x.min(x_end) as usize..row + x_end as usize].fill(color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut pm = Pixmap::new(4, 4);
        let red = Rgb::new(255, 0, 0);
        pm.fill_rect(Rect::new(2, 2, 10, 10), red);
        assert_eq!(pm.count(red), 4);
        assert_eq!(pm.pixel(3, 3), Some(red));
        assert_eq!(pm.pixel(1, 1), Some(Rgb::default()));
        pm.fill_rect(Rect::new(9, 9, 1, 1), red);
        assert_eq!(pm.count(red), 4);
    }
}
