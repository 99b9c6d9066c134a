//! Colors shared by every renderer variant.

use crate::types::PieceKind;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Normalized RGBA, as shader uniforms take it.
    pub fn to_unit(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }

    /// Inverse of [`to_unit`](Self::to_unit); alpha is ignored.
    pub fn from_unit(rgba: [f32; 4]) -> Self {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(channel(rgba[0]), channel(rgba[1]), channel(rgba[2]))
    }

    /// Blend toward `other` by `t` in `0.0..=1.0`.
    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(
            lerp(self.r, other.r),
            lerp(self.g, other.g),
            lerp(self.b, other.b),
        )
    }
}

/// Frame background outside the board.
pub const BACKGROUND: Rgb = Rgb::new(0, 0, 0);

/// Empty board cells.
pub const WELL: Rgb = Rgb::new(30, 30, 40);

pub fn color_for(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

/// Landing preview color: the piece color faded into the well.
pub fn ghost_color(kind: PieceKind) -> Rgb {
    color_for(kind).mix(WELL, 0.7)
}
