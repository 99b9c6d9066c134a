//! Shape catalog - the seven piece definitions and their rotation geometry
//!
//! Each shape is stored once, in its spawn (North) orientation, as a small
//! occupancy mask plus a rotation pivot. Rotated masks are computed on demand
//! and never written back into the catalog.
//!
//! Pivots are kept in doubled (half-cell) units so rotation is exact integer
//! arithmetic:
//! - both components odd: the pivot is the center of a cell
//! - both components even: the pivot is a grid intersection
//!
//! Either way every rotated cell center lands on a cell center. A mixed-parity
//! pivot would land on a cell edge; those coordinates are floored.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, Rotation};

/// Offset of a single cell relative to the piece origin, `(x, y)`.
pub type CellOffset = (i8, i8);

/// Occupied cells of a shape in one orientation.
pub type CellMask = ArrayVec<CellOffset, 4>;

/// Rotation center in doubled (half-cell) units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pivot {
    pub x2: i8,
    pub y2: i8,
}

impl Pivot {
    /// Pivot at the center of cell `(x, y)`.
    pub const fn cell_center(x: i8, y: i8) -> Self {
        Self {
            x2: 2 * x + 1,
            y2: 2 * y + 1,
        }
    }

    /// Pivot at the grid intersection `(x, y)`.
    pub const fn grid_point(x: i8, y: i8) -> Self {
        Self { x2: 2 * x, y2: 2 * y }
    }

    /// Pivot in cell units (may be fractional).
    pub fn as_f32(&self) -> (f32, f32) {
        (self.x2 as f32 / 2.0, self.y2 as f32 / 2.0)
    }
}

/// Immutable definition of one piece kind.
#[derive(Debug, PartialEq, Eq)]
pub struct Shape {
    pub kind: PieceKind,
    /// Occupancy rows, top to bottom, in spawn orientation.
    pub rows: &'static [&'static [u8]],
    pub pivot: Pivot,
}

impl Shape {
    /// Width of the unrotated mask, in cells.
    pub fn width(&self) -> u8 {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0) as u8
    }

    /// Height of the unrotated mask, in cells.
    pub fn height(&self) -> u8 {
        self.rows.len() as u8
    }

    /// Occupied cells in spawn orientation, row-major.
    pub fn cells(&self) -> CellMask {
        let mut mask = CellMask::new();
        for (y, row) in self.rows.iter().enumerate() {
            for (x, &filled) in row.iter().enumerate() {
                if filled != 0 {
                    mask.push((x as i8, y as i8));
                }
            }
        }
        mask
    }

    /// Mask for the given orientation (see [`rotate`]).
    pub fn mask(&self, orientation: Rotation) -> CellMask {
        rotate(self, orientation)
    }

    /// Column at which this shape spawns so that its mask is centered.
    pub fn spawn_column(&self, board_width: u8) -> i8 {
        ((board_width.saturating_sub(self.width())) / 2) as i8
    }
}

const O_ROWS: &[&[u8]] = &[&[1, 1], &[1, 1]];
const I_ROWS: &[&[u8]] = &[&[0, 0, 0, 0], &[1, 1, 1, 1]];
const Z_ROWS: &[&[u8]] = &[&[1, 1, 0], &[0, 1, 1]];
const S_ROWS: &[&[u8]] = &[&[0, 1, 1], &[1, 1, 0]];
const T_ROWS: &[&[u8]] = &[&[0, 1, 0], &[1, 1, 1]];
const L_ROWS: &[&[u8]] = &[&[0, 0, 1], &[1, 1, 1]];
const J_ROWS: &[&[u8]] = &[&[1, 0, 0], &[1, 1, 1]];

static SHAPES: [Shape; 7] = [
    Shape {
        kind: PieceKind::O,
        rows: O_ROWS,
        pivot: Pivot::grid_point(1, 1),
    },
    Shape {
        kind: PieceKind::I,
        rows: I_ROWS,
        pivot: Pivot::grid_point(2, 2),
    },
    Shape {
        kind: PieceKind::Z,
        rows: Z_ROWS,
        pivot: Pivot::cell_center(1, 1),
    },
    Shape {
        kind: PieceKind::S,
        rows: S_ROWS,
        pivot: Pivot::cell_center(1, 1),
    },
    Shape {
        kind: PieceKind::T,
        rows: T_ROWS,
        pivot: Pivot::cell_center(1, 1),
    },
    Shape {
        kind: PieceKind::L,
        rows: L_ROWS,
        pivot: Pivot::cell_center(1, 1),
    },
    Shape {
        kind: PieceKind::J,
        rows: J_ROWS,
        pivot: Pivot::cell_center(1, 1),
    },
];

/// Read-only lookup for the process-lifetime shape definitions.
pub fn shape_for(kind: PieceKind) -> &'static Shape {
    &SHAPES[kind.index()]
}

/// Every shape, in [`PieceKind::ALL`] order.
pub fn all_shapes() -> &'static [Shape; 7] {
    &SHAPES
}

/// Rotate `shape` into `orientation` around its pivot.
///
/// The stored definition is rotated by the orientation's number of clockwise
/// quarter-turns, so the result depends only on the orientation: stepping
/// clockwise four times always yields the North mask again.
pub fn rotate(shape: &Shape, orientation: Rotation) -> CellMask {
    let turns = orientation.quarter_turns();
    let base = shape.cells();
    if turns == 0 {
        return base;
    }
    base.iter()
        .map(|&cell| rotate_cell(cell, shape.pivot, turns))
        .collect()
}

/// Rotate one cell clockwise (screen coordinates, y down) `turns` times.
fn rotate_cell((x, y): CellOffset, pivot: Pivot, turns: u8) -> CellOffset {
    // Cell centers in doubled units are always odd.
    let mut dx = 2 * x + 1 - pivot.x2;
    let mut dy = 2 * y + 1 - pivot.y2;
    for _ in 0..turns {
        (dx, dy) = (-dy, dx);
    }
    let cx = pivot.x2 + dx;
    let cy = pivot.y2 + dy;
    ((cx - 1).div_euclid(2), (cy - 1).div_euclid(2))
}
