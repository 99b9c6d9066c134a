//! Active piece - the currently falling, player-controlled piece.
//!
//! Position and orientation are private. Only the controller in this crate can
//! move an existing piece, and it only does so after the collision check passes.

use crate::catalog::{shape_for, CellMask, Shape};
use crate::types::{PieceKind, Rotation, BOARD_WIDTH};

/// Spawn row for every piece.
pub const SPAWN_ROW: i8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    kind: PieceKind,
    orientation: Rotation,
    x: i8,
    y: i8,
}

impl ActivePiece {
    /// A piece at the fixed spawn position/orientation for `kind`.
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            orientation: Rotation::North,
            x: shape_for(kind).spawn_column(BOARD_WIDTH),
            y: SPAWN_ROW,
        }
    }

    /// A candidate placement. Creating one never changes game state.
    pub fn at(kind: PieceKind, orientation: Rotation, x: i8, y: i8) -> Self {
        Self {
            kind,
            orientation,
            x,
            y,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn orientation(&self) -> Rotation {
        self.orientation
    }

    /// Column of the shape's local origin.
    pub fn x(&self) -> i8 {
        self.x
    }

    /// Row of the shape's local origin.
    pub fn y(&self) -> i8 {
        self.y
    }

    pub fn shape(&self) -> &'static Shape {
        shape_for(self.kind)
    }

    /// Occupied cells relative to the local origin.
    pub fn mask(&self) -> CellMask {
        self.shape().mask(self.orientation)
    }

    /// Absolute board cells occupied by this piece.
    pub fn cells(&self) -> CellMask {
        self.mask()
            .iter()
            .map(|&(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }

    /// Candidate shifted by `(dx, dy)`.
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Candidate in a new orientation, same origin.
    pub fn reoriented(&self, orientation: Rotation) -> Self {
        Self {
            orientation,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_uses_north_and_row_zero() {
        let piece = ActivePiece::spawn(PieceKind::T);
        assert_eq!(piece.orientation(), Rotation::North);
        assert_eq!(piece.y(), SPAWN_ROW);
        assert_eq!(piece.x(), 3);
        assert_eq!(ActivePiece::spawn(PieceKind::O).x(), 4);
    }

    #[test]
    fn cells_are_offset_by_position() {
        let piece = ActivePiece::at(PieceKind::O, Rotation::North, 2, 5);
        let mut cells = piece.cells();
        cells.sort_unstable();
        assert_eq!(cells.as_slice(), &[(2, 5), (2, 6), (3, 5), (3, 6)]);
    }

    #[test]
    fn candidates_leave_original_untouched() {
        let piece = ActivePiece::spawn(PieceKind::L);
        let moved = piece.shifted(-1, 2);
        let turned = piece.reoriented(Rotation::South);
        assert_eq!(piece, ActivePiece::spawn(PieceKind::L));
        assert_eq!((moved.x(), moved.y()), (piece.x() - 1, piece.y() + 2));
        assert_eq!(turned.orientation(), Rotation::South);
        assert_eq!((turned.x(), turned.y()), (piece.x(), piece.y()));
    }
}
