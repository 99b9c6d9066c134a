//! Piece controller - owns the active piece and applies move/rotate/drop requests.
//!
//! Every change is computed as a candidate first and committed only if
//! [`collides`] rejects nothing. A rejected request leaves the piece untouched.
//!
//! # Wall kicks
//!
//! When a rotation collides in place, the same rotated candidate is retried at
//! these horizontal offsets, in order, and the first fit wins:
//!
//! | Try | Offset |
//! |-----|--------|
//! | 1 | `( 0, 0)` |
//! | 2 | `(-1, 0)` |
//! | 3 | `(+1, 0)` |
//! | 4 | `(-2, 0)` |
//! | 5 | `(+2, 0)` |
//!
//! The table is shared by every piece kind and both rotation directions.

use crate::board::Board;
use crate::collision::{collides, drop_distance};
use crate::piece::ActivePiece;
use crate::types::{PieceKind, RotationDirection};

/// Offsets tried, in order, when a rotation collides in place.
pub const WALL_KICKS: [(i8, i8); 5] = [(0, 0), (-1, 0), (1, 0), (-2, 0), (2, 0)];

/// Result of a one-row downward move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Moved,
    /// The move was rejected; the piece rests on something and should lock.
    Landed,
    NoPiece,
}

/// Result of spawning a new piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    Spawned(ActivePiece),
    /// The spawn placement collides; the game is over.
    Blocked(ActivePiece),
}

#[derive(Debug, Clone, Default)]
pub struct PieceController {
    active: Option<ActivePiece>,
}

impl PieceController {
    pub fn new() -> Self {
        Self { active: None }
    }

    /// The current piece, if any.
    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// Remove and return the current piece (used when locking).
    pub fn take(&mut self) -> Option<ActivePiece> {
        self.active.take()
    }

    /// Drop the current piece without locking it.
    pub fn clear(&mut self) {
        self.active = None;
    }

    /// Place a new piece of `kind` at the spawn position.
    ///
    /// A blocked spawn leaves the controller empty.
    pub fn spawn(&mut self, board: &Board, kind: PieceKind) -> SpawnOutcome {
        let piece = ActivePiece::spawn(kind);
        if board.is_spawn_row_full(&piece) || collides(board, &piece) {
            self.active = None;
            return SpawnOutcome::Blocked(piece);
        }
        self.active = Some(piece);
        SpawnOutcome::Spawned(piece)
    }

    pub fn move_left(&mut self, board: &Board) -> bool {
        self.try_shift(board, -1, 0)
    }

    pub fn move_right(&mut self, board: &Board) -> bool {
        self.try_shift(board, 1, 0)
    }

    /// Move down one row, or report that the piece has landed.
    pub fn soft_drop(&mut self, board: &Board) -> DropOutcome {
        if self.active.is_none() {
            return DropOutcome::NoPiece;
        }
        if self.try_shift(board, 0, 1) {
            DropOutcome::Moved
        } else {
            DropOutcome::Landed
        }
    }

    /// Rotate one quarter-turn, trying [`WALL_KICKS`] in order.
    ///
    /// Returns the accepted offset, or `None` if every candidate collided.
    pub fn rotate(&mut self, board: &Board, direction: RotationDirection) -> Option<(i8, i8)> {
        let active = self.active?;
        let turned = active.reoriented(active.orientation().step(direction));

        for &(dx, dy) in WALL_KICKS.iter() {
            let candidate = turned.shifted(dx, dy);
            if !collides(board, &candidate) {
                self.active = Some(candidate);
                return Some((dx, dy));
            }
        }
        None
    }

    /// Move the piece straight down to its landing row.
    ///
    /// Returns the number of rows fallen; the caller locks the piece next.
    pub fn hard_drop(&mut self, board: &Board) -> Option<i8> {
        let active = self.active?;
        let distance = drop_distance(board, &active);
        if distance > 0 {
            self.active = Some(active.shifted(0, distance));
        }
        Some(distance)
    }

    /// Where the piece would land if hard-dropped now.
    pub fn ghost(&self, board: &Board) -> Option<ActivePiece> {
        let active = self.active?;
        Some(active.shifted(0, drop_distance(board, &active)))
    }

    fn try_shift(&mut self, board: &Board, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let candidate = active.shifted(dx, dy);
        if collides(board, &candidate) {
            return false;
        }
        self.active = Some(candidate);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rotation;

    fn spawned(board: &Board, kind: PieceKind) -> PieceController {
        let mut ctl = PieceController::new();
        assert!(matches!(ctl.spawn(board, kind), SpawnOutcome::Spawned(_)));
        ctl
    }

    #[test]
    fn move_without_piece_is_rejected() {
        let board = Board::new();
        let mut ctl = PieceController::new();
        assert!(!ctl.move_left(&board));
        assert_eq!(ctl.soft_drop(&board), DropOutcome::NoPiece);
        assert_eq!(ctl.rotate(&board, RotationDirection::Clockwise), None);
        assert_eq!(ctl.hard_drop(&board), None);
    }

    #[test]
    fn soft_drop_reports_landing_at_floor() {
        let board = Board::new();
        let mut ctl = spawned(&board, PieceKind::O);
        for _ in 0..18 {
            assert_eq!(ctl.soft_drop(&board), DropOutcome::Moved);
        }
        assert_eq!(ctl.soft_drop(&board), DropOutcome::Landed);
        assert_eq!(ctl.active().unwrap().y(), 18);
    }

    #[test]
    fn rotation_against_right_wall_kicks_left() {
        let board = Board::new();
        let mut ctl = PieceController::new();
        // Vertical I hugging the right wall: column 9 = x + 2.
        ctl.active = Some(ActivePiece::at(PieceKind::I, Rotation::East, 7, 5));
        // South mask spans x+0..x+3, which would reach column 10.
        let kick = ctl.rotate(&board, RotationDirection::Clockwise);
        assert_eq!(kick, Some((-1, 0)));
        let piece = ctl.active().unwrap();
        assert_eq!(piece.orientation(), Rotation::South);
        assert_eq!(piece.x(), 6);
    }

    #[test]
    fn rotation_with_no_fit_is_rejected() {
        // A one-column shaft: the vertical I cannot turn horizontal.
        let rows: Vec<&str> = std::iter::repeat("####.#####").take(8).collect();
        let board = Board::from_rows(&rows);
        let mut ctl = PieceController::new();
        let before = ActivePiece::at(PieceKind::I, Rotation::East, 2, 14);
        ctl.active = Some(before);
        assert_eq!(ctl.rotate(&board, RotationDirection::Clockwise), None);
        assert_eq!(ctl.active(), Some(before));
    }

    #[test]
    fn spawn_blocked_leaves_controller_empty() {
        let mut board = Board::new();
        board.set(4, 0, Some(PieceKind::I));
        let mut ctl = PieceController::new();
        assert!(matches!(
            ctl.spawn(&board, PieceKind::T),
            SpawnOutcome::Blocked(_)
        ));
        assert!(ctl.active().is_none());
    }

    #[test]
    fn ghost_matches_hard_drop_target() {
        let board = Board::from_rows(&["#########."]);
        let mut ctl = spawned(&board, PieceKind::L);
        let ghost = ctl.ghost(&board).unwrap();
        let distance = ctl.hard_drop(&board).unwrap();
        assert_eq!(ctl.active(), Some(ghost));
        assert_eq!(ghost.y(), distance);
    }
}
