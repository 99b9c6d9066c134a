//! Collision detection - the single gate for every move, rotate and drop.
//!
//! Pure predicates over a read-only board. Safe to call speculatively.

use crate::board::Board;
use crate::error::ConflictReason;
use crate::piece::ActivePiece;

/// True if any cell of `candidate` is out of bounds or already occupied.
pub fn collides(board: &Board, candidate: &ActivePiece) -> bool {
    first_conflict(board, candidate).is_some()
}

/// The first offending cell of `candidate`, in mask order.
pub fn first_conflict(board: &Board, candidate: &ActivePiece) -> Option<(i8, i8, ConflictReason)> {
    candidate.cells().into_iter().find_map(|(x, y)| {
        if !Board::is_inside(x, y) {
            Some((x, y, ConflictReason::OutOfBounds))
        } else if board.is_occupied(x, y) {
            Some((x, y, ConflictReason::Occupied))
        } else {
            None
        }
    })
}

/// True if the piece cannot move down by one row.
pub fn is_grounded(board: &Board, piece: &ActivePiece) -> bool {
    collides(board, &piece.shifted(0, 1))
}

/// Rows `piece` can fall before it would collide.
pub fn drop_distance(board: &Board, piece: &ActivePiece) -> i8 {
    let mut distance = 0;
    while !collides(board, &piece.shifted(0, distance + 1)) {
        distance += 1;
    }
    distance
}
