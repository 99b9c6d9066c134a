//! Board tests

use blockfall::core::{ActivePiece, Board, ConflictReason, InvariantViolation};
use blockfall::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(None), "({x}, {y})");
            assert!(!board.is_occupied(x, y));
        }
    }
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);

    // Outside the grid counts as occupied.
    assert!(board.is_occupied(-1, 5));
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));

    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));

    assert!(!board.set(-1, 0, Some(PieceKind::T)));
    assert!(!board.set(0, BOARD_HEIGHT as i8, Some(PieceKind::T)));
}

#[test]
fn test_row_full() {
    let board = Board::from_rows(&["##########", "#########."]);
    assert!(board.is_row_full(18));
    assert!(!board.is_row_full(19));
    assert!(!board.is_row_full(BOARD_HEIGHT as usize));
}

#[test]
fn test_clear_full_empty_full() {
    // Rows top to bottom: full, empty, full, at the bottom of the board.
    let mut board = Board::from_rows(&["##########", "..........", "##########"]);
    let marker_above = 16;
    board.set(0, marker_above, Some(PieceKind::J));

    let cleared = board.clear_completed_rows();

    assert_eq!(cleared, 2);
    assert_eq!(board.filled_count(), 1);
    // The previously-middle empty row sits at the bottom; the marker row above
    // it fell by two.
    assert!((0..BOARD_WIDTH as i8).all(|x| !board.is_occupied(x, 19)));
    assert_eq!(board.get(0, 18), Some(Some(PieceKind::J)));
    // Two fresh empty rows at the top.
    assert!((0..BOARD_WIDTH as i8).all(|x| !board.is_occupied(x, 0) && !board.is_occupied(x, 1)));
}

#[test]
fn test_clear_keeps_order_of_remaining_rows() {
    let mut board = Board::from_rows(&["t.........", "##########", ".s........", "##########"]);
    assert_eq!(board.clear_completed_rows(), 2);
    assert_eq!(board.get(0, 18), Some(Some(PieceKind::T)));
    assert_eq!(board.get(1, 19), Some(Some(PieceKind::S)));
}

#[test]
fn test_clear_nothing() {
    let mut board = Board::from_rows(&["#########."]);
    let before = board.clone();
    assert_eq!(board.clear_completed_rows(), 0);
    assert_eq!(board, before);
}

#[test]
fn test_commit_writes_kind() {
    let mut board = Board::new();
    let piece = ActivePiece::at(PieceKind::L, Rotation::North, 0, 18);
    board.commit(&piece).unwrap();

    assert_eq!(board.filled_count(), 4);
    for (x, y) in piece.cells() {
        assert_eq!(board.get(x, y), Some(Some(PieceKind::L)));
    }
}

#[test]
fn test_commit_rejects_overlap_without_writing() {
    let mut board = Board::from_rows(&[".#........"]);
    let before = board.clone();
    let piece = ActivePiece::at(PieceKind::O, Rotation::North, 0, 18);

    let err = board.commit(&piece).unwrap_err();

    assert_eq!(
        err,
        InvariantViolation {
            x: 1,
            y: 19,
            reason: ConflictReason::Occupied
        }
    );
    assert_eq!(board, before);
}

#[test]
fn test_commit_rejects_out_of_bounds() {
    let mut board = Board::new();
    let piece = ActivePiece::at(PieceKind::O, Rotation::North, 9, 0);
    let err = board.commit(&piece).unwrap_err();
    assert_eq!(err.reason, ConflictReason::OutOfBounds);
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_spawn_row_full() {
    let spawn = ActivePiece::spawn(PieceKind::T);
    // T spawns at column 3; its top row is the single cell (4, 0).
    let mut board = Board::new();
    assert!(!board.is_spawn_row_full(&spawn));
    board.set(3, 0, Some(PieceKind::I));
    assert!(!board.is_spawn_row_full(&spawn));
    board.set(4, 0, Some(PieceKind::I));
    assert!(board.is_spawn_row_full(&spawn));
}

#[test]
fn test_rows_round_trip_text() {
    let board = Board::from_rows(&["#.#.#.#.#."]);
    let rows = board.to_rows();
    assert_eq!(rows.len(), BOARD_HEIGHT as usize);
    assert_eq!(rows[19], "#.#.#.#.#.");
    assert_eq!(rows[0], "..........");
}
