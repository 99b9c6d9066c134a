use crate::board::{Board, Grid};
use crate::piece::ActivePiece;
use crate::types::{GameStatus, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// Absolute cells of a piece, as renderers consume them.
pub type PieceCells = [(i8, i8); 4];

fn cells_of(piece: &ActivePiece) -> PieceCells {
    let mut out = [(0, 0); 4];
    for (slot, cell) in out.iter_mut().zip(piece.cells()) {
        *slot = cell;
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub orientation: Rotation,
    pub x: i8,
    pub y: i8,
    pub cells: PieceCells,
    /// Cells at the hard-drop landing position.
    pub ghost: PieceCells,
}

impl ActiveSnapshot {
    pub fn new(piece: &ActivePiece, board: &Board) -> Self {
        let distance = crate::collision::drop_distance(board, piece);
        Self {
            kind: piece.kind(),
            orientation: piece.orientation(),
            x: piece.x(),
            y: piece.y(),
            cells: cells_of(piece),
            ghost: cells_of(&piece.shifted(0, distance)),
        }
    }

    pub fn ghost_y(&self) -> i8 {
        self.y + (self.ghost[0].1 - self.cells[0].1)
    }
}

/// Immutable copy of everything a renderer or host display needs.
///
/// Plain data, no references into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: Grid,
    pub active: Option<ActiveSnapshot>,
    pub next: Option<PieceKind>,
    pub status: GameStatus,
    pub lines: u32,
    pub level: u32,
    pub pieces_locked: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.status == GameStatus::Play
    }

    /// Locked cells, row-major, with their kinds.
    pub fn filled_cells(&self) -> impl Iterator<Item = (i8, i8, PieceKind)> + '_ {
        self.board.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(x, cell)| cell.map(|kind| (x as i8, y as i8, kind)))
        })
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: None,
            status: GameStatus::Idle,
            lines: 0,
            level: 0,
            pieces_locked: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_snapshot_carries_ghost() {
        let board = Board::from_rows(&["##########"]);
        let piece = ActivePiece::spawn(PieceKind::O);
        let snap = ActiveSnapshot::new(&piece, &board);
        assert_eq!(snap.ghost_y(), 17);
        assert!(snap.ghost.iter().all(|&(_, y)| y == 17 || y == 18));
    }

    #[test]
    fn filled_cells_lists_locked_board() {
        let mut snap = GameSnapshot::default();
        snap.board[19][0] = Some(PieceKind::J);
        let cells: Vec<_> = snap.filled_cells().collect();
        assert_eq!(cells, vec![(0, 19, PieceKind::J)]);
    }
}
