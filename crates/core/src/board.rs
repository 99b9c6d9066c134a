//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use crate::error::{ConflictReason, InvariantViolation};
use crate::piece::ActivePiece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row-major grid of cells, as handed to renderers.
pub type Grid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if !Self::is_inside(x, y) {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Bounds check.
    #[inline(always)]
    pub fn is_inside(x: i8, y: i8) -> bool {
        x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether (x, y) is filled.
    ///
    /// Out-of-bounds queries answer `true`. Callers bounds-check first.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        !matches!(self.get(x, y), Some(None))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Whether the topmost row of `piece`'s footprint overlaps locked cells.
    ///
    /// Used on spawn: a blocked spawn row ends the game.
    pub fn is_spawn_row_full(&self, piece: &ActivePiece) -> bool {
        let cells = piece.cells();
        let Some(top) = cells.iter().map(|&(_, y)| y).min() else {
            return false;
        };
        cells
            .iter()
            .filter(|&&(_, y)| y == top)
            .any(|&(x, y)| Self::is_inside(x, y) && self.is_occupied(x, y))
    }

    /// Write `piece`'s cells into the grid as permanent, occupied markers.
    ///
    /// The piece must not collide. If it does, nothing is written and the first
    /// offending cell is reported.
    pub fn commit(&mut self, piece: &ActivePiece) -> Result<(), InvariantViolation> {
        let cells = piece.cells();
        for &(x, y) in &cells {
            let reason = if !Self::is_inside(x, y) {
                ConflictReason::OutOfBounds
            } else if self.is_occupied(x, y) {
                ConflictReason::Occupied
            } else {
                continue;
            };
            return Err(InvariantViolation { x, y, reason });
        }

        for &(x, y) in &cells {
            self.set(x, y, Some(piece.kind()));
        }
        Ok(())
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Remaining rows keep their order and compact toward the bottom; the same
    /// number of empty rows appear at the top. Two-pointer pass, no allocation.
    pub fn clear_completed_rows(&mut self) -> usize {
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;
        let mut cleared = 0;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared
    }

    /// Number of occupied cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy into a row-major grid.
    pub fn write_grid(&self, out: &mut Grid) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[y * width..(y + 1) * width]);
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a board from text rows, bottom-aligned.
    ///
    /// `.` or space is empty; a piece letter (`o i z s t l j`, any case) fills
    /// the cell with that kind; any other character fills it with `O`.
    ///
    /// ```
    /// use blockfall_core::Board;
    ///
    /// let board = Board::from_rows(&["#########."]);
    /// assert!(board.is_occupied(0, 19));
    /// assert!(!board.is_occupied(9, 19));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        use crate::types::PieceKind;

        let mut board = Self::new();
        let skip = (BOARD_HEIGHT as usize).saturating_sub(rows.len());
        for (i, row) in rows.iter().take(BOARD_HEIGHT as usize).enumerate() {
            let y = (skip + i) as i8;
            for (x, ch) in row.chars().take(BOARD_WIDTH as usize).enumerate() {
                let cell = match ch {
                    '.' | ' ' => None,
                    other => Some(
                        PieceKind::from_str(&other.to_string()).unwrap_or(PieceKind::O),
                    ),
                };
                board.set(x as i8, y, cell);
            }
        }
        board
    }

    /// Render rows as text (`.` empty, `#` filled), top to bottom.
    pub fn to_rows(&self) -> Vec<String> {
        let width = BOARD_WIDTH as usize;
        self.cells
            .chunks(width)
            .map(|row| {
                row.iter()
                    .map(|c| if c.is_some() { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
