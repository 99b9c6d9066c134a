//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, renderers, input mapping, hosts).
//!
//! # Board Dimensions
//!
//! Standard playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn row**: 0, spawn column centers the piece's mask
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame callback interval (~60 FPS) |
//! | `BASE_GRAVITY_MS` | 1000 | Gravity at level 0 |
//! | `LINES_PER_LEVEL` | 10 | Line clears per gravity milestone |
//! | `DEFAULT_DAS_MS` | 150 | Hold time before auto-repeat starts |
//! | `DEFAULT_ARR_MS` | 50 | Interval between auto-repeats |
//!
//! # Gravity Intervals by Level
//!
//! | Level | Interval |
//! |-------|----------|
//! | 0 | 1000ms |
//! | 1 | 800ms |
//! | 2 | 650ms |
//! | 3 | 500ms |
//! | 4 | 400ms |
//! | 5 | 320ms |
//! | 6 | 250ms |
//! | 7 | 200ms |
//! | 8 | 160ms |
//! | 9+ | -10ms per level, floor at 100ms |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameStatus, Intent, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Intent::from_str("hardDrop"), Some(Intent::HardDrop));
//! assert_eq!(GameStatus::Idle.as_str(), "idle");
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Frame callback interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 0 (1000ms = 1 second per row)
pub const BASE_GRAVITY_MS: u32 = 1000;

/// Line clears needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity intervals by level (milliseconds per row)
///
/// Index 0 = Level 0, Index 8 = Level 8
pub const GRAVITY_INTERVALS: [u32; 9] = [1000, 800, 650, 500, 400, 320, 250, 200, 160];

/// Per-level reduction applied past the end of `GRAVITY_INTERVALS`
pub const GRAVITY_STEP_MS: u32 = 10;

/// Absolute minimum gravity interval (100ms)
pub const GRAVITY_MIN_MS: u32 = 100;

/// DAS (Delayed Auto Shift) delay in milliseconds.
pub const DEFAULT_DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) in milliseconds.
pub const DEFAULT_ARR_MS: u32 = 50;

/// The seven piece kinds
///
/// Each piece has a distinct shape and color:
/// - **O**: Yellow, 2x2 square
/// - **I**: Cyan, horizontal bar
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **S**: Green, S-shaped
/// - **T**: Magenta, T-shaped
/// - **L**: Orange, L-shaped (mirror of J)
/// - **J**: Blue, J-shaped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    I,
    Z,
    S,
    T,
    L,
    J,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "o" => Some(PieceKind::O),
            "i" => Some(PieceKind::I),
            "z" => Some(PieceKind::Z),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::O => "o",
            PieceKind::I => "i",
            PieceKind::Z => "z",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::L => "l",
            PieceKind::J => "j",
        }
    }

    /// Position in [`PieceKind::ALL`].
    pub fn index(&self) -> usize {
        match self {
            PieceKind::O => 0,
            PieceKind::I => 1,
            PieceKind::Z => 2,
            PieceKind::S => 3,
            PieceKind::T => 4,
            PieceKind::L => 5,
            PieceKind::J => 6,
        }
    }
}

/// The four discrete orientations of a piece
///
/// - **North**: Spawn orientation (0°)
/// - **East**: Rotated 90° clockwise
/// - **South**: Rotated 180°
/// - **West**: Rotated 270° clockwise
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90° or 270°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Step one quarter-turn in the given direction.
    pub fn step(&self, direction: RotationDirection) -> Self {
        match direction {
            RotationDirection::Clockwise => self.rotate_cw(),
            RotationDirection::CounterClockwise => self.rotate_ccw(),
        }
    }

    /// Number of clockwise quarter-turns from North (0..4).
    pub fn quarter_turns(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Direction of a rotation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

/// Discrete control intents consumed by the engine
///
/// Hosts translate raw key/pointer events into this vocabulary; the engine
/// never sees device events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down; locks when the move is rejected
    SoftDrop,
    /// Drop piece to its landing row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
}

impl Intent {
    /// All intents, in the order they are listed in the host vocabulary.
    pub const ALL: [Intent; 5] = [
        Intent::MoveLeft,
        Intent::MoveRight,
        Intent::SoftDrop,
        Intent::HardDrop,
        Intent::RotateCw,
    ];

    /// Parse intent from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Intent;
    ///
    /// assert_eq!(Intent::from_str("moveLeft"), Some(Intent::MoveLeft));
    /// assert_eq!(Intent::from_str("rotateCW"), Some(Intent::RotateCw));
    /// assert_eq!(Intent::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "softdrop" => Some(Intent::SoftDrop),
            "harddrop" => Some(Intent::HardDrop),
            "rotatecw" => Some(Intent::RotateCw),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::SoftDrop => "softDrop",
            Intent::HardDrop => "hardDrop",
            Intent::RotateCw => "rotateCw",
        }
    }

    /// Stable slot index, used for per-tick de-duplication.
    pub fn index(&self) -> usize {
        match self {
            Intent::MoveLeft => 0,
            Intent::MoveRight => 1,
            Intent::SoftDrop => 2,
            Intent::HardDrop => 3,
            Intent::RotateCw => 4,
        }
    }
}

/// Lifecycle state of a game instance
///
/// `Idle → Ready → Play → Finish`; `Finish` is terminal until a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    /// Constructed, not running
    #[default]
    Idle,
    /// Board cleared, piece not yet spawned
    Ready,
    /// Loop active
    Play,
    /// A spawn collided; no further mutation until reset
    Finish,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Idle => "idle",
            GameStatus::Ready => "ready",
            GameStatus::Play => "play",
            GameStatus::Finish => "finish",
        }
    }

    /// Whether a board exists in this state.
    pub fn has_board(&self) -> bool {
        !matches!(self, GameStatus::Idle)
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Occupied, tagged with the kind that filled it
pub type Cell = Option<PieceKind>;
