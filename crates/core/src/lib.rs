//! Core game engine - pure, deterministic, and testable
//!
//! Board model, piece catalog and rotation, collision detection, the piece
//! controller and the game-loop state machine. No terminal, network or
//! environment access happens here: hosts pass in configuration, a
//! [`Scheduler`], a [`PieceSource`] and optionally a [`Renderer`].
//!
//! # Module Structure
//!
//! - [`catalog`]: the seven shapes, their pivots and rotation
//! - [`board`]: 10x20 grid, commit and line clearing
//! - [`collision`]: the single placement predicate
//! - [`piece`]: the active piece value type
//! - [`controller`]: move/rotate/drop with wall kicks
//! - [`gravity`]: level-based fall interval
//! - [`game_loop`]: idle/ready/play/finish state machine and tick
//! - [`rng`]: 7-bag, uniform and scripted piece sources
//! - [`render`], [`snapshot`], [`scheduler`]: host-facing seams
//!
//! # Example
//!
//! ```
//! use blockfall_core::{EngineConfig, GameLoop, ManualScheduler, ScriptedSource};
//! use blockfall_core::types::{GameStatus, Intent, PieceKind};
//!
//! let mut game = GameLoop::new(
//!     EngineConfig::default(),
//!     ManualScheduler::new(),
//!     ScriptedSource::new([PieceKind::O]),
//! );
//! game.start();
//! game.tick(16).unwrap();
//! assert_eq!(game.status(), GameStatus::Play);
//!
//! game.enqueue(Intent::HardDrop);
//! let report = game.tick(16).unwrap();
//! assert!(report.locked);
//! ```

pub mod board;
pub mod catalog;
pub mod collision;
pub mod config;
pub mod controller;
pub mod error;
pub mod game_loop;
pub mod gravity;
pub mod intent;
pub mod piece;
pub mod render;
pub mod rng;
pub mod scheduler;
pub mod snapshot;

pub use blockfall_types as types;

pub use board::{Board, Grid};
pub use catalog::{all_shapes, rotate, shape_for, CellMask, Pivot, Shape};
pub use collision::{collides, drop_distance, first_conflict, is_grounded};
pub use config::EngineConfig;
pub use controller::{DropOutcome, PieceController, SpawnOutcome, WALL_KICKS};
pub use error::{ConflictReason, EngineError, InvariantViolation, RenderError};
pub use game_loop::{GameLoop, TickReport};
pub use gravity::{interval_for_level, Gravity, GravityMode};
pub use intent::IntentQueue;
pub use piece::ActivePiece;
pub use render::{Renderer, Viewport};
pub use rng::{PieceQueue, PieceSource, Randomizer, ScriptedSource, SimpleRng, UniformSource};
pub use scheduler::{ManualScheduler, Scheduler, TickHandle};
pub use snapshot::{ActiveSnapshot, GameSnapshot, PieceCells};
