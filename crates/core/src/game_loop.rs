//! Game loop - the state machine and per-tick driver.
//!
//! ```text
//! idle --start()--> ready --tick--> play --spawn blocked--> finish
//!   ^                 ^                |                       |
//!   |                 +----reset()-----+------reset()----------+
//!   +--------------------- stop() from any state --------------+
//! ```
//!
//! `start()` is also accepted from `finish`. All board mutation happens inside
//! [`GameLoop::tick`]; input only queues intents.
//!
//! # Tick
//!
//! While playing, one tick:
//! 1. drains queued intents (at most one per kind, arrival order); a hard drop,
//!    or a soft drop that lands, locks the piece and discards the rest
//! 2. advances gravity and attempts one downward shift when due
//! 3. on landing, commits the piece, clears full rows and spawns the next piece
//! 4. renders once from a snapshot
//!
//! The tick re-requests itself from the [`Scheduler`] while the game is running.

use tracing::{debug, error, info, warn};

use crate::board::Board;
use crate::config::EngineConfig;
use crate::controller::{DropOutcome, PieceController, SpawnOutcome};
use crate::error::EngineError;
use crate::gravity::Gravity;
use crate::intent::IntentQueue;
use crate::piece::ActivePiece;
use crate::render::{Renderer, Viewport};
use crate::rng::{source_for, PieceSource};
use crate::scheduler::{Scheduler, TickHandle};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameStatus, Intent, RotationDirection};

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Status after the tick.
    pub status: GameStatus,
    /// A piece was committed to the board.
    pub locked: bool,
    /// Rows removed by this tick's lock.
    pub lines_cleared: u32,
    /// Intents that changed the active piece.
    pub intents_applied: u8,
}

pub struct GameLoop<S: Scheduler, P: PieceSource> {
    config: EngineConfig,
    status: GameStatus,
    board: Option<Board>,
    controller: PieceController,
    source: P,
    gravity: Gravity,
    intents: IntentQueue,
    scheduler: S,
    pending_tick: Option<TickHandle>,
    renderer: Option<Box<dyn Renderer>>,
    viewport: Viewport,
    lines: u32,
    pieces_locked: u32,
}

impl<S: Scheduler> GameLoop<S, Box<dyn PieceSource>> {
    /// Engine with the randomizer named by `config`.
    pub fn from_config(config: EngineConfig, scheduler: S) -> Self {
        let source = source_for(config.randomizer, config.seed);
        Self::new(config, scheduler, source)
    }
}

impl<S: Scheduler, P: PieceSource> GameLoop<S, P> {
    pub fn new(config: EngineConfig, scheduler: S, source: P) -> Self {
        Self {
            config,
            status: GameStatus::Idle,
            board: None,
            controller: PieceController::new(),
            source,
            gravity: Gravity::new(config.gravity, config.lines_per_level),
            intents: IntentQueue::new(),
            scheduler,
            pending_tick: None,
            renderer: None,
            viewport: Viewport::default(),
            lines: 0,
            pieces_locked: 0,
        }
    }

    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.set_renderer(renderer);
        self
    }

    /// Replace the renderer. The previous one is returned so the caller
    /// decides when its resources are released.
    pub fn set_renderer(&mut self, renderer: Box<dyn Renderer>) -> Option<Box<dyn Renderer>> {
        info!(renderer = renderer.name(), "renderer attached");
        self.renderer.replace(renderer)
    }

    pub fn renderer_name(&self) -> Option<&'static str> {
        self.renderer.as_ref().map(|r| r.name())
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.gravity.level(self.lines)
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.controller.active()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn source(&self) -> &P {
        &self.source
    }

    /// The tick request currently outstanding, if any.
    pub fn pending_tick(&self) -> Option<TickHandle> {
        self.pending_tick
    }

    /// idle|finish -> ready with a fresh board. Returns whether it transitioned.
    pub fn start(&mut self) -> bool {
        match self.status {
            GameStatus::Idle | GameStatus::Finish => {
                info!(from = self.status.as_str(), "game start");
                self.prepare();
                true
            }
            GameStatus::Ready | GameStatus::Play => false,
        }
    }

    /// Back to ready with a fresh board. Does nothing from idle.
    pub fn reset(&mut self) -> bool {
        if self.status == GameStatus::Idle {
            return false;
        }
        info!(from = self.status.as_str(), "game reset");
        self.prepare();
        true
    }

    /// Halt the loop and release the board. Safe to call repeatedly.
    pub fn stop(&mut self) -> bool {
        if let Some(handle) = self.pending_tick.take() {
            self.scheduler.cancel_tick(handle);
        }
        let was = self.status;
        self.status = GameStatus::Idle;
        self.board = None;
        self.controller.clear();
        self.intents.clear();
        self.gravity.reset();
        if was != GameStatus::Idle {
            info!(from = was.as_str(), "game stopped");
            return true;
        }
        false
    }

    /// Queue an intent for the next tick. Only accepted while playing.
    pub fn enqueue(&mut self, intent: Intent) -> bool {
        if self.status != GameStatus::Play {
            return false;
        }
        self.intents.push(intent)
    }

    /// Advance the game by `elapsed_ms`.
    pub fn tick(&mut self, elapsed_ms: u32) -> Result<TickReport, EngineError> {
        // The request that produced this call has fired.
        self.pending_tick = None;

        let mut report = TickReport {
            status: self.status,
            ..TickReport::default()
        };

        match self.status {
            GameStatus::Idle => return Ok(report),
            GameStatus::Ready => {
                self.status = GameStatus::Play;
                debug!("ready -> play");
                self.spawn_next();
            }
            GameStatus::Play => self.step(elapsed_ms, &mut report)?,
            GameStatus::Finish => {}
        }

        report.status = self.status;
        if self.status == GameStatus::Play {
            self.request_tick();
        }
        self.render()?;
        Ok(report)
    }

    /// Render the current state outside a tick (after a resize, or while idle).
    pub fn redraw(&mut self) -> Result<(), EngineError> {
        self.render()
    }

    /// Read-only view for hosts and renderers.
    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot {
            next: self.source.peek_kind(),
            status: self.status,
            lines: self.lines,
            level: self.level(),
            pieces_locked: self.pieces_locked,
            ..GameSnapshot::default()
        };
        if let Some(board) = &self.board {
            board.write_grid(&mut snap.board);
            snap.active = self
                .controller
                .active()
                .map(|piece| ActiveSnapshot::new(&piece, board));
        }
        snap
    }

    fn prepare(&mut self) {
        self.board = Some(Board::new());
        self.controller.clear();
        self.intents.clear();
        self.gravity.reset();
        self.lines = 0;
        self.pieces_locked = 0;
        self.status = GameStatus::Ready;
        self.request_tick();
    }

    fn request_tick(&mut self) {
        if self.pending_tick.is_none() {
            self.pending_tick = Some(self.scheduler.request_tick());
        }
    }

    fn step(&mut self, elapsed_ms: u32, report: &mut TickReport) -> Result<(), EngineError> {
        let Some(board) = self.board.as_ref() else {
            return Ok(());
        };

        let mut landed = false;
        for intent in self.intents.drain() {
            let applied = match intent {
                Intent::MoveLeft => self.controller.move_left(board),
                Intent::MoveRight => self.controller.move_right(board),
                Intent::RotateCw => self
                    .controller
                    .rotate(board, RotationDirection::Clockwise)
                    .is_some(),
                Intent::SoftDrop => match self.controller.soft_drop(board) {
                    DropOutcome::Moved => true,
                    // Landing locks the piece but does not move it.
                    DropOutcome::Landed => {
                        landed = true;
                        false
                    }
                    DropOutcome::NoPiece => false,
                },
                Intent::HardDrop => match self.controller.hard_drop(board) {
                    Some(distance) => {
                        landed = true;
                        distance > 0
                    }
                    None => false,
                },
            };
            if applied {
                report.intents_applied += 1;
            }
            if landed {
                break;
            }
        }

        if !landed
            && self.gravity.advance(elapsed_ms, self.lines)
            && self.controller.soft_drop(board) == DropOutcome::Landed
        {
            landed = true;
        }

        if landed {
            self.lock_active(report)?;
        }
        Ok(())
    }

    fn lock_active(&mut self, report: &mut TickReport) -> Result<(), EngineError> {
        let (Some(board), Some(piece)) = (self.board.as_mut(), self.controller.active()) else {
            return Ok(());
        };
        if let Err(violation) = board.commit(&piece) {
            error!(%violation, kind = piece.kind().as_str(), "lock bypassed collision check");
            // The board can no longer be trusted; stop here until a reset.
            self.controller.clear();
            self.intents.clear();
            self.status = GameStatus::Finish;
            return Err(violation.into());
        }
        self.controller.clear();
        let cleared = board.clear_completed_rows() as u32;

        self.lines += cleared;
        self.pieces_locked += 1;
        report.locked = true;
        report.lines_cleared = cleared;
        debug!(
            kind = piece.kind().as_str(),
            x = piece.x(),
            y = piece.y(),
            cleared,
            lines = self.lines,
            "piece locked"
        );

        self.spawn_next();
        Ok(())
    }

    fn spawn_next(&mut self) {
        let Some(board) = self.board.as_ref() else {
            return;
        };
        let kind = self.source.next_kind();
        self.gravity.reset();
        match self.controller.spawn(board, kind) {
            SpawnOutcome::Spawned(_) => debug!(kind = kind.as_str(), "spawned"),
            SpawnOutcome::Blocked(_) => {
                self.status = GameStatus::Finish;
                info!(
                    kind = kind.as_str(),
                    lines = self.lines,
                    pieces = self.pieces_locked,
                    "spawn blocked, game finished"
                );
            }
        }
    }

    fn render(&mut self) -> Result<(), EngineError> {
        if self.renderer.is_none() {
            return Ok(());
        }
        let snapshot = self.snapshot();
        let viewport = self.viewport;
        if let Some(renderer) = self.renderer.as_mut() {
            if let Err(err) = renderer.render(&snapshot, viewport) {
                warn!(renderer = renderer.name(), %err, "render failed");
                return Err(err.into());
            }
        }
        Ok(())
    }
}
