//! Terminal Blockfall runner (default binary).
//!
//! Frame loop: terminal input feeds the input mapper, the mapper feeds the
//! engine's intent queue, the engine ticks whenever it asked for a frame,
//! then the HUD is drawn beside the board and the frame is flushed.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::runtime::Runtime;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;

use blockfall::config::AppConfig;
use blockfall::core::{GameLoop, PieceSource, Viewport};
use blockfall::input::{
    command_for_key, control_for_key, HostCommand, InputMapper, DEFAULT_HOLD_TIMEOUT_MS,
};
use blockfall::presence::{PresenceClient, PresenceState};
use blockfall::render::{select_renderer, SoftwareGpu, Surface2d};
use blockfall::term::{
    shared_frame, FrameScheduler, FrameSurface, Hud, PresenceView, SharedFrame, TerminalOutput,
    HUD_WIDTH,
};
use blockfall::types::{GameStatus, TICK_MS};

type Game = GameLoop<FrameScheduler, Box<dyn PieceSource>>;

fn main() -> Result<()> {
    let config = AppConfig::from_env().context("reading configuration")?;
    init_logging(&config)?;
    info!(env = %config.env, renderer = config.renderer.as_str(), seed = config.seed, "starting");

    let presence = Presence::start(config.socket_url.as_deref());

    let mut term = TerminalOutput::stdout();
    term.enter()?;

    let result = run(&mut term, &config, presence.as_ref());

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Some(presence) = presence {
        presence.shutdown();
    }
    result
}

fn init_logging(config: &AppConfig) -> Result<()> {
    // The terminal is in raw mode, so logs only go to a file.
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(config.log_level))
        .try_init()
        .context("installing log subscriber")?;
    Ok(())
}

/// Presence client kept alive on its own runtime.
struct Presence {
    runtime: Runtime,
    client: PresenceClient,
    state: watch::Receiver<PresenceState>,
}

impl Presence {
    fn start(endpoint: Option<&str>) -> Option<Self> {
        let endpoint = endpoint?;
        let runtime = match Runtime::new() {
            Ok(rt) => rt,
            Err(err) => {
                warn!(%err, "presence runtime unavailable");
                return None;
            }
        };
        let mut client = PresenceClient::new();
        if let Err(err) = runtime.block_on(client.connect(endpoint)) {
            warn!(%err, endpoint, "presence disabled");
        }
        let state = client.subscribe();
        Some(Self {
            runtime,
            client,
            state,
        })
    }

    fn view(&self) -> PresenceView {
        let state = self.state.borrow();
        PresenceView {
            connected: state.connected,
            users: state.users.len(),
            last_notification: state.last_notification().map(str::to_string),
        }
    }

    fn shutdown(mut self) {
        self.client.disconnect();
        self.runtime.shutdown_background();
    }
}

fn board_viewport(surface: &FrameSurface) -> Viewport {
    let (w, h) = surface.size();
    Viewport::new(w, h)
}

fn run(term: &mut TerminalOutput, config: &AppConfig, presence: Option<&Presence>) -> Result<()> {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let frame: SharedFrame = shared_frame(w, h);
    let surface = FrameSurface::new(frame.clone(), HUD_WIDTH);
    let gpu = SoftwareGpu::new(FrameSurface::new(frame.clone(), HUD_WIDTH));
    let renderer = select_renderer(config.renderer, Some(gpu), Some(surface.clone()))?;

    let mut game: Game =
        GameLoop::from_config(config.engine(), FrameScheduler::new()).with_renderer(renderer);
    game.set_viewport(board_viewport(&surface));
    game.start();

    let renderer_name = game.renderer_name().unwrap_or("none");
    let mut mapper = InputMapper::new().with_hold_timeout_ms(DEFAULT_HOLD_TIMEOUT_MS);
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if !handle_key(&mut game, &mut mapper, key) {
                        return Ok(());
                    }
                }
                Event::Resize(w, h) => {
                    frame.borrow_mut().resize(w, h);
                    term.invalidate();
                    game.set_viewport(board_viewport(&surface));
                }
                _ => {}
            }
        }

        if last_tick.elapsed() < tick_duration {
            continue;
        }
        let elapsed_ms = last_tick.elapsed().as_millis().min(u32::MAX as u128) as u32;
        last_tick = Instant::now();

        for intent in mapper.update(elapsed_ms) {
            game.enqueue(intent);
        }

        if game.scheduler_mut().take_due() {
            game.tick(elapsed_ms)?;
        } else {
            game.redraw()?;
        }

        let snap = game.snapshot();
        let view = presence.map(Presence::view);
        {
            let mut fb = frame.borrow_mut();
            let hud = Hud::right_of(&fb);
            hud.draw(&mut fb, &snap, renderer_name, view.as_ref());
            hud.draw_overlay(&mut fb, snap.status);
        }
        term.present(&frame.borrow())?;
    }
}

/// Returns `false` when the player asked to quit.
fn handle_key(game: &mut Game, mapper: &mut InputMapper, key: KeyEvent) -> bool {
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => {
            if key.kind == KeyEventKind::Press {
                match command_for_key(key) {
                    Some(HostCommand::Quit) => return false,
                    Some(HostCommand::Restart) => {
                        mapper.reset();
                        if !game.reset() {
                            game.start();
                        }
                        return true;
                    }
                    Some(HostCommand::Toggle) => {
                        mapper.reset();
                        match game.status() {
                            GameStatus::Idle | GameStatus::Finish => game.start(),
                            GameStatus::Ready | GameStatus::Play => game.stop(),
                        };
                        return true;
                    }
                    None => {}
                }
            }
            // Terminal key-repeat keeps a hold alive under the hold timeout.
            if let Some(control) = control_for_key(key.code) {
                if key.kind == KeyEventKind::Repeat && !control.repeats() {
                    return true;
                }
                if let Some(intent) = mapper.press(control) {
                    game.enqueue(intent);
                }
            }
        }
        KeyEventKind::Release => {
            if let Some(control) = control_for_key(key.code) {
                mapper.release(control);
            }
        }
    }
    true
}
