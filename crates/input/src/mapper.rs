//! Control signals to intents, with DAS/ARR auto-repeat.
//!
//! The mapper never touches the engine. It turns press/hold/release of the
//! five host controls into the discrete [`Intent`]s the game loop queues.
//!
//! - `Left`, `Right`, `Down` emit on the leading edge, then repeat every
//!   `arr_ms` once held for `das_ms`.
//! - `Rotate`, `Drop` emit on the leading edge only.
//! - The newest horizontal direction wins.
//!
//! Time only advances through the `elapsed_ms` arguments, so behavior is
//! reproducible in tests. Hosts without release events can set a hold timeout:
//! held controls not refreshed by a press within it are released.

use arrayvec::ArrayVec;

use crate::types::{Intent, DEFAULT_ARR_MS, DEFAULT_DAS_MS};

/// Hold timeout suggested for terminals that never report key releases.
pub const DEFAULT_HOLD_TIMEOUT_MS: u32 = 150;

/// Intents produced by one mapper call.
pub type Intents = ArrayVec<Intent, 32>;

/// Repeats emitted per held control in one update; the horizontal and down
/// repeaters together stay within [`Intents`] capacity.
const MAX_REPEATS_PER_UPDATE: u32 = 16;

/// Raw host controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Left,
    Right,
    Down,
    Rotate,
    Drop,
}

impl Control {
    pub const ALL: [Control; 5] = [
        Control::Left,
        Control::Right,
        Control::Down,
        Control::Rotate,
        Control::Drop,
    ];

    /// Intent emitted when this control fires.
    pub fn intent(&self) -> Intent {
        match self {
            Control::Left => Intent::MoveLeft,
            Control::Right => Intent::MoveRight,
            Control::Down => Intent::SoftDrop,
            Control::Rotate => Intent::RotateCw,
            Control::Drop => Intent::HardDrop,
        }
    }

    pub fn repeats(&self) -> bool {
        matches!(self, Control::Left | Control::Right | Control::Down)
    }
}

/// Level-triggered control snapshot, as reported by hosts that poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlInputs {
    pub left: bool,
    pub right: bool,
    pub down: bool,
    pub rotate: bool,
    pub drop: bool,
}

impl ControlInputs {
    pub fn get(&self, control: Control) -> bool {
        match control {
            Control::Left => self.left,
            Control::Right => self.right,
            Control::Down => self.down,
            Control::Rotate => self.rotate,
            Control::Drop => self.drop,
        }
    }
}

/// Repeat timers for one held control.
#[derive(Debug, Clone, Copy, Default)]
struct Repeat {
    das_timer: u32,
    arr_accumulator: u32,
}

impl Repeat {
    /// Advance and return how many repeats are due.
    fn advance(&mut self, elapsed_ms: u32, das_ms: u32, arr_ms: u32) -> u32 {
        let prev_das = self.das_timer;
        self.das_timer = self.das_timer.saturating_add(elapsed_ms);
        if self.das_timer < das_ms {
            return 0;
        }
        let excess = if prev_das < das_ms {
            self.das_timer - das_ms
        } else {
            elapsed_ms
        };
        self.arr_accumulator = self.arr_accumulator.saturating_add(excess);
        let arr = arr_ms.max(1);
        let count = self.arr_accumulator / arr;
        self.arr_accumulator %= arr;
        count.min(MAX_REPEATS_PER_UPDATE)
    }
}

#[derive(Debug, Clone)]
pub struct InputMapper {
    horizontal: Option<Control>,
    horizontal_repeat: Repeat,
    down_held: bool,
    down_repeat: Repeat,
    das_ms: u32,
    arr_ms: u32,
    hold_timeout_ms: Option<u32>,
    since_refresh_ms: u32,
    previous: ControlInputs,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_ms: u32, arr_ms: u32) -> Self {
        Self {
            horizontal: None,
            horizontal_repeat: Repeat::default(),
            down_held: false,
            down_repeat: Repeat::default(),
            das_ms,
            arr_ms,
            hold_timeout_ms: None,
            since_refresh_ms: 0,
            previous: ControlInputs::default(),
        }
    }

    pub fn with_hold_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.hold_timeout_ms = Some(timeout_ms);
        self
    }

    pub fn hold_timeout_ms(&self) -> Option<u32> {
        self.hold_timeout_ms
    }

    pub fn is_held(&self, control: Control) -> bool {
        match control {
            Control::Left | Control::Right => self.horizontal == Some(control),
            Control::Down => self.down_held,
            Control::Rotate | Control::Drop => false,
        }
    }

    /// Leading edge (or host key-repeat) of `control`.
    ///
    /// A press of an already-held repeating control only refreshes the hold.
    pub fn press(&mut self, control: Control) -> Option<Intent> {
        match control {
            Control::Left | Control::Right => {
                self.since_refresh_ms = 0;
                if self.horizontal == Some(control) {
                    return None;
                }
                self.horizontal = Some(control);
                self.horizontal_repeat = Repeat::default();
                Some(control.intent())
            }
            Control::Down => {
                self.since_refresh_ms = 0;
                if self.down_held {
                    return None;
                }
                self.down_held = true;
                self.down_repeat = Repeat::default();
                Some(control.intent())
            }
            Control::Rotate | Control::Drop => Some(control.intent()),
        }
    }

    pub fn release(&mut self, control: Control) {
        match control {
            Control::Left | Control::Right => {
                if self.horizontal == Some(control) {
                    self.horizontal = None;
                    self.horizontal_repeat = Repeat::default();
                }
            }
            Control::Down => {
                self.down_held = false;
                self.down_repeat = Repeat::default();
            }
            Control::Rotate | Control::Drop => {}
        }
    }

    /// Advance hold timers and return due auto-repeats.
    pub fn update(&mut self, elapsed_ms: u32) -> Intents {
        let mut intents = Intents::new();

        self.since_refresh_ms = self.since_refresh_ms.saturating_add(elapsed_ms);
        if let Some(timeout) = self.hold_timeout_ms {
            if self.since_refresh_ms > timeout {
                self.release_all();
            }
        }

        if let Some(control) = self.horizontal {
            let due = self
                .horizontal_repeat
                .advance(elapsed_ms, self.das_ms, self.arr_ms);
            for _ in 0..due {
                let _ = intents.try_push(control.intent());
            }
        }

        if self.down_held {
            let due = self.down_repeat.advance(elapsed_ms, self.das_ms, self.arr_ms);
            for _ in 0..due {
                let _ = intents.try_push(Intent::SoftDrop);
            }
        }

        intents
    }

    /// Feed a level-triggered snapshot: edges become press/release, then the
    /// hold timers advance by `elapsed_ms`.
    pub fn apply_controls(&mut self, inputs: ControlInputs, elapsed_ms: u32) -> Intents {
        let mut intents = Intents::new();
        for control in Control::ALL {
            let now = inputs.get(control);
            let before = self.previous.get(control);
            if now && !before {
                if let Some(intent) = self.press(control) {
                    let _ = intents.try_push(intent);
                }
            } else if !now && before {
                self.release(control);
            } else if now && control.repeats() {
                // Still down: keeps the hold alive under a timeout.
                self.since_refresh_ms = 0;
            }
        }
        self.previous = inputs;

        for intent in self.update(elapsed_ms) {
            let _ = intents.try_push(intent);
        }
        intents
    }

    pub fn reset(&mut self) {
        self.release_all();
        self.since_refresh_ms = 0;
        self.previous = ControlInputs::default();
    }

    fn release_all(&mut self) {
        self.horizontal = None;
        self.horizontal_repeat = Repeat::default();
        self.down_held = false;
        self.down_repeat = Repeat::default();
    }
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::new()
    }
}
