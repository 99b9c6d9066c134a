//! Gravity schedule - how often the active piece falls on its own.

use crate::types::{GRAVITY_INTERVALS, GRAVITY_MIN_MS, GRAVITY_STEP_MS, LINES_PER_LEVEL};

/// How the gravity interval is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GravityMode {
    /// Same interval at every level.
    Fixed { interval_ms: u32 },
    /// Interval shrinks per level (see [`interval_for_level`]).
    #[default]
    Leveled,
}

/// Gravity interval for a level.
///
/// Levels past the table keep shrinking by `GRAVITY_STEP_MS` down to
/// `GRAVITY_MIN_MS`.
pub fn interval_for_level(level: u32) -> u32 {
    if let Some(&ms) = GRAVITY_INTERVALS.get(level as usize) {
        return ms;
    }
    let last = GRAVITY_INTERVALS[GRAVITY_INTERVALS.len() - 1];
    let extra = level - (GRAVITY_INTERVALS.len() as u32 - 1);
    last.saturating_sub(extra.saturating_mul(GRAVITY_STEP_MS))
        .max(GRAVITY_MIN_MS)
}

/// Level reached after `lines` cleared lines.
pub fn level_for_lines(lines: u32, lines_per_level: u32) -> u32 {
    lines / lines_per_level.max(1)
}

/// Accumulates elapsed time and fires once per interval.
#[derive(Debug, Clone)]
pub struct Gravity {
    mode: GravityMode,
    lines_per_level: u32,
    accumulated_ms: u32,
}

impl Gravity {
    pub fn new(mode: GravityMode, lines_per_level: u32) -> Self {
        Self {
            mode,
            lines_per_level,
            accumulated_ms: 0,
        }
    }

    pub fn mode(&self) -> GravityMode {
        self.mode
    }

    pub fn level(&self, lines: u32) -> u32 {
        level_for_lines(lines, self.lines_per_level)
    }

    /// Current interval given the total cleared lines.
    pub fn interval_ms(&self, lines: u32) -> u32 {
        match self.mode {
            GravityMode::Fixed { interval_ms } => interval_ms.max(1),
            GravityMode::Leveled => interval_for_level(self.level(lines)),
        }
    }

    /// Advance by `elapsed_ms`. Returns `true` when a downward shift is due;
    /// the accumulator restarts from zero in that case.
    pub fn advance(&mut self, elapsed_ms: u32, lines: u32) -> bool {
        self.accumulated_ms = self.accumulated_ms.saturating_add(elapsed_ms);
        if self.accumulated_ms >= self.interval_ms(lines) {
            self.accumulated_ms = 0;
            return true;
        }
        false
    }

    pub fn accumulated_ms(&self) -> u32 {
        self.accumulated_ms
    }

    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self::new(GravityMode::Leveled, LINES_PER_LEVEL)
    }
}
