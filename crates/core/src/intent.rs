//! Pending intents between input arrival and the next tick.
//!
//! Input never touches the board directly. It only lands here, and the tick
//! drains this queue.

use arrayvec::ArrayVec;

use crate::types::Intent;

/// Distinct intent kinds; the queue never holds more.
pub const INTENT_KINDS: usize = Intent::ALL.len();

/// Intents queued since the last tick, at most one of each kind.
///
/// A repeated intent keeps its first-arrival position and is otherwise
/// dropped, so a burst of input cannot starve gravity.
#[derive(Debug, Clone, Default)]
pub struct IntentQueue {
    pending: ArrayVec<Intent, INTENT_KINDS>,
}

impl IntentQueue {
    pub fn new() -> Self {
        Self {
            pending: ArrayVec::new(),
        }
    }

    /// Queue `intent`. Returns `false` if one of that kind is already pending.
    pub fn push(&mut self, intent: Intent) -> bool {
        if self.pending.contains(&intent) {
            return false;
        }
        self.pending.push(intent);
        true
    }

    /// Take everything pending, in arrival order.
    pub fn drain(&mut self) -> ArrayVec<Intent, INTENT_KINDS> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
