//! Frame-callback scheduler for the terminal frame loop.
//!
//! The loop polls [`FrameScheduler::take_due`] once per frame and calls
//! `tick` only when the engine asked for one.

use crate::core::{Scheduler, TickHandle};

#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    pending: Option<TickHandle>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consume the pending request, if any.
    pub fn take_due(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

impl Scheduler for FrameScheduler {
    fn request_tick(&mut self) -> TickHandle {
        if let Some(handle) = self.pending {
            return handle;
        }
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_is_coalesced_until_taken() {
        let mut sched = FrameScheduler::new();
        let a = sched.request_tick();
        let b = sched.request_tick();
        assert_eq!(a, b);
        assert!(sched.take_due());
        assert!(!sched.take_due());
    }

    #[test]
    fn cancel_clears_pending() {
        let mut sched = FrameScheduler::new();
        let handle = sched.request_tick();
        sched.cancel_tick(handle);
        assert!(!sched.is_pending());
    }
}
