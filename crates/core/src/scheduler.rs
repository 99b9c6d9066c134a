//! Frame-callback scheduling seam.
//!
//! The game loop asks its scheduler for the next tick and cancels it on stop.
//! Hosts back this with their display loop; tests use [`ManualScheduler`] and
//! call `tick` themselves.

/// Identifies one requested tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(pub u64);

pub trait Scheduler {
    /// Ask for `tick` to be called on the next frame.
    fn request_tick(&mut self) -> TickHandle;

    /// Withdraw a request. Unknown or already-fired handles are ignored.
    fn cancel_tick(&mut self, handle: TickHandle);
}

impl<S: Scheduler + ?Sized> Scheduler for &mut S {
    fn request_tick(&mut self) -> TickHandle {
        (**self).request_tick()
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        (**self).cancel_tick(handle)
    }
}

/// Records requests without driving anything.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Option<TickHandle>,
    requested: u32,
    cancelled: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The outstanding request, if any.
    pub fn pending(&self) -> Option<TickHandle> {
        self.pending
    }

    /// Consume the outstanding request, as a display loop would when it fires.
    pub fn fire(&mut self) -> Option<TickHandle> {
        self.pending.take()
    }

    pub fn requested(&self) -> u32 {
        self.requested
    }

    pub fn cancelled(&self) -> u32 {
        self.cancelled
    }
}

impl Scheduler for ManualScheduler {
    fn request_tick(&mut self) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        self.pending = Some(handle);
        self.requested += 1;
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.cancelled += 1;
        }
    }
}
