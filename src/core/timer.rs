//! Cancellable one-shot timers on an externally supplied clock.
//!
//! The controller holds one [`Timer`] per purpose.  Scheduling replaces
//! whatever was pending, so only the most recent request can ever fire.
//! Time is a plain [`Duration`] since some host-defined epoch; nothing here
//! reads the wall clock.

use std::time::Duration;

/// Identifies one scheduled firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    pub id: u64,
    pub deadline: Duration,
}

/// A single cancel-and-replace timer slot.
#[derive(Debug, Default)]
pub struct Timer {
    pending: Option<TimerHandle>,
    next_id: u64,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a firing `delay` after `now`, replacing any pending one.
    pub fn schedule(&mut self, now: Duration, delay: Duration) -> TimerHandle {
        self.next_id = self.next_id.wrapping_add(1);
        let handle = TimerHandle {
            id: self.next_id,
            deadline: now.saturating_add(delay),
        };
        self.pending = Some(handle);
        handle
    }

    /// Drop the pending firing, returning it if there was one.
    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consume the pending firing if its deadline has been reached.
    pub fn take_due(&mut self, now: Duration) -> Option<TimerHandle> {
        match self.pending {
            Some(handle) if handle.deadline <= now => self.pending.take(),
            _ => None,
        }
    }
}
