//! Quiet-window debouncing driven by an external clock.
//!
//! Nothing here sleeps or spawns: callers feed `Instant`s in and call
//! [`Debouncer::poll`] from their event loop, using [`Debouncer::deadline`]
//! to know when the next poll is due.

use std::time::{Duration, Instant};

/// Quiet period before typed search text is applied.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    window: Duration,
    raw: T,
    settled: T,
    deadline: Option<Instant>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    pub fn new(initial: T, window: Duration) -> Self {
        Self {
            window,
            raw: initial.clone(),
            settled: initial,
            deadline: None,
        }
    }

    /// Records a new raw value and re-arms the timer.
    pub fn input(&mut self, value: T, now: Instant) {
        self.raw = value;
        self.deadline = Some(now + self.window);
    }

    /// Emits the raw value once the window has elapsed and it differs from
    /// the last emitted one.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                self.settle()
            }
            _ => None,
        }
    }

    /// Applies the raw value immediately, skipping the remaining window.
    pub fn flush(&mut self) -> Option<T> {
        self.deadline = None;
        self.settle()
    }

    /// Sets raw and settled to `value` without emitting.
    pub fn reset(&mut self, value: T) {
        self.deadline = None;
        self.raw = value.clone();
        self.settled = value;
    }

    /// Drops the pending timer; the raw value is kept.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn raw(&self) -> &T {
        &self.raw
    }

    pub fn settled(&self) -> &T {
        &self.settled
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    fn settle(&mut self) -> Option<T> {
        if self.raw == self.settled {
            return None;
        }
        self.settled = self.raw.clone();
        Some(self.settled.clone())
    }
}
