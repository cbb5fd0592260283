//! Debouncing of rapidly changing input values.
//!
//! [`Debouncer`] is pure bookkeeping: it stamps each pushed value with a
//! generation number and only releases a value whose stamp is still the
//! latest. The caller arms the actual timer (a sleep task that posts the
//! stamp back) so the settling rules stay testable without a clock.

use std::time::Duration;

/// Generation-stamped pending slot with a fixed settling delay.
///
/// The last pushed value always wins: pushing discards whatever was pending
/// before, and a timer firing for a superseded stamp settles to nothing.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    generation: u64,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given settling delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    /// The settling delay a timer armed for [`push`](Self::push) should use.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Register a new value and return the stamp for the timer it arms.
    ///
    /// Any previously pending value is discarded — its timer will fire with
    /// a stale stamp and settle to `None`.
    pub fn push(&mut self, value: T) -> u64 {
        self.generation += 1;
        self.pending = Some(value);
        self.generation
    }

    /// Release the pending value if `stamp` is still the current generation.
    ///
    /// Returns `None` for superseded stamps and for repeat settles of the
    /// same generation — at most one value is emitted per settling period.
    pub fn settle(&mut self, stamp: u64) -> Option<T> {
        if stamp == self.generation {
            self.pending.take()
        } else {
            None
        }
    }

    /// Discard any pending value and invalidate all outstanding stamps.
    pub fn discard(&mut self) {
        self.generation += 1;
        self.pending = None;
    }
}
