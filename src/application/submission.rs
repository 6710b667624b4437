//! Timing primitives for the simulated submission delay.
//!
//! The event loop is single threaded, so the delay is not a sleeping task:
//! it is a [`SubmitTimer`] that is polled against a [`Clock`] whenever the
//! loop wakes up. Tests swap in a [`ManualClock`] and advance it by hand.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Delay applied when none is configured.
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(500);

/// Source of the current time.
pub trait Clock: fmt::Debug {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
///
/// Clones share the same offset, so a test can keep one handle while the
/// application owns another.
///
/// # Examples
///
/// ```
/// use jobform::application::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let start = clock.now();
/// clock.advance(Duration::from_millis(250));
/// assert_eq!(clock.now() - start, Duration::from_millis(250));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }
}

/// Outcome of polling a [`SubmitTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Still waiting; carries the time left.
    Pending(Duration),
    Elapsed,
    Cancelled,
}

/// One-shot deadline started when a submission is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTimer {
    started_at: Instant,
    delay: Duration,
    cancelled: bool,
}

impl SubmitTimer {
    pub fn start(now: Instant, delay: Duration) -> Self {
        Self {
            started_at: now,
            delay,
            cancelled: false,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.started_at + self.delay
    }

    pub fn poll(&self, now: Instant) -> TimerState {
        if self.cancelled {
            return TimerState::Cancelled;
        }
        match self.deadline().checked_duration_since(now) {
            Some(remaining) if !remaining.is_zero() => TimerState::Pending(remaining),
            _ => TimerState::Elapsed,
        }
    }

    /// Stops the timer; later polls report [`TimerState::Cancelled`].
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
