//! Clocks and debounce timers
//!
//! The control never sleeps or spawns: it records deadlines and the host's
//! poll fires them once they pass. A [`Debouncer`] holds at most one
//! deadline, so scheduling again restarts the delay (trailing debounce).

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

// ─────────────────────────────────────────────────────────────────────────────
// Clocks
// ─────────────────────────────────────────────────────────────────────────────

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a host can keep one handle and give
/// another to the control.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    /// Start at the current instant.
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Debouncer
// ─────────────────────────────────────────────────────────────────────────────

/// A single-slot trailing debounce timer.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Default delay of this timer.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// (Re)start the timer with the default delay.
    pub fn schedule(&mut self, now: Instant) {
        self.schedule_after(now, self.delay);
    }

    /// (Re)start the timer with a custom delay, replacing any pending deadline.
    pub fn schedule_after(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume the deadline if it has passed. Returns whether the timer fired.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(100);

    #[test]
    fn test_fires_after_delay() {
        let clock = ManualClock::new();
        let mut timer = Debouncer::new(DELAY);
        timer.schedule(clock.now());

        clock.advance(Duration::from_millis(99));
        assert!(!timer.fire_if_due(clock.now()));

        clock.advance(Duration::from_millis(1));
        assert!(timer.fire_if_due(clock.now()));
        assert!(!timer.is_pending());
        assert!(!timer.fire_if_due(clock.now()));
    }

    #[test]
    fn test_reschedule_restarts_delay() {
        let clock = ManualClock::new();
        let mut timer = Debouncer::new(DELAY);
        timer.schedule(clock.now());
        clock.advance(Duration::from_millis(80));
        timer.schedule(clock.now());
        clock.advance(Duration::from_millis(80));
        assert!(!timer.fire_if_due(clock.now()));
        clock.advance(Duration::from_millis(20));
        assert!(timer.fire_if_due(clock.now()));
    }

    #[test]
    fn test_cancel() {
        let clock = ManualClock::new();
        let mut timer = Debouncer::new(DELAY);
        timer.schedule_after(clock.now(), Duration::from_millis(5));
        timer.cancel();
        clock.advance(DELAY);
        assert!(!timer.fire_if_due(clock.now()));
        assert_eq!(timer.deadline(), None);
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        let before = clock.now();
        handle.advance(Duration::from_secs(1));
        assert_eq!(clock.now(), before + Duration::from_secs(1));
    }
}
