//! Logical clock collaborator.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::types::Tick;

/// Supplies the current tick. Monotonically non-decreasing.
pub trait Clock: Send + Sync {
    /// The current tick.
    fn now(&self) -> Tick;
}

/// A clock advanced by hand, for tests and simulations.
#[derive(Debug, Default)]
pub struct ManualClock {
    tick: AtomicU64,
}

impl ManualClock {
    /// Create a clock starting at `tick`.
    pub fn new(tick: Tick) -> Self {
        Self {
            tick: AtomicU64::new(tick),
        }
    }

    /// Move the clock forward by `ticks`, saturating at `Tick::MAX`.
    pub fn advance(&self, ticks: Tick) -> Tick {
        let mut current = self.tick.load(Ordering::SeqCst);
        loop {
            let next = current.saturating_add(ticks);
            match self
                .tick
                .compare_exchange(current, next, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return next,
                Err(actual) => current = actual,
            }
        }
    }

    /// Move the clock to `tick`. Values behind the current tick are ignored.
    pub fn set(&self, tick: Tick) -> Tick {
        self.tick.fetch_max(tick, Ordering::SeqCst).max(tick)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Tick {
        self.tick.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_monotonic() {
        let clock = ManualClock::new(5);
        assert_eq!(clock.now(), 5);

        assert_eq!(clock.advance(10), 15);
        assert_eq!(clock.set(3), 15);
        assert_eq!(clock.now(), 15);
        assert_eq!(clock.set(20), 20);
        assert_eq!(clock.now(), 20);
    }

    #[test]
    fn test_manual_clock_saturates() {
        let clock = ManualClock::new(Tick::MAX - 1);
        assert_eq!(clock.advance(5), Tick::MAX);
    }
}
