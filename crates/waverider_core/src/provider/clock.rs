//! Wall-clock sources for session timestamps.

use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current time in Unix epoch milliseconds.
pub trait Clock {
    fn now_epoch_ms(&self) -> i64;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_epoch_ms(&self) -> i64 {
        (**self).now_epoch_ms()
    }
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> i64 {
        // A clock set before 1970 reads as the epoch itself.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Deterministic clock: returns `start`, then advances by `step_ms` per read.
#[derive(Debug, Clone)]
pub struct SteppingClock {
    next: Cell<i64>,
    step_ms: i64,
}

impl SteppingClock {
    pub fn new(start_epoch_ms: i64, step_ms: i64) -> Self {
        Self {
            next: Cell::new(start_epoch_ms),
            step_ms,
        }
    }

    /// A clock frozen at `epoch_ms`.
    pub fn fixed(epoch_ms: i64) -> Self {
        Self::new(epoch_ms, 0)
    }
}

impl Clock for SteppingClock {
    fn now_epoch_ms(&self) -> i64 {
        let now = self.next.get();
        self.next.set(now.saturating_add(self.step_ms));
        now
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, SteppingClock, SystemClock};

    #[test]
    fn stepping_clock_advances_per_read() {
        let clock = SteppingClock::new(1_700_000_000_000, 1_000);
        assert_eq!(clock.now_epoch_ms(), 1_700_000_000_000);
        assert_eq!(clock.now_epoch_ms(), 1_700_000_001_000);
    }

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now_epoch_ms() > 1_577_836_800_000);
    }
}
