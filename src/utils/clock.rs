//! Time source for reward accrual.
//!
//! The accumulator is a lazy function of elapsed seconds, never a scheduled
//! task, so the only thing the pool needs from its environment is "what
//! time is it now". Tests drive a [`ManualClock`] forward the way the
//! original harness warped chain time.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Source of the current time in whole seconds.
pub trait Clock: Send + Sync {
    /// Current time, seconds since the epoch.
    fn now(&self) -> u64;
}

/// Wall-clock time via chrono.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        u64::try_from(Utc::now().timestamp()).unwrap_or(0)
    }
}

/// A clock that only moves when told to. Shared with the pool via `Arc`,
/// advanced from the test or simulation driving it.
pub struct ManualClock {
    /// Current time in seconds.
    seconds: AtomicU64,
}

impl ManualClock {
    /// Creates a clock frozen at `start` seconds.
    #[must_use]
    pub const fn new(start: u64) -> Self {
        Self {
            seconds: AtomicU64::new(start),
        }
    }

    /// Moves the clock forward by `secs`.
    pub fn advance(&self, secs: u64) {
        self.seconds.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.seconds.load(Ordering::SeqCst)
    }
}
