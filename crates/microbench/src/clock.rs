//! Monotonic time sources for measurement
//!
//! The sampler only ever asks a clock for a tick count and for the conversion
//! of a tick span into nanoseconds. Reads are non-blocking and have no
//! observable side effects.

use std::cell::Cell;
use std::time::Instant;

/// A monotonic tick source.
pub trait Clock {
    /// Current tick count. Never decreases.
    fn now(&self) -> u64;

    /// Convert a span of ticks into nanoseconds.
    fn ticks_to_ns(&self, ticks: u64) -> u64;
}

/// Wall clock backed by [`Instant`], one tick per nanosecond.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }

    fn ticks_to_ns(&self, ticks: u64) -> u64 {
        ticks
    }
}

/// Clock that only moves when told to.
///
/// Measured operations can advance it by a fixed cost per call, which makes
/// the whole sampling loop deterministic.
///
/// # Examples
///
/// ```
/// use microbench::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::with_ns_per_tick(10);
/// clock.advance(5);
/// assert_eq!(clock.now(), 5);
/// assert_eq!(clock.ticks_to_ns(clock.now()), 50);
/// ```
#[derive(Debug)]
pub struct ManualClock {
    ticks: Cell<u64>,
    ns_per_tick: u64,
}

impl ManualClock {
    /// Manual clock with one tick per nanosecond.
    pub fn new() -> Self {
        Self::with_ns_per_tick(1)
    }

    pub fn with_ns_per_tick(ns_per_tick: u64) -> Self {
        Self {
            ticks: Cell::new(0),
            ns_per_tick,
        }
    }

    /// Move the clock forward, saturating at `u64::MAX`.
    pub fn advance(&self, ticks: u64) {
        self.ticks.set(self.ticks.get().saturating_add(ticks));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.ticks.get()
    }

    fn ticks_to_ns(&self, ticks: u64) -> u64 {
        ticks.saturating_mul(self.ns_per_tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_clock_never_decreases() {
        let clock = MonotonicClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
        assert_eq!(clock.ticks_to_ns(1234), 1234);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), 0);
        clock.advance(100);
        clock.advance(23);
        assert_eq!(clock.now(), 123);
    }

    #[test]
    fn test_manual_clock_saturates() {
        let clock = ManualClock::with_ns_per_tick(2);
        clock.advance(u64::MAX);
        clock.advance(1);
        assert_eq!(clock.now(), u64::MAX);
        assert_eq!(clock.ticks_to_ns(u64::MAX), u64::MAX);
    }
}
