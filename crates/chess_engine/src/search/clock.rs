//! Clocks for the iterative deepening driver
//!
//! The driver only ever asks "how far along are we", so a clock is a
//! monotonic offset from an arbitrary origin. Tests inject a
//! [`SteppingClock`] to make depth counts independent of machine speed.

use std::cell::Cell;
use std::time::Duration;

use instant::Instant;

pub trait Clock {
    /// Monotonic time since the clock's origin
    fn now(&self) -> Duration;
}

/// Wall clock
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Synthetic clock that advances by a fixed step every time it is read
#[derive(Debug)]
pub struct SteppingClock {
    now: Cell<Duration>,
    step: Duration,
}

impl SteppingClock {
    pub fn new(step: Duration) -> Self {
        Self {
            now: Cell::new(Duration::ZERO),
            step,
        }
    }

    /// A clock that never advances
    pub fn frozen() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Current reading without advancing
    pub fn peek(&self) -> Duration {
        self.now.get()
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> Duration {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stepping_clock_advances_per_read() {
        let clock = SteppingClock::new(Duration::from_millis(10));
        assert_eq!(clock.now(), Duration::ZERO);
        assert_eq!(clock.now(), Duration::from_millis(10));
        clock.advance(Duration::from_millis(5));
        assert_eq!(clock.peek(), Duration::from_millis(25));
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
