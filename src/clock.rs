//! Time source for the sampling loop
//!
//! The loop only needs "how long since some fixed origin" and a blocking
//! wait. [`SystemClock`] uses the real monotonic clock; [`SimulatedClock`]
//! advances virtual time so runs against fixture files finish instantly.

use std::thread;
use std::time::{Duration, Instant};

pub trait Clock {
    /// Monotonic time since the clock's origin
    fn now(&self) -> Duration;

    /// Block for `duration`
    fn sleep(&mut self, duration: Duration);
}

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

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Virtual clock: time only moves when the loop sleeps (or [`advance`](Self::advance) is called)
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedClock {
    now: Duration,
}

impl SimulatedClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saturates at `Duration::MAX`
    pub fn advance(&mut self, duration: Duration) {
        self.now = self.now.saturating_add(duration);
    }
}

impl Clock for SimulatedClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.advance(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_clock_moves_only_on_sleep() {
        let mut clock = SimulatedClock::new();
        assert_eq!(clock.now(), Duration::ZERO);
        assert_eq!(clock.now(), Duration::ZERO);

        clock.sleep(Duration::from_secs(5));
        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.now(), Duration::from_millis(5_250));
    }

    #[test]
    fn test_simulated_clock_saturates() {
        let mut clock = SimulatedClock::new();
        clock.sleep(Duration::from_secs(5));
        clock.sleep(Duration::MAX);
        clock.sleep(Duration::MAX);
        assert_eq!(clock.now(), Duration::MAX);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let mut clock = SystemClock::new();
        let before = clock.now();
        clock.sleep(Duration::from_millis(5));
        assert!(clock.now() >= before + Duration::from_millis(5));
    }
}
