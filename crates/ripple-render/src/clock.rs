//! Time sources feeding the animation parameter `t_now` (seconds).

use std::time::Instant;

/// Supplies the current animation time in seconds.
pub trait TimeSource {
    fn now_seconds(&mut self) -> f64;
}

/// Wall-clock seconds since construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn now_seconds(&mut self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Deterministic clock for headless runs: yields `start`, then advances by
/// `step` on every read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStepClock {
    current: f64,
    step: f64,
}

impl FixedStepClock {
    pub fn new(start: f64, step: f64) -> Self {
        Self {
            current: start,
            step,
        }
    }

    /// Steps of one sixtieth of a second starting at zero.
    pub fn sixty_hz() -> Self {
        Self::new(0.0, 1.0 / 60.0)
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

impl TimeSource for FixedStepClock {
    fn now_seconds(&mut self) -> f64 {
        let now = self.current;
        self.current += self.step;
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_step_sequence() {
        let mut clock = FixedStepClock::new(1.0, 0.5);
        assert_eq!(clock.now_seconds(), 1.0);
        assert_eq!(clock.now_seconds(), 1.5);
        assert_eq!(clock.now_seconds(), 2.0);
    }

    #[test]
    fn test_monotonic_never_decreases() {
        let mut clock = MonotonicClock::new();
        let a = clock.now_seconds();
        let b = clock.now_seconds();
        assert!(a >= 0.0);
        assert!(b >= a);
    }
}
