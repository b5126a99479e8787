use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Source of elapsed-time deltas.
///
/// `restart()` reports the time elapsed since the previous call (or since
/// construction) and starts measuring again from now.
pub trait Clock: Send {
    fn restart(&mut self) -> Duration;
}

/// Wall clock reporting the time between ticks.
///
/// One clock per loop, so the simulation and render loops do not share
/// delta-time state.
///
/// Delta time is clamped from above to avoid pathological values when the
/// process is paused by the debugger or stalls. There is no lower clamp by
/// default: accumulators downstream must see the real elapsed time or they drift.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with the default upper clamp (250 ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::ZERO, Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            dt_min,
            dt_max,
        }
    }

    /// Restarts the clock and returns the clamped time since the last tick.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;
        dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FrameClock {
    fn restart(&mut self) -> Duration {
        self.tick()
    }
}

/// Deterministic clock driven by hand.
///
/// Clones share the same pending time, so a test can keep one handle and hand
/// another to a loop running on a different thread.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    pending: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `dt` to the time reported by the next `restart()`.
    pub fn advance(&self, dt: Duration) {
        *self.pending.lock() += dt;
    }
}

impl Clock for ManualClock {
    fn restart(&mut self) -> Duration {
        std::mem::take(&mut *self.pending.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_clock_measures_since_last_tick() {
        let mut clock = FrameClock::new();
        std::thread::sleep(Duration::from_millis(5));
        assert!(clock.tick() >= Duration::from_millis(5));
    }

    #[test]
    fn frame_clock_clamps_long_stalls() {
        let mut clock = FrameClock::with_clamps(Duration::ZERO, Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(clock.restart(), Duration::from_millis(1));
    }

    #[test]
    fn manual_clock_reports_and_resets() {
        let handle = ManualClock::new();
        let mut clock = handle.clone();

        handle.advance(Duration::from_millis(3));
        handle.advance(Duration::from_millis(4));

        assert_eq!(clock.restart(), Duration::from_millis(7));
        assert_eq!(clock.restart(), Duration::ZERO);
    }
}
