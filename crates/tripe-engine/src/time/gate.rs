use std::time::Duration;

/// What a gate does when one `advance` covers more than one interval.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum StepPolicy {
    /// Fire at most once per call and carry the whole remainder, which may
    /// still exceed the interval.
    SingleFire,
    /// Fire once per whole interval accumulated, leaving less than one
    /// interval behind. Cumulative fires equal `floor(total / interval)`.
    #[default]
    Drain,
}

/// Fixed-timestep accumulator.
///
/// Converts irregular elapsed-time samples into a regular fire rate. Leftover
/// time is carried to the next call instead of being discarded, so the fire
/// rate does not drift with the polling frequency.
///
/// Used for render pacing (`from_rate(60)`) and for per-object cadences such
/// as a colour refresh interval.
#[derive(Debug, Clone)]
pub struct FixedStepGate {
    interval: Duration,
    accumulated: Duration,
    policy: StepPolicy,
}

impl FixedStepGate {
    /// Creates a draining gate firing every `interval`.
    ///
    /// # Panics
    /// Panics if `interval` is zero.
    pub fn new(interval: Duration) -> Self {
        Self::with_policy(interval, StepPolicy::Drain)
    }

    /// Creates a gate with an explicit multi-interval policy.
    ///
    /// # Panics
    /// Panics if `interval` is zero.
    pub fn with_policy(interval: Duration, policy: StepPolicy) -> Self {
        assert!(!interval.is_zero(), "FixedStepGate interval must be non-zero");
        Self {
            interval,
            accumulated: Duration::ZERO,
            policy,
        }
    }

    /// Creates a draining gate firing `hz` times per second.
    ///
    /// The interval is truncated to whole nanoseconds.
    ///
    /// # Panics
    /// Panics if `hz` is zero.
    pub fn from_rate(hz: u32) -> Self {
        assert!(hz > 0, "FixedStepGate rate must be non-zero");
        Self::new(Duration::from_nanos(1_000_000_000 / u64::from(hz)))
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[inline]
    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    #[inline]
    pub fn policy(&self) -> StepPolicy {
        self.policy
    }

    /// Adds `elapsed` and returns how many times the gate fired.
    ///
    /// `SingleFire` returns 0 or 1. `Drain` returns every whole interval
    /// covered by the accumulated time, capped at `u64::MAX`; intervals past
    /// the cap stay accumulated and fire on later calls.
    ///
    /// Accumulated time saturates at `Duration::MAX`.
    pub fn advance(&mut self, elapsed: Duration) -> u64 {
        self.accumulated = self.accumulated.saturating_add(elapsed);

        let interval = self.interval.as_nanos();
        let accumulated = self.accumulated.as_nanos();
        let due = accumulated / interval;

        let fires = match self.policy {
            StepPolicy::SingleFire => due.min(1),
            StepPolicy::Drain => due.min(u128::from(u64::MAX)),
        };

        self.accumulated = duration_from_nanos(accumulated - fires * interval);
        fires as u64
    }

    /// Adds `elapsed` and reports whether the gate fired at least once.
    #[inline]
    pub fn fired(&mut self, elapsed: Duration) -> bool {
        self.advance(elapsed) > 0
    }

    /// Time left until the next fire, assuming no other time is added.
    ///
    /// Zero when a fire is already due (possible under `SingleFire`).
    #[inline]
    pub fn time_until_next(&self) -> Duration {
        self.interval.saturating_sub(self.accumulated)
    }

    /// Drops any accumulated time.
    #[inline]
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}

/// Inverse of `Duration::as_nanos` for values not above `Duration::MAX`.
fn duration_from_nanos(nanos: u128) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    Duration::new((nanos / NANOS_PER_SEC) as u64, (nanos % NANOS_PER_SEC) as u32)
}
