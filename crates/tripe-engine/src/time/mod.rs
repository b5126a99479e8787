//! Time subsystem.
//!
//! Provides stable, testable timing utilities without coupling to the runtime.
//! Intended usage:
//! - one `Clock` per loop (simulation or render), queried once per iteration
//! - one `FixedStepGate` per cadence (frame rate, refresh interval, ...)

mod clock;
mod gate;

pub use clock::{Clock, FrameClock, ManualClock};
pub use gate::{FixedStepGate, StepPolicy};
