//! Simulation loop.
//!
//! Drives `SceneObject::update` from the main thread and watches an event
//! source for the window closing.

mod event;
mod simulation;

pub use event::{Event, EventSource};
pub use simulation::{Simulation, SimulationConfig};
