//! Frame orchestration.
//!
//! The `Renderer` turns the shared scene into frames on a `DrawingSurface`,
//! paced by a `FixedStepGate`:
//! - cooperative mode: `Renderer::advance` from the loop that drives updates
//! - dedicated mode: `Renderer::run` / `Renderer::spawn` on a render thread

mod renderer;
mod thread;

pub use renderer::{RenderStats, Renderer, RendererConfig};
pub use thread::RenderThread;
