//! Drawing surfaces.
//!
//! A surface is the window/canvas a renderer clears, draws to and presents.
//! Implementations:
//! - `device::GpuSurface`: wgpu swapchain on a winit window
//! - `HeadlessSurface`: records frames in memory (tests, headless runs)

mod headless;
mod open;

pub use headless::{HeadlessSurface, RecordedFrame, SurfaceLog};
pub use open::OpenFlag;

use crate::paint::Color;
use crate::scene::DrawCmd;

/// Target of a render pass.
///
/// A surface is bound to one thread at a time: `activate(true)` claims it for
/// the calling thread and every other call must come from that thread until
/// `activate(false)`. Renderers move the surface into the thread that uses it.
pub trait DrawingSurface {
    /// Claims (`true`) or releases (`false`) the surface for the calling thread.
    fn activate(&mut self, active: bool);

    /// Starts a frame filled with `color`.
    fn clear(&mut self, color: Color);

    fn draw(&mut self, cmd: &DrawCmd);

    /// Presents the frame started by the last `clear`.
    fn display(&mut self);

    /// Whether the underlying window is still open.
    fn is_open(&self) -> bool;
}
