//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue for a window
//! - configuring the swapchain and acquiring frames
//! - `GpuSurface`, the `DrawingSurface` that draws scene commands with wgpu

mod circle;
mod gpu;
mod init;
mod surface;

pub use gpu::{Gpu, GpuFrame, SurfaceErrorAction};
pub use init::GpuInit;
pub use surface::GpuSurface;
