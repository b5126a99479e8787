//! Tripe engine crate.
//!
//! A minimal scene loop: id-keyed scene objects updated on the main thread and
//! drawn at a fixed rate, either cooperatively or from a dedicated render
//! thread. Platform pieces (winit window, wgpu surface) live alongside the
//! core so binaries only wire them together.

pub mod coords;
pub mod device;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod sim;
pub mod surface;
pub mod time;
pub mod window;
