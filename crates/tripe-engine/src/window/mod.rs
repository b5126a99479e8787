//! Window + event polling.
//!
//! Owns the `winit` EventLoop and Window and exposes them as an
//! `EventSource` plus a shareable window handle for GPU surfaces.

mod host;

pub use host::{WindowConfig, WindowHost};
