//! Coordinate types shared by scene objects and surfaces.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! GPU surfaces convert to NDC in shaders using a viewport uniform.

mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::Viewport;
