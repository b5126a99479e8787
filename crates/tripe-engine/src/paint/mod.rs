//! Paint model shared between scene objects and surfaces.
//!
//! Scope:
//! - color representation (linear premultiplied alpha)
//! - color sources used by animated objects

pub mod color;
pub mod source;

pub use color::Color;
pub use source::{ColorSource, RandomColors};
