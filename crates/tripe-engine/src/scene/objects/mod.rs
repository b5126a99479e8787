//! Concrete scene objects.

mod circle;

pub use circle::{CircleConfig, ColorfulCircle};
