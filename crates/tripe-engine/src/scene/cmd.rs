use crate::coords::Vec2;
use crate::paint::Color;

/// Renderer-agnostic draw command.
///
/// Extending the scene:
/// - add a payload struct and a variant here
/// - add a `DrawList::push_*` helper
/// - teach each `DrawingSurface` implementation to draw it
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Circle(CircleCmd),
}

/// Filled circle, positioned by its center.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleCmd {
    pub center: Vec2,
    pub radius: f32,
    pub fill: Color,
}

impl CircleCmd {
    #[inline]
    pub fn new(center: Vec2, radius: f32, fill: Color) -> Self {
        Self { center, radius, fill }
    }
}
