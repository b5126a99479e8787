use std::fmt;
use std::time::Duration;

use super::DrawList;

/// Stable identity of a scene object.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ObjectId(pub i32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A unit with stable identity that can draw itself and advance over time.
///
/// Objects are owned by an [`ObjectRegistry`](super::ObjectRegistry) and may be
/// visited from the simulation thread (`update`) and the render thread (`draw`),
/// hence the `Send` bound. The registry serializes those visits.
pub trait SceneObject: Send {
    /// Returns the identity assigned at construction. Must never change.
    fn id(&self) -> ObjectId;

    /// Records the object's visual representation.
    ///
    /// Only writes to `list`; must not block.
    fn draw(&self, list: &mut DrawList);

    /// Advances internal state by the wall-clock delta `elapsed`.
    fn update(&mut self, elapsed: Duration);
}
