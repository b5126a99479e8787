use crate::coords::Vec2;
use crate::paint::Color;

use super::{CircleCmd, DrawCmd};

/// Z-ordering key for draw items.
///
/// Higher values appear on top of lower values.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);

/// Recorded draw stream for one frame.
///
/// Objects push commands in whatever order the registry visits them; the
/// renderer replays them back-to-front by z-index, keeping insertion order
/// within a layer.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<(ZIndex, DrawCmd)>,
    sorted: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.sorted = true;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let in_order = self.items.last().is_none_or(|(last, _)| *last <= z);
        self.sorted &= in_order;
        self.items.push((z, cmd));
    }

    /// Records a solid circle.
    #[inline]
    pub fn push_circle(&mut self, z: ZIndex, center: Vec2, radius: f32, fill: Color) {
        self.push(z, DrawCmd::Circle(CircleCmd::new(center, radius, fill)));
    }

    /// Iterates commands in paint order (back-to-front).
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawCmd> {
        if !self.sorted {
            // Stable: equal z keeps insertion order.
            self.items.sort_by_key(|(z, _)| *z);
            self.sorted = true;
        }
        self.items.iter().map(|(_, cmd)| cmd)
    }
}
