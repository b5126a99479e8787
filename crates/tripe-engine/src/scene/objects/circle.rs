use std::time::Duration;

use crate::coords::Vec2;
use crate::paint::{Color, ColorSource};
use crate::scene::{DrawList, ObjectId, SceneObject, ZIndex};
use crate::time::FixedStepGate;

/// Construction parameters for [`ColorfulCircle`].
#[derive(Debug, Clone)]
pub struct CircleConfig {
    pub id: ObjectId,
    pub center: Vec2,
    pub radius: f32,
    /// How often the fill color is replaced.
    pub refresh: Duration,
    pub initial_color: Color,
    pub z: ZIndex,
}

impl Default for CircleConfig {
    fn default() -> Self {
        Self {
            id: ObjectId(1),
            center: Vec2::new(100.0, 100.0),
            radius: 100.0,
            refresh: Duration::from_millis(500),
            initial_color: Color::GREEN,
            z: ZIndex::default(),
        }
    }
}

/// Circle whose fill color is replaced every refresh interval.
pub struct ColorfulCircle {
    id: ObjectId,
    center: Vec2,
    radius: f32,
    z: ZIndex,
    color: Color,
    refresh: FixedStepGate,
    colors: Box<dyn ColorSource>,
}

impl ColorfulCircle {
    /// # Panics
    /// Panics if `config.refresh` is zero.
    pub fn new(config: CircleConfig, colors: impl ColorSource + 'static) -> Self {
        Self {
            id: config.id,
            center: config.center,
            radius: config.radius,
            z: config.z,
            color: config.initial_color,
            refresh: FixedStepGate::new(config.refresh),
            colors: Box::new(colors),
        }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }
}

impl SceneObject for ColorfulCircle {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn draw(&self, list: &mut DrawList) {
        list.push_circle(self.z, self.center, self.radius, self.color);
    }

    fn update(&mut self, elapsed: Duration) {
        let fires = self.refresh.advance(elapsed);
        if fires == 0 {
            return;
        }

        // Only the last color of a burst is ever visible, but each fire still
        // consumes one so a seeded run is independent of the update cadence.
        for _ in 0..fires {
            self.color = self.colors.next_color();
        }
        log::trace!("circle {} recolored ({fires} refresh)", self.id);
    }
}
