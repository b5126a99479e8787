use std::thread;
use std::time::Duration;

use crate::paint::Color;
use crate::scene::{DrawList, SharedRegistry};
use crate::surface::DrawingSurface;
use crate::time::{Clock, FixedStepGate};

/// Renderer configuration.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Target frames per second.
    pub frame_rate: u32,

    pub clear_color: Color,

    /// Upper bound on how long the dedicated loop waits between checks.
    ///
    /// Also bounds how long the loop takes to notice the surface closing.
    pub poll_interval: Duration,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            clear_color: Color::BLACK,
            poll_interval: Duration::from_millis(5),
        }
    }
}

/// Counters kept by a renderer.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct RenderStats {
    /// Frames presented.
    pub frames: u64,

    /// Gate fires folded into an already scheduled pass (one pass per advance).
    pub coalesced: u64,
}

/// Draws every registered object onto a surface at a fixed rate.
///
/// Each pass is atomic with respect to the scene: objects are recorded into a
/// draw list while the registry is locked, then the surface is cleared, drawn
/// and presented without touching the registry again.
pub struct Renderer<S> {
    surface: S,
    registry: SharedRegistry,
    gate: FixedStepGate,
    clear_color: Color,
    poll_interval: Duration,
    list: DrawList,
    active: bool,
    stats: RenderStats,
}

impl<S: DrawingSurface> Renderer<S> {
    /// # Panics
    /// Panics if `config.frame_rate` is zero.
    pub fn new(surface: S, registry: SharedRegistry, config: RendererConfig) -> Self {
        Self {
            surface,
            registry,
            gate: FixedStepGate::from_rate(config.frame_rate),
            clear_color: config.clear_color,
            poll_interval: config.poll_interval,
            list: DrawList::new(),
            active: false,
            stats: RenderStats::default(),
        }
    }

    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[inline]
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Performs one clear / draw-all / display pass.
    ///
    /// Claims the surface for the calling thread on first use.
    pub fn render(&mut self) {
        self.ensure_active();

        self.list.clear();
        let list = &mut self.list;
        self.registry.for_each(|obj| obj.draw(list));

        self.surface.clear(self.clear_color);
        for cmd in self.list.iter_in_paint_order() {
            self.surface.draw(cmd);
        }
        self.surface.display();

        self.stats.frames += 1;
        log::trace!("frame {} presented ({} draw cmds)", self.stats.frames, self.list.len());
    }

    /// Cooperative mode: feeds `elapsed` to the frame gate and renders once if
    /// it fired, however many intervals were covered.
    ///
    /// Returns whether a frame was presented.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        let fires = self.gate.advance(elapsed);
        if fires == 0 {
            return false;
        }

        self.stats.coalesced = self.stats.coalesced.saturating_add(fires - 1);
        self.render();
        true
    }

    /// Dedicated mode: renders on the calling thread until the surface closes.
    ///
    /// Between checks the loop sleeps until the next frame is due, capped by
    /// the poll interval. Returns the released surface and final counters.
    pub fn run(mut self, mut clock: impl Clock) -> (S, RenderStats) {
        log::info!(
            "render loop started on {:?} ({} Hz)",
            thread::current().name().unwrap_or("<unnamed>"),
            Duration::from_secs(1).as_nanos() / self.gate.interval().as_nanos().max(1),
        );

        self.ensure_active();
        clock.restart();

        while self.surface.is_open() {
            let elapsed = clock.restart();
            self.advance(elapsed);

            let wait = self.gate.time_until_next().min(self.poll_interval);
            if !wait.is_zero() {
                thread::sleep(wait);
            }
        }

        let stats = self.stats;
        log::debug!("render loop stopped: {stats:?}");
        (self.into_surface(), stats)
    }

    /// Releases the surface from the current thread and returns it.
    pub fn into_surface(mut self) -> S {
        if self.active {
            self.surface.activate(false);
        }
        self.surface
    }

    fn ensure_active(&mut self) {
        if !self.active {
            self.surface.activate(true);
            self.active = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::RandomColors;
    use crate::scene::objects::{CircleConfig, ColorfulCircle};
    use crate::scene::{DrawCmd, ObjectId};
    use crate::surface::{HeadlessSurface, OpenFlag};
    use crate::time::ManualClock;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn scene_with_circles(ids: &[i32]) -> SharedRegistry {
        let registry = SharedRegistry::new();
        for &id in ids {
            let config = CircleConfig { id: ObjectId(id), ..CircleConfig::default() };
            registry.register(Box::new(ColorfulCircle::new(config, RandomColors::seeded(0))));
        }
        registry
    }

    #[test]
    fn render_pass_is_clear_draw_all_display() {
        let surface = HeadlessSurface::new(OpenFlag::new());
        let log = surface.log();
        let mut renderer =
            Renderer::new(surface, scene_with_circles(&[1, 2, 3]), RendererConfig::default());

        renderer.render();

        let frames = log.frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].clear, Color::BLACK);
        assert_eq!(frames[0].cmds.len(), 3);
        assert!(frames[0].cmds.iter().all(|DrawCmd::Circle(c)| c.fill == Color::GREEN));
        assert_eq!(log.violations(), 0);
        assert!(renderer.surface().is_active());
    }

    #[test]
    fn advance_renders_when_frame_is_due() {
        let surface = HeadlessSurface::new(OpenFlag::new());
        let log = surface.log();
        let mut renderer = Renderer::new(surface, scene_with_circles(&[1]), RendererConfig::default());

        assert!(!renderer.advance(ms(10)));
        assert_eq!(log.frame_count(), 0);
        assert!(renderer.advance(ms(10)));
        assert_eq!(log.frame_count(), 1);
    }

    #[test]
    fn long_stall_renders_once() {
        let surface = HeadlessSurface::new(OpenFlag::new());
        let log = surface.log();
        let mut renderer = Renderer::new(surface, scene_with_circles(&[1]), RendererConfig::default());

        assert!(renderer.advance(ms(100)));
        assert_eq!(log.frame_count(), 1);
        assert_eq!(renderer.stats(), RenderStats { frames: 1, coalesced: 5 });
    }

    #[test]
    fn empty_scene_still_clears_and_presents() {
        let surface = HeadlessSurface::new(OpenFlag::new());
        let log = surface.log();
        let config = RendererConfig { clear_color: Color::GREEN, ..RendererConfig::default() };
        let mut renderer = Renderer::new(surface, SharedRegistry::new(), config);

        renderer.render();

        let frames = log.frames();
        assert_eq!(frames[0].clear, Color::GREEN);
        assert!(frames[0].cmds.is_empty());
    }

    #[test]
    fn run_returns_once_surface_is_closed() {
        let open = OpenFlag::new();
        open.close();
        let surface = HeadlessSurface::new(open);
        let renderer = Renderer::new(surface, scene_with_circles(&[1]), RendererConfig::default());

        let (surface, stats) = renderer.run(ManualClock::new());
        assert_eq!(stats.frames, 0);
        assert!(!surface.is_active());
    }

    #[test]
    fn draws_see_updates_between_passes() {
        let registry = scene_with_circles(&[1]);
        let surface = HeadlessSurface::new(OpenFlag::new());
        let log = surface.log();
        let mut renderer = Renderer::new(surface, registry.clone(), RendererConfig::default());

        renderer.render();
        registry.for_each_mut(|obj| obj.update(ms(500)));
        renderer.render();

        let frames = log.frames();
        let DrawCmd::Circle(before) = &frames[0].cmds[0];
        let DrawCmd::Circle(after) = &frames[1].cmds[0];
        assert_eq!(before.fill, Color::GREEN);
        assert_ne!(after.fill, Color::GREEN);
    }
}
