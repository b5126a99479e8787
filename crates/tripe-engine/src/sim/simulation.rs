use std::thread;
use std::time::Duration;

use crate::scene::SharedRegistry;
use crate::surface::OpenFlag;
use crate::time::Clock;

use super::{Event, EventSource};

/// Simulation loop configuration.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Sleep between loop iterations.
    pub poll_interval: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { poll_interval: Duration::from_millis(5) }
    }
}

/// Advances every registered object by wall-clock time.
pub struct Simulation<C> {
    registry: SharedRegistry,
    clock: C,
    poll_interval: Duration,
    ticks: u64,
}

impl<C: Clock> Simulation<C> {
    pub fn new(registry: SharedRegistry, clock: C, config: SimulationConfig) -> Self {
        Self {
            registry,
            clock,
            poll_interval: config.poll_interval,
            ticks: 0,
        }
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Updates every object by `elapsed`.
    pub fn update(&mut self, elapsed: Duration) {
        self.registry.for_each_mut(|obj| obj.update(elapsed));
    }

    /// Measures the time since the previous tick and updates every object by it.
    pub fn tick(&mut self) -> Duration {
        let elapsed = self.clock.restart();
        self.update(elapsed);
        self.ticks += 1;
        elapsed
    }

    /// Runs until the window closes. Returns the number of ticks performed.
    pub fn run<E: EventSource>(&mut self, events: &mut E, open: &OpenFlag) -> u64 {
        self.run_with(events, open, |_| {})
    }

    /// Like [`run`](Self::run), calling `after_tick` with each tick's delta.
    ///
    /// The cooperative variant hands the delta to `Renderer::advance` here.
    ///
    /// A `Closed` event closes `open` and ends the loop before the next tick.
    /// The loop also ends if `open` is closed elsewhere.
    pub fn run_with<E, F>(&mut self, events: &mut E, open: &OpenFlag, mut after_tick: F) -> u64
    where
        E: EventSource,
        F: FnMut(Duration),
    {
        let start = self.ticks;
        self.clock.restart();

        while open.is_open() {
            while let Some(event) = events.poll_event() {
                match event {
                    Event::Closed => {
                        log::info!("close requested");
                        open.close();
                    }
                    other => log::trace!("ignoring {other:?}"),
                }
            }

            if !open.is_open() {
                break;
            }

            let elapsed = self.tick();
            after_tick(elapsed);

            if !self.poll_interval.is_zero() {
                thread::sleep(self.poll_interval);
            }
        }

        let ran = self.ticks - start;
        log::debug!("simulation loop stopped after {ran} ticks");
        ran
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::time::Instant;

    use super::*;
    use crate::paint::{Color, RandomColors};
    use crate::render::{Renderer, RendererConfig};
    use crate::scene::objects::{CircleConfig, ColorfulCircle};
    use crate::scene::{DrawCmd, DrawList};
    use crate::surface::HeadlessSurface;
    use crate::time::{FrameClock, ManualClock};

    /// Replays one batch of events per loop iteration.
    struct Script {
        batches: VecDeque<Vec<Event>>,
        current: VecDeque<Event>,
        polls: usize,
    }

    impl Script {
        fn new(batches: Vec<Vec<Event>>) -> Self {
            Self { batches: batches.into(), current: VecDeque::new(), polls: 0 }
        }
    }

    impl EventSource for Script {
        fn poll_event(&mut self) -> Option<Event> {
            if let Some(ev) = self.current.pop_front() {
                return Some(ev);
            }
            // End of this iteration's batch; load the next one for the next call.
            self.polls += 1;
            self.current = self.batches.pop_front().unwrap_or_default().into();
            None
        }
    }

    /// Clock that reports the same delta on every restart.
    struct Steady(Duration);

    impl Clock for Steady {
        fn restart(&mut self) -> Duration {
            self.0
        }
    }

    fn circle_scene(seed: u64) -> SharedRegistry {
        let registry = SharedRegistry::new();
        registry.register(Box::new(ColorfulCircle::new(
            CircleConfig::default(),
            RandomColors::seeded(seed),
        )));
        registry
    }

    fn circle_color(registry: &SharedRegistry) -> Color {
        let mut list = DrawList::new();
        registry.for_each(|obj| obj.draw(&mut list));
        let DrawCmd::Circle(c) = list.iter_in_paint_order().next().cloned().unwrap();
        c.fill
    }

    fn no_sleep() -> SimulationConfig {
        SimulationConfig { poll_interval: Duration::ZERO }
    }

    #[test]
    fn tick_updates_with_clock_delta() {
        let registry = circle_scene(5);
        let clock = ManualClock::new();
        let mut sim = Simulation::new(registry.clone(), clock.clone(), no_sleep());

        clock.advance(Duration::from_millis(499));
        assert_eq!(sim.tick(), Duration::from_millis(499));
        assert_eq!(circle_color(&registry), Color::GREEN);

        clock.advance(Duration::from_millis(1));
        sim.tick();
        assert_ne!(circle_color(&registry), Color::GREEN);
        assert_eq!(sim.ticks(), 2);
    }

    #[test]
    fn close_event_stops_loop_within_one_iteration() {
        let open = OpenFlag::new();
        let mut sim = Simulation::new(circle_scene(1), Steady(Duration::from_millis(5)), no_sleep());
        let mut events = Script::new(vec![
            vec![],
            vec![Event::Focused(true), Event::Resized { width: 10, height: 10 }],
            vec![Event::Closed],
            vec![],
        ]);

        let ticks = sim.run(&mut events, &open);

        // Batches are picked up at the end of each drain, so the close lands in
        // the fourth poll and no tick follows it.
        assert_eq!(ticks, 3);
        assert_eq!(events.polls, 4);
        assert!(!open.is_open());
    }

    #[test]
    fn externally_closed_flag_stops_loop() {
        let open = OpenFlag::new();
        open.close();
        let mut sim = Simulation::new(circle_scene(1), Steady(Duration::from_millis(5)), no_sleep());

        assert_eq!(sim.run(&mut Script::new(vec![]), &open), 0);
    }

    #[test]
    fn cooperative_loop_renders_at_frame_rate() {
        let open = OpenFlag::new();
        let registry = circle_scene(2);
        let surface = HeadlessSurface::new(open.clone());
        let log = surface.log();
        let mut renderer = Renderer::new(surface, registry.clone(), RendererConfig::default());

        // 11 ticks of 5 ms = 55 ms = 3 frames at 60 Hz.
        let mut batches = vec![vec![]; 10];
        batches.push(vec![Event::Closed]);
        let mut events = Script::new(batches);
        let mut sim = Simulation::new(registry, Steady(Duration::from_millis(5)), no_sleep());

        let ticks = sim.run_with(&mut events, &open, |dt| {
            renderer.advance(dt);
        });

        assert_eq!(ticks, 11);
        assert_eq!(log.frame_count(), 3);
        assert_eq!(log.violations(), 0);
    }

    #[test]
    fn threaded_renderer_stops_soon_after_close() {
        let open = OpenFlag::new();
        let registry = circle_scene(4);
        let surface = HeadlessSurface::new(open.clone());
        let log = surface.log();

        let config = RendererConfig::default();
        let poll_interval = config.poll_interval;
        let render = Renderer::new(surface, registry.clone(), config)
            .spawn(FrameClock::new())
            .unwrap();

        let mut batches = vec![vec![]; 20];
        batches.push(vec![Event::Closed]);
        let mut events = Script::new(batches);
        let mut sim = Simulation::new(registry, FrameClock::new(), SimulationConfig::default());

        sim.run(&mut events, &open);
        let closed_at = Instant::now();

        let (_surface, stats) = render.join().unwrap();
        // One poll wait plus at most one pass in flight.
        assert!(closed_at.elapsed() < poll_interval * 10);
        assert_eq!(stats.frames as usize, log.frame_count());
        assert_eq!(log.violations(), 0);
    }
}
