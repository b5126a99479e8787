//! Cooperative variant.
//!
//! One loop on the main thread polls events, updates the scene and hands the
//! same delta to the renderer, which presents whenever a frame is due.

use anyhow::Result;
use tripe::{Stage, build_scene, open_stage};
use tripe_engine::render::{Renderer, RendererConfig};
use tripe_engine::sim::{Simulation, SimulationConfig};
use tripe_engine::time::FrameClock;

fn main() -> Result<()> {
    let Stage { mut host, surface } = open_stage()?;
    let open = host.open_flag();
    let registry = build_scene();

    let mut renderer = Renderer::new(surface, registry.clone(), RendererConfig::default());
    let mut sim = Simulation::new(registry, FrameClock::new(), SimulationConfig::default());

    let ticks = sim.run_with(&mut host, &open, |elapsed| {
        renderer.advance(elapsed);
    });

    log::info!("done: {ticks} updates, {} frames", renderer.stats().frames);
    drop(renderer.into_surface());

    Ok(())
}
