//! Dedicated render thread variant.
//!
//! The main thread polls window events and updates the scene; a render
//! thread owns the GPU surface and presents frames at 60 Hz.

use anyhow::Result;
use tripe::{Stage, build_scene, open_stage};
use tripe_engine::render::{Renderer, RendererConfig};
use tripe_engine::sim::{Simulation, SimulationConfig};
use tripe_engine::time::FrameClock;

fn main() -> Result<()> {
    let Stage { mut host, surface } = open_stage()?;
    let open = host.open_flag();
    let registry = build_scene();

    let render_thread = Renderer::new(surface, registry.clone(), RendererConfig::default())
        .spawn(FrameClock::new())?;

    let mut sim = Simulation::new(registry, FrameClock::new(), SimulationConfig::default());
    let ticks = sim.run(&mut host, &open);

    let (_surface, stats) = render_thread.join()?;
    log::info!("done: {ticks} updates, {} frames", stats.frames);

    Ok(())
}
