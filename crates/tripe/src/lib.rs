//! Setup shared by the `tripe` binaries.

use anyhow::Result;
use tripe_engine::device::{GpuInit, GpuSurface};
use tripe_engine::logging::{LoggingConfig, init_logging};
use tripe_engine::paint::RandomColors;
use tripe_engine::scene::objects::{CircleConfig, ColorfulCircle};
use tripe_engine::scene::SharedRegistry;
use tripe_engine::window::{WindowConfig, WindowHost};

/// Opened window plus a GPU surface on it, ready to hand to a renderer.
pub struct Stage {
    pub host: WindowHost,
    pub surface: GpuSurface,
}

/// Initializes logging, opens the window and creates its GPU surface.
pub fn open_stage() -> Result<Stage> {
    init_logging(LoggingConfig::default());

    let host = WindowHost::open(WindowConfig::default())?;
    let surface = pollster::block_on(GpuSurface::new(
        host.window(),
        host.open_flag(),
        GpuInit::default().with_vsync(true),
    ))?;

    Ok(Stage { host, surface })
}

/// The scene: one circle that changes color twice a second.
pub fn build_scene() -> SharedRegistry {
    let registry = SharedRegistry::new();
    let circle = ColorfulCircle::new(CircleConfig::default(), RandomColors::from_entropy());
    if !registry.register(Box::new(circle)) {
        log::warn!("circle was not registered");
    }
    registry
}
