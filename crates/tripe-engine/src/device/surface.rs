use std::sync::Arc;
use std::thread::{self, ThreadId};

use anyhow::Result;
use winit::window::Window;

use crate::coords::Viewport;
use crate::paint::Color;
use crate::scene::{CircleCmd, DrawCmd};
use crate::surface::{DrawingSurface, OpenFlag};

use super::circle::{CirclePass, CircleRenderer};
use super::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};

/// `DrawingSurface` backed by a wgpu swapchain on a winit window.
///
/// `clear` acquires the next swapchain image, `draw` batches commands, and
/// `display` encodes one clear pass plus one pass per shape kind, then
/// presents. Resizes are picked up from the window at the start of a frame.
///
/// Closing: a fatal surface error closes the shared `OpenFlag`, which stops
/// the render and simulation loops alike.
pub struct GpuSurface {
    window: Arc<Window>,
    gpu: Gpu,
    open: OpenFlag,
    owner: Option<ThreadId>,

    frame: Option<GpuFrame>,
    clear: Color,
    circles: Vec<CircleCmd>,
    circle_renderer: CircleRenderer,
}

impl GpuSurface {
    pub async fn new(window: Arc<Window>, open: OpenFlag, init: GpuInit) -> Result<Self> {
        let gpu = Gpu::new(window.clone(), init).await?;
        log::info!(
            "gpu surface ready: {}x{} {:?}",
            gpu.size().width,
            gpu.size().height,
            gpu.surface_format()
        );

        Ok(Self {
            window,
            gpu,
            open,
            owner: None,
            frame: None,
            clear: Color::BLACK,
            circles: Vec::new(),
            circle_renderer: CircleRenderer::default(),
        })
    }

    fn on_owner_thread(&self, op: &str) -> bool {
        let current = thread::current().id();
        if self.owner == Some(current) {
            return true;
        }
        log::warn!("gpu surface: {op} ignored on {current:?}, active on {:?}", self.owner);
        false
    }

    fn sync_size(&mut self) {
        let size = self.window.inner_size();
        if size != self.gpu.size() {
            log::debug!("surface resized to {}x{}", size.width, size.height);
            self.gpu.resize(size);
        }
    }

    fn logical_viewport(&self) -> Viewport {
        let logical = self.gpu.size().to_logical::<f32>(self.window.scale_factor());
        Viewport::new(logical.width, logical.height)
    }
}

impl DrawingSurface for GpuSurface {
    fn activate(&mut self, active: bool) {
        self.owner = active.then(|| thread::current().id());
        log::debug!(
            "gpu surface {} on {:?}",
            if active { "activated" } else { "released" },
            thread::current().name().unwrap_or("<unnamed>")
        );
    }

    fn clear(&mut self, color: Color) {
        if !self.on_owner_thread("clear") {
            return;
        }

        self.sync_size();
        self.clear = color;
        self.circles.clear();

        // An unpresented frame from an interrupted pass is dropped here.
        self.frame = None;

        let size = self.gpu.size();
        if size.width == 0 || size.height == 0 {
            return;
        }

        match self.gpu.begin_frame() {
            Ok(frame) => self.frame = Some(frame),
            Err(err) => match self.gpu.handle_surface_error(err.clone()) {
                SurfaceErrorAction::Fatal => {
                    log::error!("fatal surface error: {err}; closing window");
                    self.open.close();
                }
                action => log::debug!("surface error {err}: {action:?}"),
            },
        }
    }

    fn draw(&mut self, cmd: &DrawCmd) {
        if !self.on_owner_thread("draw") || self.frame.is_none() {
            return;
        }
        match cmd {
            DrawCmd::Circle(c) => self.circles.push(c.clone()),
        }
    }

    fn display(&mut self) {
        if !self.on_owner_thread("display") {
            return;
        }
        let Some(mut frame) = self.frame.take() else {
            return;
        };

        let clear = self.clear;
        {
            let _clear_pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("tripe clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.r as f64,
                            g: clear.g as f64,
                            b: clear.b as f64,
                            a: clear.a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        let viewport = self.logical_viewport();
        self.circle_renderer.render(
            CirclePass {
                device: self.gpu.device(),
                queue: self.gpu.queue(),
                surface_format: self.gpu.surface_format(),
                viewport,
                encoder: &mut frame.encoder,
                view: &frame.view,
            },
            &self.circles,
        );

        self.window.pre_present_notify();
        self.gpu.submit(frame);
    }

    fn is_open(&self) -> bool {
        self.open.is_open()
    }
}
