use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::sim::{Event, EventSource};
use crate::surface::OpenFlag;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Tripe".to_string(),
            width: 200,
            height: 200,
            resizable: true,
        }
    }
}

/// Owns the winit event loop and the single application window.
///
/// Events are pumped on demand from the thread that created the host (the
/// main thread on most platforms), which turns winit's callback model into
/// a plain `poll_event` queue.
pub struct WindowHost {
    event_loop: EventLoop<()>,
    pump: Pump,
    window: Arc<Window>,
    open: OpenFlag,
}

impl WindowHost {
    /// Creates the event loop and opens the window.
    pub fn open(config: WindowConfig) -> Result<Self> {
        let mut event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut pump = Pump::new(config);

        // Window creation happens inside `resumed`; pump until it has run.
        const MAX_STARTUP_PUMPS: usize = 100;
        for _ in 0..MAX_STARTUP_PUMPS {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(Duration::from_millis(10)), &mut pump)
            {
                return Err(anyhow!("event loop exited during startup (code {code})"));
            }
            if let Some(err) = pump.error.take() {
                return Err(err);
            }
            if pump.window.is_some() {
                break;
            }
        }

        let window = pump
            .window
            .clone()
            .context("window was not created during startup")?;

        log::info!("window {:?} opened", window.title());

        Ok(Self {
            event_loop,
            pump,
            window,
            open: OpenFlag::new(),
        })
    }

    /// Shared handle to the window, for creating a surface on it.
    pub fn window(&self) -> Arc<Window> {
        self.window.clone()
    }

    /// Open state shared with surfaces and loops.
    pub fn open_flag(&self) -> OpenFlag {
        self.open.clone()
    }

    fn pump(&mut self) {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.pump);

        if let PumpStatus::Exit(code) = status {
            log::debug!("event loop exited (code {code})");
            self.pump.queue.push_back(Event::Closed);
        }
    }
}

impl EventSource for WindowHost {
    fn poll_event(&mut self) -> Option<Event> {
        if self.pump.queue.is_empty() && self.open.is_open() {
            self.pump();
        }
        self.pump.queue.pop_front()
    }
}

/// winit application handler backing `WindowHost`.
struct Pump {
    config: WindowConfig,
    window: Option<Arc<Window>>,
    error: Option<anyhow::Error>,
    queue: VecDeque<Event>,
}

impl Pump {
    fn new(config: WindowConfig) -> Self {
        Self {
            config,
            window: None,
            error: None,
            queue: VecDeque::new(),
        }
    }
}

impl ApplicationHandler for Pump {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height))
            .with_resizable(self.config.resizable);

        match event_loop.create_window(attrs) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(e) => self.error = Some(anyhow!(e).context("failed to create window")),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(ev) = translate_event(&event) {
            self.queue.push_back(ev);
        }
    }
}

fn translate_event(event: &WindowEvent) -> Option<Event> {
    match event {
        WindowEvent::CloseRequested | WindowEvent::Destroyed => Some(Event::Closed),
        WindowEvent::Resized(size) => Some(Event::Resized {
            width: size.width,
            height: size.height,
        }),
        WindowEvent::Focused(focused) => Some(Event::Focused(*focused)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use winit::dpi::PhysicalSize;

    use super::*;

    #[test]
    fn close_and_destroy_both_close() {
        assert_eq!(translate_event(&WindowEvent::CloseRequested), Some(Event::Closed));
        assert_eq!(translate_event(&WindowEvent::Destroyed), Some(Event::Closed));
    }

    #[test]
    fn resize_and_focus_are_forwarded() {
        assert_eq!(
            translate_event(&WindowEvent::Resized(PhysicalSize::new(640, 480))),
            Some(Event::Resized { width: 640, height: 480 })
        );
        assert_eq!(translate_event(&WindowEvent::Focused(false)), Some(Event::Focused(false)));
    }

    #[test]
    fn other_events_are_dropped() {
        assert_eq!(translate_event(&WindowEvent::RedrawRequested), None);
    }

    #[test]
    fn default_config_matches_classic_window() {
        let config = WindowConfig::default();
        assert_eq!(config.title, "Tripe");
        assert_eq!((config.width, config.height), (200, 200));
    }
}
