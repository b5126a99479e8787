use std::any::Any;
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result, anyhow};

use crate::surface::DrawingSurface;
use crate::time::Clock;

use super::{RenderStats, Renderer};

/// Handle to a renderer running on its own thread.
///
/// The surface lives on that thread until `join` hands it back.
pub struct RenderThread<S> {
    handle: JoinHandle<(S, RenderStats)>,
}

impl<S> Renderer<S>
where
    S: DrawingSurface + Send + 'static,
{
    /// Moves the renderer onto a new `tripe-render` thread running [`Renderer::run`].
    pub fn spawn<C>(self, clock: C) -> Result<RenderThread<S>>
    where
        C: Clock + 'static,
    {
        let handle = thread::Builder::new()
            .name("tripe-render".to_string())
            .spawn(move || self.run(clock))
            .context("failed to spawn render thread")?;

        Ok(RenderThread { handle })
    }
}

impl<S> RenderThread<S> {
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Blocks until the render loop returns.
    ///
    /// A panic on the render thread is reported as an error.
    pub fn join(self) -> Result<(S, RenderStats)> {
        self.handle
            .join()
            .map_err(|payload| anyhow!("render thread panicked: {}", panic_message(&*payload)))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}
