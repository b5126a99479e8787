use std::sync::Arc;
use std::thread::{self, ThreadId};

use parking_lot::Mutex;

use crate::paint::Color;
use crate::scene::DrawCmd;

use super::{DrawingSurface, OpenFlag};

/// One presented frame: the clear color and the commands drawn on top of it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    pub clear: Color,
    pub cmds: Vec<DrawCmd>,
}

#[derive(Debug, Default)]
struct LogState {
    frames: Vec<RecordedFrame>,
    violations: u32,
}

/// Read handle onto what a [`HeadlessSurface`] recorded.
///
/// Stays usable while the surface itself lives on another thread.
#[derive(Debug, Clone, Default)]
pub struct SurfaceLog {
    state: Arc<Mutex<LogState>>,
}

impl SurfaceLog {
    pub fn frames(&self) -> Vec<RecordedFrame> {
        self.state.lock().frames.clone()
    }

    pub fn frame_count(&self) -> usize {
        self.state.lock().frames.len()
    }

    /// Operations issued from a thread that had not activated the surface,
    /// or outside a clear/display pair.
    pub fn violations(&self) -> u32 {
        self.state.lock().violations
    }
}

/// In-memory surface.
///
/// Records every presented frame and checks the threading contract of
/// [`DrawingSurface`]: misuse is logged and counted instead of corrupting a
/// graphics context.
#[derive(Debug)]
pub struct HeadlessSurface {
    open: OpenFlag,
    owner: Option<ThreadId>,
    pending: Option<RecordedFrame>,
    log: SurfaceLog,
}

impl HeadlessSurface {
    pub fn new(open: OpenFlag) -> Self {
        Self {
            open,
            owner: None,
            pending: None,
            log: SurfaceLog::default(),
        }
    }

    pub fn log(&self) -> SurfaceLog {
        self.log.clone()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.owner.is_some()
    }

    fn check_owner(&self, op: &str) -> bool {
        let current = thread::current().id();
        if self.owner == Some(current) {
            return true;
        }

        log::warn!("headless surface: {op} from {current:?}, active on {:?}", self.owner);
        self.log.state.lock().violations += 1;
        false
    }

    fn violation(&self, what: &str) {
        log::warn!("headless surface: {what}");
        self.log.state.lock().violations += 1;
    }
}

impl DrawingSurface for HeadlessSurface {
    fn activate(&mut self, active: bool) {
        self.owner = active.then(|| thread::current().id());
    }

    fn clear(&mut self, color: Color) {
        if !self.check_owner("clear") {
            return;
        }
        if self.pending.is_some() {
            self.violation("clear with an undisplayed frame pending");
        }
        self.pending = Some(RecordedFrame { clear: color, cmds: Vec::new() });
    }

    fn draw(&mut self, cmd: &DrawCmd) {
        if !self.check_owner("draw") {
            return;
        }
        match self.pending.as_mut() {
            Some(frame) => frame.cmds.push(cmd.clone()),
            None => self.violation("draw without clear"),
        }
    }

    fn display(&mut self) {
        if !self.check_owner("display") {
            return;
        }
        match self.pending.take() {
            Some(frame) => self.log.state.lock().frames.push(frame),
            None => self.violation("display without clear"),
        }
    }

    fn is_open(&self) -> bool {
        self.open.is_open()
    }
}
