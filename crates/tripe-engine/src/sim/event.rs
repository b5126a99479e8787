/// Window events the loops care about.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Event {
    /// The user asked to close the window.
    Closed,
    /// New drawable size in physical pixels.
    Resized { width: u32, height: u32 },
    Focused(bool),
}

/// Yields pending window events without blocking.
pub trait EventSource {
    /// Returns the next pending event, or `None` once the queue is drained.
    fn poll_event(&mut self) -> Option<Event>;
}
