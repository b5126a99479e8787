use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared "window is open" state.
///
/// The event-polling thread closes it; loops on any thread observe it.
#[derive(Debug, Clone)]
pub struct OpenFlag {
    open: Arc<AtomicBool>,
}

impl OpenFlag {
    /// Creates a flag in the open state.
    pub fn new() -> Self {
        Self { open: Arc::new(AtomicBool::new(true)) }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Marks the window closed. Idempotent.
    pub fn close(&self) {
        if self.open.swap(false, Ordering::AcqRel) {
            log::debug!("window marked closed");
        }
    }
}

impl Default for OpenFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_is_seen_by_clones() {
        let flag = OpenFlag::new();
        let other = flag.clone();
        assert!(other.is_open());

        flag.close();
        flag.close();
        assert!(!other.is_open());
    }
}
