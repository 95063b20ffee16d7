//! Per-frame callback loop
//!
//! The equivalent of a request-animation-frame chain: callbacks run once per
//! rendered frame until they return [`FrameControl::Stop`] or are cancelled
//! through the [`FrameRequestId`] returned at registration.

use slotmap::{new_key_type, SlotMap};

use crate::context::FrameSnapshot;

new_key_type! {
    /// Handle to a scheduled frame callback
    pub struct FrameRequestId;
}

/// Returned by a frame callback to keep or end its chain
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Stop,
}

/// Information passed to each frame callback
#[derive(Clone, Copy, Debug)]
pub struct FrameInfo {
    /// Time since the previous frame (ms)
    pub dt_ms: f32,
    /// Monotonic frame counter
    pub frame: u64,
    /// Shared state for this frame
    pub snapshot: FrameSnapshot,
}

/// Frame callback type
pub type FrameCallback = Box<dyn FnMut(&FrameInfo) -> FrameControl + Send>;

/// Scheduler for per-frame callbacks
#[derive(Default)]
pub struct FrameLoop {
    callbacks: SlotMap<FrameRequestId, FrameCallback>,
    frame: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a callback to run every frame
    pub fn request<F>(&mut self, callback: F) -> FrameRequestId
    where
        F: FnMut(&FrameInfo) -> FrameControl + Send + 'static,
    {
        self.callbacks.insert(Box::new(callback))
    }

    /// Cancel a scheduled callback. Cancelling twice is a no-op.
    pub fn cancel(&mut self, id: FrameRequestId) -> bool {
        self.callbacks.remove(id).is_some()
    }

    pub fn is_scheduled(&self, id: FrameRequestId) -> bool {
        self.callbacks.contains_key(id)
    }

    /// Run one frame; callbacks returning `Stop` are dropped
    pub fn run_frame(&mut self, dt_ms: f32, snapshot: FrameSnapshot) {
        self.frame += 1;
        let info = FrameInfo {
            dt_ms,
            frame: self.frame,
            snapshot,
        };
        self.callbacks
            .retain(|_, callback| callback(&info) == FrameControl::Continue);
    }

    /// Number of scheduled callbacks
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Frames run so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}

impl std::fmt::Debug for FrameLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameLoop")
            .field("callbacks", &self.callbacks.len())
            .field("frame", &self.frame)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_callback_runs_until_stop() {
        let mut frames = FrameLoop::new();
        let runs = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&runs);

        frames.request(move |_| {
            if counter.fetch_add(1, Ordering::Relaxed) + 1 >= 3 {
                FrameControl::Stop
            } else {
                FrameControl::Continue
            }
        });

        for _ in 0..5 {
            frames.run_frame(16.0, FrameSnapshot::default());
        }
        assert_eq!(runs.load(Ordering::Relaxed), 3);
        assert!(frames.is_empty());
        assert_eq!(frames.frame_count(), 5);
    }

    #[test]
    fn test_cancel_stops_chain() {
        let mut frames = FrameLoop::new();
        let runs = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&runs);
        let id = frames.request(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
            FrameControl::Continue
        });

        frames.run_frame(16.0, FrameSnapshot::default());
        assert!(frames.cancel(id));
        assert!(!frames.cancel(id));
        frames.run_frame(16.0, FrameSnapshot::default());

        assert_eq!(runs.load(Ordering::Relaxed), 1);
        assert!(!frames.is_scheduled(id));
    }
}
