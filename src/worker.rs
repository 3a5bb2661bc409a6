use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

use image::GrayImage;

use crate::models::FrameResult;
use crate::pipeline::FramePipeline;

/// One-deep frame mailbox with overwrite semantics.
///
/// A newly published frame replaces any frame still waiting to be
/// processed, so the consumer always sees the latest frame and the
/// producer never blocks. Superseded frames are dropped, not queued.
pub struct FrameSlot {
    state: Mutex<SlotState>,
    available: Condvar,
}

#[derive(Default)]
struct SlotState {
    frame: Option<GrayImage>,
    closed: bool,
    superseded: u64,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SlotState::default()),
            available: Condvar::new(),
        }
    }

    /// Hand a frame to the consumer. Never blocks; a pending frame is
    /// replaced and counted as superseded. Ignored after `close`.
    pub fn publish(&self, frame: GrayImage) {
        let mut state = self.state.lock().unwrap();
        if state.closed {
            return;
        }
        if state.frame.replace(frame).is_some() {
            state.superseded += 1;
        }
        self.available.notify_one();
    }

    /// Number of frames replaced before they could be processed.
    pub fn superseded(&self) -> u64 {
        self.state.lock().unwrap().superseded
    }

    /// Close the mailbox; pending `take` calls drain and then observe the
    /// end of the stream.
    pub fn close(&self) {
        let mut state = self.state.lock().unwrap();
        state.closed = true;
        self.available.notify_all();
    }

    /// Block until a frame is available or the slot is closed.
    fn take(&self) -> Option<GrayImage> {
        let mut state = self.state.lock().unwrap();
        loop {
            if let Some(frame) = state.frame.take() {
                return Some(frame);
            }
            if state.closed {
                return None;
            }
            state = self.available.wait(state).unwrap();
        }
    }
}

impl Default for FrameSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Dedicated analysis thread: repeatedly takes the latest frame from its
/// mailbox, runs the pipeline and delivers each `FrameResult` through the
/// supplied callback (the UI-owning side of the handoff).
///
/// There is no cancellation primitive; a frame either completes or is
/// superseded before being taken.
pub struct AnalysisWorker {
    slot: Arc<FrameSlot>,
    handle: Option<JoinHandle<()>>,
}

impl AnalysisWorker {
    pub fn spawn<F>(pipeline: FramePipeline, mut deliver: F) -> Self
    where
        F: FnMut(FrameResult) + Send + 'static,
    {
        let slot = Arc::new(FrameSlot::new());
        let worker_slot = Arc::clone(&slot);
        let handle = thread::spawn(move || {
            while let Some(frame) = worker_slot.take() {
                deliver(pipeline.process(&frame));
            }
        });
        Self {
            slot,
            handle: Some(handle),
        }
    }

    /// Publish a frame for analysis; never blocks frame acquisition.
    pub fn publish(&self, frame: GrayImage) {
        self.slot.publish(frame);
    }

    pub fn superseded(&self) -> u64 {
        self.slot.superseded()
    }

    /// Close the mailbox and wait for any in-flight frame to finish.
    pub fn join(mut self) {
        self.slot.close();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for AnalysisWorker {
    fn drop(&mut self) {
        self.slot.close();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
