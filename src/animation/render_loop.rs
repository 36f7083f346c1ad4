use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Something that can schedule one more display frame.
///
/// In the app this is the egui context; every drawn frame asks for the next one.
pub trait FrameRequester: Send + Sync {
    fn request_frame(&self);
}

impl FrameRequester for eframe::egui::Context {
    fn request_frame(&self) {
        self.request_repaint();
    }
}

/// Discards frame requests; for headless hosts
#[derive(Debug, Default)]
pub struct NoFrames;

impl FrameRequester for NoFrames {
    fn request_frame(&self) {}
}

/// Counts frame requests
#[derive(Debug, Default)]
pub struct FrameCounter {
    requested: AtomicU64,
}

impl FrameCounter {
    pub fn requested(&self) -> u64 {
        self.requested.load(Ordering::SeqCst)
    }
}

impl FrameRequester for FrameCounter {
    fn request_frame(&self) {
        self.requested.fetch_add(1, Ordering::SeqCst);
    }
}

/// Shared cancellation flag of a render loop.
///
/// Clones observe the same flag; cancelling is immediate and irreversible.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// A self-rescheduling frame loop owned by one animation instance
pub struct RenderLoop {
    token: CancellationToken,
    requester: Arc<dyn FrameRequester>,
    frames: u64,
}

impl std::fmt::Debug for RenderLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderLoop")
            .field("cancelled", &self.token.is_cancelled())
            .field("frames", &self.frames)
            .finish()
    }
}

impl RenderLoop {
    /// Starts the loop by requesting the first frame
    pub fn start(requester: Arc<dyn FrameRequester>) -> Self {
        requester.request_frame();
        Self {
            token: CancellationToken::new(),
            requester,
            frames: 0,
        }
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Frames run since the loop started
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs `step` for one frame and schedules the next one.
    ///
    /// Returns false without calling `step` once the loop is cancelled.
    pub fn run_frame(&mut self, step: impl FnOnce()) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        step();
        self.frames += 1;
        if !self.token.is_cancelled() {
            self.requester.request_frame();
        }
        true
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }
}
