/// Pending-frame flag: any number of requests before the next paint collapse
/// into one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameScheduler {
    pending: bool,
    frames_requested: u64,
}

impl FrameScheduler {
    /// Returns `true` only when this call scheduled a new frame.
    pub fn request_frame(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        self.frames_requested += 1;
        true
    }

    #[must_use]
    pub fn is_pending(self) -> bool {
        self.pending
    }

    /// Frames scheduled since creation, coalesced requests excluded.
    #[must_use]
    pub fn frames_requested(self) -> u64 {
        self.frames_requested
    }

    pub fn complete(&mut self) {
        self.pending = false;
    }
}
