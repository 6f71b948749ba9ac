use crate::platform::{FrameScheduler, FrameToken};
use std::cell::Cell;
use std::rc::Rc;

/// What to do with a frame request while one is already outstanding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FramePolicy {
    /// Keep the pending frame; the new request is ignored.
    Drop,
    /// Cancel the pending frame and schedule the new work (latest sample wins).
    #[default]
    Replace,
}

impl FramePolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            FramePolicy::Drop => "drop",
            FramePolicy::Replace => "replace",
        }
    }
}

/// Holds at most one outstanding scheduled frame for a behavior instance.
///
/// A fired callback clears its own token before running its work, so the work
/// may queue a follow-up frame through the same slot.
pub struct FrameSlot {
    frames: Rc<dyn FrameScheduler>,
    pending: Rc<Cell<Option<FrameToken>>>,
}

impl FrameSlot {
    pub fn new(frames: Rc<dyn FrameScheduler>) -> Self {
        Self {
            frames,
            pending: Rc::new(Cell::new(None)),
        }
    }

    /// Schedules `work` for the next frame under `policy`.
    ///
    /// Returns `false` when the request was dropped or the scheduler refused
    /// it. A refused request leaves the slot empty.
    pub fn request(&self, policy: FramePolicy, work: impl FnOnce() + 'static) -> bool {
        if let Some(token) = self.pending.get() {
            match policy {
                FramePolicy::Drop => return false,
                FramePolicy::Replace => {
                    self.pending.set(None);
                    self.frames.cancel(token);
                }
            }
        }
        let pending = Rc::clone(&self.pending);
        let token = self.frames.schedule(Box::new(move || {
            pending.set(None);
            work();
        }));
        self.pending.set(token);
        token.is_some()
    }

    /// Cancels the outstanding frame, if any.
    pub fn cancel(&self) {
        if let Some(token) = self.pending.take() {
            self.frames.cancel(token);
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }
}

impl Drop for FrameSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}
