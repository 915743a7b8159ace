//! Frame coalescing and trailing-edge debouncing.
//!
//! Both primitives are plain state machines: the host tells them when a
//! frame boundary or clock tick happens.  Nothing here owns a timer, so they
//! work the same under a browser frame callback, a tokio interval, or a test
//! that hands in synthetic `Instant`s.

use std::time::{Duration, Instant};

// ───────────────────────────────────────── frames ────────────

/// At-most-one-pending frame request.
///
/// Any number of [`request`](Self::request) calls between two frame
/// boundaries collapse into a single pending frame.  After
/// [`cancel`](Self::cancel) the scheduler is dead: no frame will ever run
/// again.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: bool,
    cancelled: bool,
    /// Requests absorbed by an already-pending frame.
    coalesced: u64,
    /// Frames actually run.
    frames: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a frame.  Returns `true` if this call scheduled it, `false` if
    /// one was already pending (or the scheduler is cancelled).
    pub fn request(&mut self) -> bool {
        if self.cancelled {
            return false;
        }
        if self.pending {
            self.coalesced += 1;
            return false;
        }
        self.pending = true;
        true
    }

    /// Called at a frame boundary.  Returns `true` exactly once per pending
    /// request, clearing it.
    pub fn begin_frame(&mut self) -> bool {
        if self.cancelled || !self.pending {
            return false;
        }
        self.pending = false;
        self.frames += 1;
        true
    }

    /// Drop any pending frame and refuse all future requests.
    pub fn cancel(&mut self) {
        self.pending = false;
        self.cancelled = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

// ───────────────────────────────────────── debounce ──────────

/// Trailing-edge debouncer: fires once, `delay` after the *last* trigger.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Record an event at `now`, pushing the deadline back.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Returns `true` once when the quiet period has elapsed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }
}
