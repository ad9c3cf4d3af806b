//! Caller-clocked debounce deadline.
//!
//! There is no timer thread: the host passes its monotonic "now" (time since
//! session start) into `schedule` and `fire`. Scheduling again replaces the
//! previous deadline, so at most one firing is pending per instance.

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Debounce {
    window: Duration,
    deadline: Option<Duration>,
}

impl Debounce {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    #[inline]
    pub fn window(&self) -> Duration {
        self.window
    }

    #[inline]
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// (Re)start the window at `now`, cancelling any pending deadline.
    pub fn schedule(&mut self, now: Duration) {
        self.deadline = Some(now + self.window);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    #[inline]
    pub fn is_due(&self, now: Duration) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }

    /// `true` exactly once per scheduled deadline, once `now` reaches it.
    pub fn fire(&mut self, now: Duration) -> bool {
        if self.is_due(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }
}
