//! Auto-expiring toast stack.
//!
//! Toasts are rendered as an overlay in the top-right corner of the plugin
//! pane. Expiry is driven by the plugin clock: the event handler advances the
//! stack to the time of every timed event and arms a timer whenever a new
//! toast is raised.

use std::collections::VecDeque;

use super::{Notice, Notifier};

/// Default lifetime of a toast in milliseconds.
pub const DEFAULT_TOAST_TIMEOUT_MS: u64 = 5000;

/// Maximum number of toasts kept at once; older ones are dropped first.
pub const MAX_TOASTS: usize = 3;

/// A notice that is currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub notice: Notice,
    pub raised_at: i64,
    pub expires_at: i64,
}

/// Stack of live toasts, newest last.
#[derive(Debug, Clone)]
pub struct Toasts {
    entries: VecDeque<Toast>,
    timeout_ms: u64,
    now_ms: i64,
    timer_pending: bool,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TIMEOUT_MS)
    }
}

impl Toasts {
    #[must_use]
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            entries: VecDeque::with_capacity(MAX_TOASTS),
            timeout_ms,
            now_ms: 0,
            timer_pending: false,
        }
    }

    /// Moves the stack clock to `now_ms` and drops expired toasts.
    ///
    /// Returns `true` if any toast was removed. The clock never runs backwards.
    pub fn advance_to(&mut self, now_ms: i64) -> bool {
        self.now_ms = self.now_ms.max(now_ms);
        let before = self.entries.len();
        let now = self.now_ms;
        self.entries.retain(|toast| toast.expires_at > now);
        before != self.entries.len()
    }

    /// Removes every toast. Returns `true` if anything was on screen.
    pub fn dismiss_all(&mut self) -> bool {
        let had_any = !self.entries.is_empty();
        self.entries.clear();
        had_any
    }

    /// Live toasts, newest first.
    pub fn newest_first(&self) -> impl Iterator<Item = &Toast> {
        self.entries.iter().rev()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Milliseconds until the oldest live toast expires, measured from the
    /// stack clock.
    #[must_use]
    pub fn next_expiry_in(&self) -> Option<u64> {
        self.entries
            .iter()
            .map(|toast| toast.expires_at)
            .min()
            .map(|expires_at| u64::try_from(expires_at - self.now_ms).unwrap_or(0))
    }

    /// Returns the delay in milliseconds for a timer that expires the newest
    /// toast, if one was raised since the last call.
    pub fn take_timer_request(&mut self) -> Option<u64> {
        std::mem::take(&mut self.timer_pending).then_some(self.timeout_ms)
    }
}

impl Notifier for Toasts {
    fn notify(&mut self, notice: Notice) {
        tracing::debug!(level = ?notice.level(), message = %notice.message(), "raising toast");

        if self.entries.len() == MAX_TOASTS {
            self.entries.pop_front();
        }
        let timeout = i64::try_from(self.timeout_ms).unwrap_or(i64::MAX);
        self.entries.push_back(Toast {
            notice,
            raised_at: self.now_ms,
            expires_at: self.now_ms.saturating_add(timeout),
        });
        self.timer_pending = true;
    }
}
