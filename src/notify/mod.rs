//! User notifications.
//!
//! The search controller reports validation problems, empty results, fetch
//! failures and end-of-results through the [`Notifier`] port. The plugin
//! implements it with [`Toasts`], a small auto-expiring stack drawn over the
//! gallery.
//!
//! # Modules
//!
//! - [`notice`]: The catalogue of messages and their categories
//! - [`toasts`]: The on-screen toast stack

pub mod notice;
pub mod toasts;

pub use notice::{Notice, NoticeLevel};
pub use toasts::{Toast, Toasts, DEFAULT_TOAST_TIMEOUT_MS};

/// Fire-and-forget sink for user-facing notices.
pub trait Notifier {
    /// Shows `notice` to the user. Must not block or fail.
    fn notify(&mut self, notice: Notice);
}
