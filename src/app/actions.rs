//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! plugin shim executes them in order against the Zellij API; nothing in the
//! library performs I/O itself.
//!
//! # Example
//!
//! ```rust
//! use pixsearch::app::Action;
//! use pixsearch::client::SearchClient;
//!
//! let request = SearchClient::default().page_request(1, "cats", 1).unwrap();
//! let actions = vec![Action::FetchPage(request), Action::SetTimeout { millis: 1000 }];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::client::PageRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    ///
    /// Sent when the user explicitly requests to exit the plugin (pressing 'q').
    CloseFocus,

    /// Issues an HTTP GET for one page of search results.
    ///
    /// The runtime must echo `request_id` back with the response so stale
    /// answers can be told apart from the one the controller is waiting for.
    FetchPage(PageRequest),

    /// Arms a one-shot timer that delivers a timer event after `millis`.
    ///
    /// Used for the minimum loader duration and for toast expiry.
    SetTimeout {
        /// Delay in milliseconds.
        millis: u64,
    },
}
