//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user input and
//! runtime callbacks, translating them into state changes and action
//! sequences.
//!
//! # Architecture
//!
//! 1. Events arrive from the plugin runtime (`main.rs`), already mapped from
//!    raw keys and Zellij events
//! 2. [`handle_event`] pattern-matches the event type
//! 3. Search-related events are delegated to the [`SearchController`]; the
//!    rest mutate `AppState` directly
//! 4. Actions are collected and returned for execution
//!
//! Events that depend on time (submissions, responses, timers) carry the wall
//! clock in milliseconds, so the handler itself never reads a clock.
//!
//! [`SearchController`]: super::SearchController
//!
//! # Example
//!
//! ```rust
//! use pixsearch::app::{handle_event, Action, Event};
//! use pixsearch::{initialize, Config};
//!
//! let mut state = initialize(&Config::default());
//! for c in "cats".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_render, actions) = handle_event(&mut state, &Event::Submit { at: 0 })?;
//! assert!(matches!(actions[0], Action::FetchPage(_)));
//! # Ok::<(), pixsearch::PixsearchError>(())
//! ```

use crate::app::{Action, AppState, InputMode};
use crate::client::RequestId;
use crate::domain::error::Result;
use crate::notify::{Notice, Notifier};

/// Events triggered by user input or runtime callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Appends a character to the search input.
    Char(char),
    /// Removes the last character from the search input.
    Backspace,
    /// Submits the search input.
    Submit {
        /// Wall clock in milliseconds.
        at: i64,
    },
    /// Routes keystrokes to the search bar.
    FocusSearch,
    /// Routes keystrokes to the gallery.
    FocusGallery,
    /// Scrolls the gallery up by one card row.
    ScrollUp,
    /// Scrolls the gallery down by one card row.
    ScrollDown,
    /// Activates the load-more control.
    LoadMore {
        /// Wall clock in milliseconds.
        at: i64,
    },
    /// Removes every toast.
    DismissNotifications,
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,

    /// Answer to a [`Action::FetchPage`].
    PageFetched {
        /// Id echoed from the request context.
        request_id: RequestId,
        /// HTTP status; `0` if the transport failed before a status arrived.
        status: u16,
        /// Raw response body.
        body: Vec<u8>,
        /// Wall clock in milliseconds.
        at: i64,
    },

    /// A timer armed with [`Action::SetTimeout`] elapsed.
    Timer {
        /// Wall clock in milliseconds.
        at: i64,
    },

    /// Reports whether the web access permission was granted.
    PermissionsResult {
        /// `true` if web requests are allowed.
        web_access: bool,
    },
}

impl Event {
    /// Short name used in spans; avoids dumping response bodies into traces.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Char(_) => "char",
            Self::Backspace => "backspace",
            Self::Submit { .. } => "submit",
            Self::FocusSearch => "focus_search",
            Self::FocusGallery => "focus_gallery",
            Self::ScrollUp => "scroll_up",
            Self::ScrollDown => "scroll_down",
            Self::LoadMore { .. } => "load_more",
            Self::DismissNotifications => "dismiss_notifications",
            Self::CloseFocus => "close_focus",
            Self::PageFetched { .. } => "page_fetched",
            Self::Timer { .. } => "timer",
            Self::PermissionsResult { .. } => "permissions_result",
        }
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// A `(should_render, actions)` pair. `actions` may be empty if the event
/// requires no side effects. Whenever a toast was raised while handling the
/// event, a [`Action::SetTimeout`] for its expiry is appended.
///
/// # Errors
///
/// Reserved for shell-level failures. Search failures never surface here; the
/// controller turns them into notices.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    let (render, mut actions) = match event {
        Event::Char(c) => {
            if state.input_mode != InputMode::Typing {
                return Ok((false, vec![]));
            }
            state.search_input.push(*c);
            tracing::trace!(input = %state.search_input, char = %c, "search input updated");
            (true, vec![])
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Typing {
                return Ok((false, vec![]));
            }
            (state.search_input.pop().is_some(), vec![])
        }
        Event::Submit { at } => {
            state.toasts.advance_to(*at);
            if state.web_access_denied {
                tracing::warn!("search submitted without web access");
                state.toasts.notify(Notice::WebAccessDenied);
                (true, vec![])
            } else {
                let actions = state.controller.submit(
                    &state.search_input,
                    *at,
                    &mut state.gallery,
                    &mut state.toasts,
                );
                if actions.iter().any(|a| matches!(a, Action::FetchPage(_))) {
                    state.input_mode = InputMode::Browsing;
                }
                (true, actions)
            }
        }
        Event::FocusSearch => {
            state.input_mode = InputMode::Typing;
            (true, vec![])
        }
        Event::FocusGallery => {
            state.input_mode = InputMode::Browsing;
            (true, vec![])
        }
        Event::ScrollUp => {
            state.scroll_up();
            (true, vec![])
        }
        Event::ScrollDown => {
            state.scroll_down();
            (true, vec![])
        }
        Event::LoadMore { at } => {
            state.toasts.advance_to(*at);
            let actions = state
                .controller
                .load_more(*at, &mut state.gallery, &mut state.toasts);
            (!actions.is_empty(), actions)
        }
        Event::DismissNotifications => (state.toasts.dismiss_all(), vec![]),
        Event::CloseFocus => return Ok((false, vec![Action::CloseFocus])),
        Event::PageFetched {
            request_id,
            status,
            body,
            at,
        } => {
            state.toasts.advance_to(*at);
            let actions = state.controller.page_fetched(
                *request_id,
                *status,
                body,
                *at,
                &mut state.gallery,
                &mut state.toasts,
            );
            state.fit_viewport(state.viewport.rows, state.viewport.cols);
            (true, actions)
        }
        Event::Timer { at } => {
            let was_busy = state.controller.is_busy();
            let expired = state.toasts.advance_to(*at);
            let mut actions =
                state
                    .controller
                    .timer_fired(*at, &mut state.gallery, &mut state.toasts);
            if !expired {
                if let Some(millis) = state.toasts.next_expiry_in() {
                    actions.push(Action::SetTimeout { millis });
                }
            }
            (expired || was_busy != state.controller.is_busy(), actions)
        }
        Event::PermissionsResult { web_access } => {
            state.web_access_denied = !web_access;
            if *web_access {
                tracing::debug!("web access granted");
            } else {
                tracing::warn!("web access denied, searches are disabled");
            }
            (true, vec![])
        }
    };

    if let Some(millis) = state.toasts.take_timer_request() {
        actions.push(Action::SetTimeout { millis });
    }

    Ok((render, actions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{SearchController, SearchPolicy};
    use crate::client::SearchClient;
    use crate::notify::Toasts;
    use crate::ui::Theme;

    fn state() -> AppState {
        let controller = SearchController::new(SearchClient::default(), SearchPolicy::lenient());
        AppState::new(controller, Toasts::new(5000), Theme::default())
    }

    fn type_query(state: &mut AppState, query: &str) {
        for c in query.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    #[test]
    fn typing_is_ignored_while_browsing() {
        let mut state = state();
        type_query(&mut state, "ab");
        handle_event(&mut state, &Event::FocusGallery).unwrap();

        let (render, _) = handle_event(&mut state, &Event::Char('c')).unwrap();
        assert!(!render);
        let (render, _) = handle_event(&mut state, &Event::Backspace).unwrap();
        assert!(!render);
        assert_eq!(state.search_input, "ab");
    }

    #[test]
    fn valid_submit_fetches_and_moves_focus() {
        let mut state = state();
        type_query(&mut state, "owl");

        let (render, actions) = handle_event(&mut state, &Event::Submit { at: 0 }).unwrap();
        assert!(render);
        assert!(matches!(actions.as_slice(), [Action::FetchPage(r)] if r.query == "owl"));
        assert_eq!(state.input_mode, InputMode::Browsing);
        assert!(state.gallery.is_loader_visible());
    }

    #[test]
    fn rejected_submit_raises_toast_and_arms_expiry() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::Submit { at: 0 }).unwrap();

        assert_eq!(actions, vec![Action::SetTimeout { millis: 5000 }]);
        assert_eq!(state.toasts.len(), 1);
        assert_eq!(state.input_mode, InputMode::Typing);
    }

    #[test]
    fn denied_web_access_blocks_submissions() {
        let mut state = state();
        handle_event(&mut state, &Event::PermissionsResult { web_access: false }).unwrap();
        type_query(&mut state, "owl");

        let (_, actions) = handle_event(&mut state, &Event::Submit { at: 0 }).unwrap();
        assert_eq!(actions, vec![Action::SetTimeout { millis: 5000 }]);
        let toast = state.toasts.newest_first().next().unwrap();
        assert_eq!(toast.notice, Notice::WebAccessDenied);
    }

    #[test]
    fn timer_expires_toasts() {
        let mut state = state();
        handle_event(&mut state, &Event::Submit { at: 1_000 }).unwrap();

        let (render, actions) = handle_event(&mut state, &Event::Timer { at: 3_000 }).unwrap();
        assert!(!render);
        assert_eq!(actions, vec![Action::SetTimeout { millis: 3000 }]);

        let (render, actions) = handle_event(&mut state, &Event::Timer { at: 6_000 }).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert!(state.toasts.is_empty());
    }

    #[test]
    fn close_focus_is_forwarded() {
        let (render, actions) = handle_event(&mut state(), &Event::CloseFocus).unwrap();
        assert!(!render);
        assert_eq!(actions, vec![Action::CloseFocus]);
    }

    #[test]
    fn event_names_hide_payloads() {
        let event = Event::PageFetched {
            request_id: 1,
            status: 200,
            body: vec![0; 4096],
            at: 0,
        };
        assert_eq!(event.name(), "page_fetched");
    }
}
