//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (main.rs) and the
//! client/domain/ui layers. It implements the event-driven architecture that
//! powers the search UI.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └─── WebRequestResult / Timer ─────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`controller`]: Search session state machine (submit, load more, settle)
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input focus state
//! - [`policy`]: Query validation and minimum loader time
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use pixsearch::app::{handle_event, Event};
//! use pixsearch::{initialize, Config};
//!
//! let mut state = initialize(&Config::default());
//! let (render, actions) = handle_event(&mut state, &Event::ScrollDown)?;
//! assert!(render && actions.is_empty());
//! # Ok::<(), pixsearch::PixsearchError>(())
//! ```

pub mod actions;
pub mod controller;
pub mod handler;
pub mod modes;
pub mod policy;
pub mod state;

#[cfg(test)]
mod search_flow_tests;

pub use actions::Action;
pub use controller::{FetchKind, SearchController};
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use policy::SearchPolicy;
pub use state::{AppState, Viewport};
