//! Domain layer for the Pixsearch plugin.
//!
//! Core types independent of Zellij APIs: the records the search service
//! returns, the pagination session the controller maintains, and the error
//! types shared by every layer.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`image`]: Image records and result pages
//! - [`session`]: Pagination bookkeeping for the active query

pub mod error;
pub mod image;
pub mod session;

pub use error::{FetchError, PixsearchError, Result, ValidationError};
pub use image::{ImageRecord, SearchResultPage};
pub use session::SearchSession;
