//! Error types for the Pixsearch plugin.
//!
//! Two recoverable error kinds flow through the search controller:
//! [`ValidationError`] for rejected search input and [`FetchError`] for
//! anything that goes wrong between issuing a page request and decoding its
//! response. Both are surfaced to the user as notices and never escape the
//! controller. [`PixsearchError`] covers the shell-level failures
//! (configuration, themes, I/O) behind the crate [`Result`] alias.

use thiserror::Error;

/// Rejected search input.
///
/// Raised by [`SearchPolicy::validate`](crate::app::policy::SearchPolicy::validate)
/// before any state changes or network traffic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The input is empty after trimming.
    #[error("search term is empty")]
    Empty,

    /// The trimmed input is shorter than the configured minimum.
    #[error("search term is shorter than {min} characters")]
    TooShort {
        /// Minimum accepted length in characters.
        min: usize,
    },
}

/// Failure of a single page request.
///
/// Never retried. The controller maps every variant to the same user-facing
/// notice; the variants exist for logging.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be built (empty query or page 0).
    #[error("invalid page request: {0}")]
    InvalidRequest(String),

    /// The service answered with a non-success status.
    #[error("search service returned HTTP {status}: {detail}")]
    Status {
        /// HTTP status code reported by the transport.
        status: u16,
        /// Leading part of the response body.
        detail: String,
    },

    /// The response body is not a valid result page.
    #[error("failed to decode search response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The transport delivered something that cannot be matched to a request.
    #[error("transport error: {0}")]
    Transport(String),
}

/// The main error type for Pixsearch operations.
#[derive(Debug, Error)]
pub enum PixsearchError {
    /// A configuration value is invalid; the default was used instead.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for Pixsearch operations.
pub type Result<T> = std::result::Result<T, PixsearchError>;
