//! Search client for the Pixabay image API.
//!
//! Fetching a page is split across the plugin's only network suspension
//! point:
//!
//! ```text
//! SearchClient::page_request ──► Action::FetchPage ──► zellij web_request
//!                                                            │
//! SearchClient::decode_page  ◄── Event::PageFetched ◄── WebRequestResult
//! ```
//!
//! The client itself holds no state beyond its endpoint settings.

pub mod request;
pub mod response;

pub use request::{
    request_id_from_context, PageRequest, RequestId, SearchClient, DEFAULT_BASE_URL,
    DEFAULT_PER_PAGE, REQUEST_ID_KEY,
};
