//! Response decoding.

use super::request::SearchClient;
use crate::domain::{FetchError, SearchResultPage};

/// Longest body excerpt kept in a [`FetchError::Status`].
const MAX_ERROR_DETAIL: usize = 200;

impl SearchClient {
    /// Turns a transport answer into a result page.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Status`] for any status outside `200..=299`
    /// - [`FetchError::Decode`] if the body is not a result page
    pub fn decode_page(&self, status: u16, body: &[u8]) -> Result<SearchResultPage, FetchError> {
        if !(200..=299).contains(&status) {
            let detail: String = String::from_utf8_lossy(body)
                .trim()
                .chars()
                .take(MAX_ERROR_DETAIL)
                .collect();
            return Err(FetchError::Status { status, detail });
        }

        let page: SearchResultPage = serde_json::from_slice(body)?;
        tracing::debug!(
            status,
            total_hits = page.total_hits,
            hits = page.hits.len(),
            "decoded search response"
        );
        Ok(page)
    }
}
