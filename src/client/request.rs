//! Page request construction.
//!
//! Translates a `(query, page)` pair into the GET URL of the search service.
//! Every request carries the same fixed filters; only the query, the page and
//! the page size vary.

use std::collections::BTreeMap;

use crate::domain::FetchError;

/// Default search service endpoint.
pub const DEFAULT_BASE_URL: &str = "https://pixabay.com/api/";

/// Default number of records per page.
pub const DEFAULT_PER_PAGE: u32 = 15;

/// Page sizes accepted by the service.
pub const PER_PAGE_RANGE: std::ops::RangeInclusive<u32> = 3..=200;

const IMAGE_TYPE: &str = "photo";
const ORIENTATION: &str = "horizontal";
const SAFE_SEARCH: bool = true;

/// Identifier correlating a page request with its response.
pub type RequestId = u64;

/// Context key under which the request id travels with the web request.
pub const REQUEST_ID_KEY: &str = "request_id";

/// Reads the request id echoed back with a web request result.
///
/// # Errors
///
/// [`FetchError::Transport`] if the id is missing or not a number.
pub fn request_id_from_context(context: &BTreeMap<String, String>) -> Result<RequestId, FetchError> {
    let raw = context
        .get(REQUEST_ID_KEY)
        .ok_or_else(|| FetchError::Transport("response carries no request id".to_string()))?;
    raw.parse()
        .map_err(|_| FetchError::Transport(format!("invalid request id {raw:?}")))
}

/// A fully built page request, ready to hand to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Correlation id echoed back by the transport.
    pub request_id: RequestId,
    /// Search term the request was built for.
    pub query: String,
    /// Requested page (1-based).
    pub page: u32,
    /// Complete GET URL including all query parameters.
    pub url: String,
}

/// Stateless client for the image search service.
///
/// Holds the endpoint settings only; the request itself is executed by the
/// plugin runtime (see [`crate::app::Action::FetchPage`]) and its response is
/// handed back to [`SearchClient::decode_page`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchClient {
    base_url: String,
    api_key: String,
    per_page: u32,
}

impl Default for SearchClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, "", DEFAULT_PER_PAGE)
    }
}

impl SearchClient {
    /// Creates a client for `base_url` authenticating with `api_key`.
    ///
    /// `per_page` is clamped to [`PER_PAGE_RANGE`].
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, per_page: u32) -> Self {
        let per_page = per_page.clamp(*PER_PAGE_RANGE.start(), *PER_PAGE_RANGE.end());
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            per_page,
        }
    }

    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Builds the request for `page` of `query`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidRequest`] if `query` is blank or `page` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixsearch::client::SearchClient;
    ///
    /// let client = SearchClient::new("https://pixabay.com/api/", "secret", 15);
    /// let request = client.page_request(1, "red cats", 2).unwrap();
    /// assert_eq!(
    ///     request.url,
    ///     "https://pixabay.com/api/?key=secret&q=red%20cats&image_type=photo\
    ///      &orientation=horizontal&safesearch=true&page=2&per_page=15"
    /// );
    /// ```
    pub fn page_request(
        &self,
        request_id: RequestId,
        query: &str,
        page: u32,
    ) -> Result<PageRequest, FetchError> {
        if query.trim().is_empty() {
            return Err(FetchError::InvalidRequest("query is empty".to_string()));
        }
        if page == 0 {
            return Err(FetchError::InvalidRequest("pages start at 1".to_string()));
        }

        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        let url = format!(
            "{base}{separator}key={key}&q={q}&image_type={IMAGE_TYPE}&orientation={ORIENTATION}\
             &safesearch={SAFE_SEARCH}&page={page}&per_page={per_page}",
            base = self.base_url,
            key = urlencoding::encode(&self.api_key),
            q = urlencoding::encode(query),
            per_page = self.per_page,
        );

        tracing::debug!(request_id, page, query = %query, "built page request");

        Ok(PageRequest {
            request_id,
            query: query.to_string(),
            page,
            url,
        })
    }
}

impl PageRequest {
    /// Context map to attach to the web request.
    #[must_use]
    pub fn context(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(REQUEST_ID_KEY.to_string(), self.request_id.to_string())])
    }
}
