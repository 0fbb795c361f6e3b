//! Pagination bookkeeping for the active query.
//!
//! A [`SearchSession`] lives from one accepted submission to the next. It is
//! owned by the search controller and only mutated through the methods below,
//! which keep `loaded_hits <= total_hits` after every recorded page.

/// Session state for the current query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSession {
    query: String,
    page: u32,
    total_hits: u64,
    loaded_hits: u64,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            total_hits: 0,
            loaded_hits: 0,
        }
    }
}

impl SearchSession {
    /// Last accepted, trimmed search term. Empty before the first submission.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Page index of the most recent request (1-based).
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn total_hits(&self) -> u64 {
        self.total_hits
    }

    #[must_use]
    pub const fn loaded_hits(&self) -> u64 {
        self.loaded_hits
    }

    /// Returns `true` once a query has been accepted.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    /// Returns `true` while the service reports more hits than were loaded.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.loaded_hits < self.total_hits
    }

    /// Starts a new session for `query` at page 1 with nothing loaded.
    pub fn reset(&mut self, query: String) {
        self.query = query;
        self.page = 1;
        self.total_hits = 0;
        self.loaded_hits = 0;
    }

    /// Moves to the next page before a "load more" request.
    ///
    /// The page is not rolled back if that request fails.
    pub fn advance_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    /// Records the first page of a query.
    pub fn record_first_page(&mut self, total_hits: u64, hits: usize) {
        self.total_hits = total_hits;
        self.loaded_hits = hits as u64;
        self.enforce_bounds();
    }

    /// Records a follow-up page of the current query.
    pub fn record_next_page(&mut self, hits: usize) {
        self.loaded_hits = self.loaded_hits.saturating_add(hits as u64);
        self.enforce_bounds();
    }

    fn enforce_bounds(&mut self) {
        if self.loaded_hits > self.total_hits {
            tracing::warn!(
                loaded_hits = self.loaded_hits,
                total_hits = self.total_hits,
                "service delivered more hits than it reported, raising total"
            );
            self.total_hits = self.loaded_hits;
        }
    }
}
