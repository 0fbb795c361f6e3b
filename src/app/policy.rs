//! Submission policy: input validation and loader timing.
//!
//! The plugin ships two behaviours for the same controller, selected through
//! configuration rather than separate code paths: a lenient one that only
//! rejects empty input and hides the loader as soon as results arrive, and a
//! strict one (the default) that also enforces a minimum query length and keeps
//! the loader up for a minimum duration.

use crate::domain::ValidationError;

/// Default minimum query length in characters.
pub const DEFAULT_MIN_QUERY_LENGTH: usize = 3;

/// Default minimum loader display time in milliseconds.
pub const DEFAULT_MIN_LOADER_MS: u64 = 1000;

/// Validation and timing rules applied to every submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Trimmed queries shorter than this many characters are rejected.
    /// `0` disables the check.
    pub min_query_length: usize,

    /// Minimum time the loader stays visible after a submission, in
    /// milliseconds. `0` disables the delay.
    pub min_loader_ms: u64,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            min_query_length: DEFAULT_MIN_QUERY_LENGTH,
            min_loader_ms: DEFAULT_MIN_LOADER_MS,
        }
    }
}

impl SearchPolicy {
    /// Policy that accepts any non-empty query and never delays the loader.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            min_query_length: 0,
            min_loader_ms: 0,
        }
    }

    /// Trims `input` and checks it against the policy.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::Empty`] if nothing is left after trimming
    /// - [`ValidationError::TooShort`] if the trimmed query is below
    ///   `min_query_length` characters
    ///
    /// # Examples
    ///
    /// ```
    /// use pixsearch::app::policy::SearchPolicy;
    /// use pixsearch::domain::ValidationError;
    ///
    /// let policy = SearchPolicy::default();
    /// assert_eq!(policy.validate("  cats ").unwrap(), "cats");
    /// assert_eq!(policy.validate("ox"), Err(ValidationError::TooShort { min: 3 }));
    /// ```
    pub fn validate(&self, input: &str) -> Result<String, ValidationError> {
        let query = input.trim();
        if query.is_empty() {
            return Err(ValidationError::Empty);
        }
        if query.chars().count() < self.min_query_length {
            return Err(ValidationError::TooShort {
                min: self.min_query_length,
            });
        }
        Ok(query.to_string())
    }

    /// Milliseconds the loader must still stay up when a response arrives
    /// `elapsed_ms` after the submission.
    #[must_use]
    pub fn remaining_loader_ms(&self, elapsed_ms: i64) -> u64 {
        let elapsed = u64::try_from(elapsed_ms).unwrap_or(0);
        self.min_loader_ms.saturating_sub(elapsed)
    }
}
