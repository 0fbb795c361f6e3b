//! User-facing notices raised by the search controller.

use crate::domain::ValidationError;

/// Presentation category of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Error,
    Info,
}

/// Every message the plugin can show to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The submitted search term was empty after trimming.
    EmptyQuery,
    /// The submitted search term was below the minimum length.
    QueryTooShort { min: usize },
    /// The first page of a query came back empty.
    NoResults,
    /// The first page of a query could not be fetched.
    SearchFailed,
    /// A follow-up page could not be fetched.
    LoadMoreFailed,
    /// Every available hit has been loaded.
    EndOfResults,
    /// The plugin lacks the permission to issue web requests.
    WebAccessDenied,
}

impl Notice {
    #[must_use]
    pub const fn level(&self) -> NoticeLevel {
        match self {
            Self::EndOfResults => NoticeLevel::Info,
            _ => NoticeLevel::Error,
        }
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::NoResults => "No Results",
            Self::EndOfResults => "End of Results",
            _ => "Error",
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::EmptyQuery => "Please enter a search term!".to_string(),
            Self::QueryTooShort { min } => {
                format!("Search term must be at least {min} characters long!")
            }
            Self::NoResults => "No images found. Please try again!".to_string(),
            Self::SearchFailed => "Something went wrong. Please try again later.".to_string(),
            Self::LoadMoreFailed => "Failed to load more images.".to_string(),
            Self::EndOfResults => "You have reached the end of search results.".to_string(),
            Self::WebAccessDenied => {
                "Web access permission is required to search.".to_string()
            }
        }
    }
}

impl From<&ValidationError> for Notice {
    fn from(error: &ValidationError) -> Self {
        match error {
            ValidationError::Empty => Self::EmptyQuery,
            ValidationError::TooShort { min } => Self::QueryTooShort { min: *min },
        }
    }
}
