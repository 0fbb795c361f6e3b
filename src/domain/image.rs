//! Image records and result pages returned by the search service.
//!
//! Both types mirror the Pixabay JSON response closely enough to deserialize it
//! directly. Records are read-only pass-through data: the controller hands them
//! from the client to the gallery without inspecting anything but their count.

use serde::{Deserialize, Serialize};

/// One hit returned by the search service.
///
/// Carries the URLs needed to open the image and the metadata shown on a
/// gallery card. Missing fields fall back to their defaults so a sparse hit
/// still renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageRecord {
    pub id: u64,
    #[serde(rename = "pageURL")]
    pub page_url: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Comma-separated tag list, e.g. `"cat, pet, animal"`.
    pub tags: String,
    #[serde(rename = "previewURL")]
    pub preview_url: String,
    #[serde(rename = "webformatURL")]
    pub webformat_url: String,
    #[serde(rename = "largeImageURL")]
    pub large_image_url: String,
    pub views: u64,
    pub downloads: u64,
    pub collections: u64,
    pub likes: u64,
    pub comments: u64,
    pub user_id: u64,
    pub user: String,
    #[serde(rename = "userImageURL")]
    pub user_image_url: String,
}

impl ImageRecord {
    /// Returns the individual tags, trimmed, without empty entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixsearch::domain::ImageRecord;
    ///
    /// let record = ImageRecord { tags: "cat, pet,, animal ".to_string(), ..Default::default() };
    /// assert_eq!(record.tag_list(), vec!["cat", "pet", "animal"]);
    /// ```
    #[must_use]
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }

    /// Best URL to open for this record: the large image, then the web format,
    /// then the preview.
    #[must_use]
    pub fn display_url(&self) -> &str {
        [&self.large_image_url, &self.webformat_url, &self.preview_url]
            .into_iter()
            .find(|url| !url.is_empty())
            .map_or("", String::as_str)
    }
}

/// One decoded response of the search service.
///
/// Transient: created per request and consumed by the controller as soon as it
/// is settled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultPage {
    /// Number of hits reachable through pagination for the query.
    #[serde(rename = "totalHits", default)]
    pub total_hits: u64,

    /// Raw number of matches reported by the service, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,

    /// Records on this page, in service order.
    #[serde(default)]
    pub hits: Vec<ImageRecord>,
}

impl SearchResultPage {
    /// Returns `true` if the page carries no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}
