//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They contain
//! no business logic, only display-ready data: truncated strings, compact
//! counters and pre-computed highlight ranges.
//!
//! # Example
//!
//! ```rust
//! use pixsearch::ui::viewmodel::{FooterInfo, GalleryWindow, HeaderInfo, SearchBarInfo, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " Pixsearch ".to_string() },
//!     search_bar: SearchBarInfo { query: "cats".to_string(), focused: true },
//!     gallery: GalleryWindow::default(),
//!     loader: None,
//!     load_more: None,
//!     toasts: vec![],
//!     footer: FooterInfo { keybindings: "Enter: search".to_string() },
//!     empty_state: None,
//! };
//! assert!(vm.gallery.rows.is_empty());
//! ```

use crate::notify::NoticeLevel;

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Header information (title with query and counts).
    pub header: HeaderInfo,

    /// Search input box.
    pub search_bar: SearchBarInfo,

    /// Visible part of the card grid.
    pub gallery: GalleryWindow,

    /// Loader text, present while a search is running.
    pub loader: Option<String>,

    /// Load-more control label, present while more results can be requested.
    pub load_more: Option<String>,

    /// Live notifications, newest first.
    pub toasts: Vec<ToastItem>,

    /// Footer information (keybindings, help text).
    pub footer: FooterInfo,

    /// Shown in place of the grid when there are no cards and nothing is loading.
    pub empty_state: Option<EmptyState>,
}

/// Slice of the card grid that fits in the viewport.
///
/// `skip_lines` lines of the first row are scrolled out of view; at most
/// `visible_lines` lines are drawn in total.
#[derive(Debug, Clone, Default)]
pub struct GalleryWindow {
    /// Grid rows intersecting the viewport, top to bottom.
    pub rows: Vec<Vec<CardItem>>,

    /// Lines of the first row hidden above the viewport.
    pub skip_lines: usize,

    /// Height of the grid area in terminal lines.
    pub visible_lines: usize,
}

/// Display information for a single image card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardItem {
    /// Comma separated tags, truncated to the card.
    pub tags: String,

    /// Character ranges of `tags` matching the active query.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,

    /// Author line (`by <user>`).
    pub author: String,

    /// Compact likes/views/downloads/comments line.
    pub stats: String,

    /// Image URL, truncated to the card.
    pub url: String,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Current contents of the input.
    pub query: String,

    /// Whether keystrokes currently go to the input.
    pub focused: bool,
}

/// One notification drawn in the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastItem {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text (e.g., "/: search  m: load more  q: quit").
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message (e.g., "Search Pixabay photos").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}
