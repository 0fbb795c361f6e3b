//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the
//! plugin. It owns the search controller (and through it the search session),
//! the card gallery the controller draws into, the toast stack it reports to,
//! and the transient input state of the search bar.
//!
//! # Architecture
//!
//! `AppState` separates the search state machine ([`SearchController`]) from
//! what the user sees ([`Gallery`], [`Toasts`]). The controller mutates the
//! gallery and toasts only through the `GalleryView` and `Notifier` ports.
//! View models are computed on demand from state snapshots.
//!
//! # View Model Computation
//!
//! The `compute_viewmodel` method transforms state into a renderable UI
//! representation, handling grid windowing, query match highlighting and
//! responsive layout based on terminal dimensions.
//!
//! # Example
//!
//! ```rust
//! use pixsearch::app::{AppState, SearchController, SearchPolicy};
//! use pixsearch::client::SearchClient;
//! use pixsearch::notify::Toasts;
//! use pixsearch::ui::Theme;
//!
//! let controller = SearchController::new(SearchClient::default(), SearchPolicy::default());
//! let state = AppState::new(controller, Toasts::default(), Theme::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.empty_state.is_some());
//! ```

use fuzzy_matcher::skim::SkimMatcherV2;

use super::controller::{FetchKind, SearchController};
use super::modes::InputMode;
use crate::domain::ImageRecord;
use crate::notify::Toasts;
use crate::ui::components::grid_area_lines;
use crate::ui::gallery::{grid_columns, Gallery, CARD_HEIGHT, CARD_TEXT_WIDTH};
use crate::ui::helpers::{format_compact, truncate_end};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CardItem, EmptyState, FooterInfo, GalleryWindow, HeaderInfo, SearchBarInfo, ToastItem,
    UIViewModel,
};

/// Last known pane size in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub rows: usize,
    pub cols: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { rows: 24, cols: 80 }
    }
}

/// Central application state container.
///
/// Mutated by the event handler in response to user input and runtime events.
#[derive(Debug)]
pub struct AppState {
    /// Search state machine; sole owner of the search session.
    pub controller: SearchController,

    /// Cards, loader and load-more control as last set by the controller.
    pub gallery: Gallery,

    /// Live notifications.
    pub toasts: Toasts,

    /// Current contents of the search bar.
    ///
    /// Edited by `Char` and `Backspace` events. Only handed to the controller
    /// on submit; the gallery keeps showing the last submitted query.
    pub search_input: String,

    /// Where keystrokes are routed.
    pub input_mode: InputMode,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Set when the user refused the web access permission.
    pub web_access_denied: bool,

    /// Pane size seen by the last render, used to clamp scrolling.
    pub viewport: Viewport,
}

impl AppState {
    /// Creates the initial state: empty gallery, search bar focused.
    #[must_use]
    pub fn new(controller: SearchController, toasts: Toasts, theme: Theme) -> Self {
        Self {
            controller,
            gallery: Gallery::default(),
            toasts,
            search_input: String::new(),
            input_mode: InputMode::Typing,
            theme,
            web_access_denied: false,
            viewport: Viewport::default(),
        }
    }

    /// Records the pane size and keeps the scroll offset within the content.
    pub fn fit_viewport(&mut self, rows: usize, cols: usize) {
        self.viewport = Viewport { rows, cols };
        self.gallery.clamp_scroll(grid_area_lines(rows), cols);
    }

    /// Scrolls the gallery down by one card row.
    pub fn scroll_down(&mut self) {
        use crate::ui::gallery::GalleryView;

        self.gallery.scroll_by(CARD_HEIGHT);
        self.fit_viewport(self.viewport.rows, self.viewport.cols);
    }

    /// Scrolls the gallery up by one card row.
    pub fn scroll_up(&mut self) {
        self.gallery.scroll_up(CARD_HEIGHT);
    }

    /// Computes a renderable UI view model for a pane of `rows` x `cols`.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. The grid area is what remains after the chrome (header, search bar,
    ///    status line, footer)
    /// 2. The scroll offset, in lines, is clamped so the last card row stays
    ///    reachable
    /// 3. Only grid rows intersecting `[offset, offset + area)` are built; the
    ///    renderer skips `offset % CARD_HEIGHT` lines of the first one
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!(
            "compute_viewmodel",
            cards = self.gallery.cards().len(),
            rows,
            cols
        )
        .entered();

        let visible_lines = grid_area_lines(rows);
        let max_offset = self.gallery.content_height(cols).saturating_sub(visible_lines);
        let offset = self.gallery.scroll_offset().min(max_offset);
        let skip_lines = offset % CARD_HEIGHT;
        let row_count = (skip_lines + visible_lines).div_ceil(CARD_HEIGHT);

        let tokens = self.highlight_tokens();
        let matcher = (!tokens.is_empty()).then(SkimMatcherV2::default);

        let grid_rows: Vec<Vec<CardItem>> = self
            .gallery
            .cards()
            .chunks(grid_columns(cols))
            .skip(offset / CARD_HEIGHT)
            .take(row_count)
            .map(|chunk| {
                chunk
                    .iter()
                    .map(|record| Self::compute_card_item(record, &tokens, matcher.as_ref()))
                    .collect()
            })
            .collect();

        UIViewModel {
            header: self.compute_header(),
            search_bar: SearchBarInfo {
                query: self.search_input.clone(),
                focused: self.input_mode == InputMode::Typing,
            },
            gallery: GalleryWindow {
                rows: grid_rows,
                skip_lines,
                visible_lines,
            },
            loader: self.compute_loader(),
            load_more: self.compute_load_more(),
            toasts: self
                .toasts
                .newest_first()
                .map(|toast| ToastItem {
                    level: toast.notice.level(),
                    title: toast.notice.title().to_string(),
                    message: toast.notice.message(),
                })
                .collect(),
            footer: self.compute_footer(),
            empty_state: self.compute_empty_state(),
        }
    }

    /// Lowercased words of the submitted query.
    fn highlight_tokens(&self) -> Vec<String> {
        let session = self.controller.session();
        if !session.is_active() {
            return vec![];
        }
        session
            .query()
            .split_whitespace()
            .map(str::to_lowercase)
            .collect()
    }

    fn compute_card_item(
        record: &ImageRecord,
        tokens: &[String],
        matcher: Option<&SkimMatcherV2>,
    ) -> CardItem {
        let tag_text = record.tag_list().join(", ");
        let tags = if tag_text.is_empty() {
            "untitled".to_string()
        } else {
            truncate_end(&tag_text, CARD_TEXT_WIDTH)
        };

        let author = if record.user.is_empty() {
            "by unknown".to_string()
        } else {
            truncate_end(&format!("by {}", record.user), CARD_TEXT_WIDTH)
        };

        let stats = truncate_end(
            &format!(
                "♥ {}  ◉ {}  ⇩ {}  ✎ {}",
                format_compact(record.likes),
                format_compact(record.views),
                format_compact(record.downloads),
                format_compact(record.comments)
            ),
            CARD_TEXT_WIDTH,
        );

        let highlight_ranges =
            matcher.map_or_else(Vec::new, |m| compute_highlight_ranges(&tags, tokens, m));

        CardItem {
            tags,
            highlight_ranges,
            author,
            stats,
            url: truncate_end(record.display_url(), CARD_TEXT_WIDTH),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let session = self.controller.session();
        let title = if session.is_active() {
            format!(
                " Pixsearch: {} ({}/{}) ",
                session.query(),
                session.loaded_hits(),
                session.total_hits()
            )
        } else {
            " Pixsearch ".to_string()
        };
        HeaderInfo { title }
    }

    fn compute_loader(&self) -> Option<String> {
        if !self.gallery.is_loader_visible() {
            return None;
        }
        let text = match self.controller.in_flight_kind() {
            Some(FetchKind::NextPage) => "Loading more images...",
            _ => "Loading images...",
        };
        Some(text.to_string())
    }

    fn compute_load_more(&self) -> Option<String> {
        if !self.gallery.is_load_more_visible() {
            return None;
        }
        let session = self.controller.session();
        Some(format!(
            "Load more (m)  {} of {}",
            session.loaded_hits(),
            session.total_hits()
        ))
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Typing => "Enter: search  ESC: browse results  Ctrl+n/p: scroll  Type to edit query",
            InputMode::Browsing => {
                "/: edit query  j/k: scroll  m: load more  x: dismiss  q: close"
            }
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.gallery.cards().is_empty() || self.gallery.is_loader_visible() {
            return None;
        }

        let (message, subtitle) = if self.web_access_denied {
            (
                "Web access is not granted".to_string(),
                "Reload the plugin and allow the permission request".to_string(),
            )
        } else if self.controller.session().is_active() {
            (
                "No images to show".to_string(),
                "Try a different search term".to_string(),
            )
        } else {
            let min = self.controller.policy().min_query_length;
            let subtitle = if min > 1 {
                format!("Type at least {min} characters and press Enter")
            } else {
                "Type a query and press Enter".to_string()
            };
            ("Search Pixabay photos".to_string(), subtitle)
        };

        Some(EmptyState { message, subtitle })
    }
}

/// Character ranges of `text` matched by any of `tokens`.
///
/// Matched indices of all tokens are merged, then consecutive indices are
/// coalesced into `(start, end)` ranges with an exclusive end.
fn compute_highlight_ranges(
    text: &str,
    tokens: &[String],
    matcher: &SkimMatcherV2,
) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let mut indices: Vec<usize> = tokens
        .iter()
        .filter_map(|token| matcher.fuzzy_indices(text, token))
        .flat_map(|(_score, indices)| indices)
        .collect();
    indices.sort_unstable();
    indices.dedup();

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}
