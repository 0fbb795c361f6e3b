//! Gallery view port and its in-memory implementation.
//!
//! [`GalleryView`] is the surface the search controller drives: it appends and
//! clears cards and toggles the loader and the load-more control. [`Gallery`]
//! implements it as plain state that the renderer turns into an ANSI card grid,
//! so the controller can be exercised without a terminal.

use crate::domain::ImageRecord;

/// Height of a rendered card in terminal rows, borders included.
pub const CARD_HEIGHT: usize = 6;

/// Width of a rendered card in terminal columns, including the gutter.
pub const CARD_WIDTH: usize = 38;

/// Characters of text that fit on one card line between frame and padding.
pub const CARD_TEXT_WIDTH: usize = CARD_WIDTH - 5;

/// Operations the search controller performs on the gallery.
pub trait GalleryView {
    /// Removes every rendered card.
    fn clear_gallery(&mut self);

    /// Appends one card per record, preserving order. Never clears.
    fn create_gallery(&mut self, records: &[ImageRecord]);

    fn show_loader(&mut self);
    fn hide_loader(&mut self);

    fn show_load_more_button(&mut self);
    fn hide_load_more_button(&mut self);

    /// Rendered height of the first card, `None` if there are no cards.
    fn first_card_height(&self) -> Option<usize>;

    /// Moves the viewport down by `rows`.
    fn scroll_by(&mut self, rows: usize);
}

/// Card gallery state rendered by [`crate::ui::render`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gallery {
    cards: Vec<ImageRecord>,
    loader_visible: bool,
    load_more_visible: bool,
    scroll_offset: usize,
}

impl Gallery {
    #[must_use]
    pub fn cards(&self) -> &[ImageRecord] {
        &self.cards
    }

    #[must_use]
    pub const fn is_loader_visible(&self) -> bool {
        self.loader_visible
    }

    #[must_use]
    pub const fn is_load_more_visible(&self) -> bool {
        self.load_more_visible
    }

    /// First visible content row of the card grid.
    #[must_use]
    pub const fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Moves the viewport up by `rows`, stopping at the top.
    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(rows);
    }

    /// Number of grid rows (in terminal lines) needed for all cards at `cols`.
    #[must_use]
    pub fn content_height(&self, cols: usize) -> usize {
        let columns = grid_columns(cols);
        self.cards.len().div_ceil(columns) * CARD_HEIGHT
    }

    /// Clamps the scroll offset so the last card row stays reachable in a
    /// viewport of `visible_rows` lines.
    pub fn clamp_scroll(&mut self, visible_rows: usize, cols: usize) {
        let max_offset = self.content_height(cols).saturating_sub(visible_rows);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }
}

/// Number of card columns that fit in `cols` terminal columns (at least one).
#[must_use]
pub const fn grid_columns(cols: usize) -> usize {
    let columns = cols / CARD_WIDTH;
    if columns == 0 {
        1
    } else {
        columns
    }
}

impl GalleryView for Gallery {
    fn clear_gallery(&mut self) {
        self.cards.clear();
        self.scroll_offset = 0;
    }

    fn create_gallery(&mut self, records: &[ImageRecord]) {
        self.cards.extend_from_slice(records);
        tracing::debug!(appended = records.len(), total = self.cards.len(), "cards appended");
    }

    fn show_loader(&mut self) {
        self.loader_visible = true;
    }

    fn hide_loader(&mut self) {
        self.loader_visible = false;
    }

    fn show_load_more_button(&mut self) {
        self.load_more_visible = true;
    }

    fn hide_load_more_button(&mut self) {
        self.load_more_visible = false;
    }

    fn first_card_height(&self) -> Option<usize> {
        (!self.cards.is_empty()).then_some(CARD_HEIGHT)
    }

    fn scroll_by(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(ids: std::ops::Range<u64>) -> Vec<ImageRecord> {
        ids.map(|id| ImageRecord { id, ..Default::default() }).collect()
    }

    #[test]
    fn create_gallery_appends_in_order() {
        let mut gallery = Gallery::default();
        gallery.create_gallery(&records(0..3));
        gallery.create_gallery(&records(3..5));

        let ids: Vec<u64> = gallery.cards().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn create_gallery_with_no_records_changes_nothing() {
        let mut gallery = Gallery::default();
        gallery.create_gallery(&records(0..2));
        let before = gallery.clone();

        gallery.create_gallery(&[]);
        assert_eq!(gallery, before);
    }

    #[test]
    fn clear_gallery_removes_cards_and_resets_scroll() {
        let mut gallery = Gallery::default();
        gallery.create_gallery(&records(0..4));
        gallery.scroll_by(12);

        gallery.clear_gallery();
        assert!(gallery.cards().is_empty());
        assert_eq!(gallery.scroll_offset(), 0);
        assert_eq!(gallery.first_card_height(), None);
    }

    #[test]
    fn controls_are_hidden_by_default() {
        let gallery = Gallery::default();
        assert!(!gallery.is_loader_visible());
        assert!(!gallery.is_load_more_visible());
    }

    #[test]
    fn grid_fits_columns_to_width() {
        assert_eq!(grid_columns(10), 1);
        assert_eq!(grid_columns(CARD_WIDTH * 3 + 5), 3);

        let mut gallery = Gallery::default();
        gallery.create_gallery(&records(0..7));
        assert_eq!(gallery.content_height(CARD_WIDTH * 3), 3 * CARD_HEIGHT);
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let mut gallery = Gallery::default();
        gallery.create_gallery(&records(0..4));
        gallery.scroll_by(100);

        gallery.clamp_scroll(10, CARD_WIDTH);
        assert_eq!(gallery.scroll_offset(), 4 * CARD_HEIGHT - 10);

        gallery.scroll_up(1000);
        assert_eq!(gallery.scroll_offset(), 0);
    }
}
