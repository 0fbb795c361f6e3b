//! Composable UI component renderers.
//!
//! Each component renders one part of the pane and returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar with the query and result counts
//! - [`search`]: Search input box (border, query text, cursor)
//! - [`cards`]: The image card grid
//! - [`status`]: Loader / load-more line and the keybinding footer
//! - [`toasts`]: Notification overlay
//! - [`empty`]: Empty state message for an empty gallery
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines]
//! [Card grid or empty state]      ← toasts overlay the top right
//! [Status line]
//! [Border]
//! [Footer]
//! ```

mod cards;
mod empty;
mod header;
mod search;
mod status;
mod toasts;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Lines taken by everything except the card grid.
pub const CHROME_LINES: usize = 9;

/// Height of the card grid area in a pane of `rows` lines.
#[must_use]
pub const fn grid_area_lines(rows: usize) -> usize {
    rows.saturating_sub(CHROME_LINES)
}

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the whole pane for `vm`.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = header::render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    let grid_top = search::render_search_bar(current_row, &vm.search_bar, theme, cols);

    if let Some(empty) = &vm.empty_state {
        empty::render_empty_state(grid_top, empty, theme, cols);
    } else {
        cards::render_card_grid(grid_top, &vm.gallery, theme);
    }

    let footer_row = rows;
    let border_row = footer_row.saturating_sub(1);
    let status_row = border_row.saturating_sub(1);

    status::render_status_line(
        status_row,
        vm.loader.as_deref(),
        vm.load_more.as_deref(),
        theme,
        cols,
    );
    render_border(border_row, &theme.colors.border, cols);
    status::render_footer(footer_row, &vm.footer, theme, cols);

    toasts::render_toasts(grid_top, &vm.toasts, theme, cols);
}
