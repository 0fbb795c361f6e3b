//! Search bar component renderer.
//!
//! This module renders the search input box with a bordered frame and query
//! text display. The frame color and the cursor tell the user whether
//! keystrokes currently edit the query.

use crate::ui::helpers::{char_width, position_cursor, truncate_end};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

const PROMPT: &str = " Search: ";
const PLACEHOLDER: &str = "press / to type a query";
const CURSOR: &str = "▏";

/// Renders the search input box at the specified row.
///
/// Displays a 3-line bordered box containing the query. The box is
/// horizontally centered with margins on both sides.
///
/// # Returns
///
/// The next available row position (row + 3, since search box uses 3 lines)
///
/// # Layout
///
/// ```text
/// [margin] ┌──────────────────┐ [margin]
/// [margin] │ Search: sunset▏  │ [margin]
/// [margin] └──────────────────┘ [margin]
/// ```
///
/// # Rendering Details
///
/// - Focused: `search_bar_focus` border, query followed by a cursor
/// - Unfocused: `search_bar_border` border; an empty query shows a dimmed hint
/// - Long queries keep their tail visible so the cursor stays on screen
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.focused {
        &theme.colors.search_bar_focus
    } else {
        &theme.colors.search_bar_border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let room = inner_width.saturating_sub(char_width(PROMPT) + char_width(CURSOR));
    let query = tail(&search.query, room);

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{PROMPT}");

    let mut used = char_width(PROMPT);
    if search.focused {
        print!("{query}{CURSOR}");
        used += char_width(&query) + char_width(CURSOR);
    } else if query.is_empty() {
        let hint = truncate_end(PLACEHOLDER, room);
        print!("{}{hint}", Theme::fg(&theme.colors.text_dim));
        used += char_width(&hint);
    } else {
        print!("{query}");
        used += char_width(&query);
    }

    print!("{}", " ".repeat(inner_width.saturating_sub(used)));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}

/// Last `width` characters of `text`.
fn tail(text: &str, width: usize) -> String {
    let len = char_width(text);
    text.chars().skip(len.saturating_sub(width)).collect()
}

#[cfg(test)]
mod tests {
    use super::tail;

    #[test]
    fn tail_keeps_end_of_long_query() {
        assert_eq!(tail("northern lights", 6), "lights");
        assert_eq!(tail("fox", 6), "fox");
    }
}
