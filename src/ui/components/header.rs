//! Header component renderer.

use crate::ui::helpers::{char_width, position_cursor, truncate_end};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title bar centered on `row` and returns the next row.
///
/// The title is cut with `...` when the pane is narrower than the title, so a
/// long query never wraps into the border below.
///
/// ```text
/// [left padding]  Pixsearch: sunset (30/412)  [right padding]
/// ```
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title = truncate_end(&header.title, cols);
    let title_len = char_width(&title);
    let padding = (cols.saturating_sub(title_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{title}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));

    print!("{}", Theme::reset());
    row + 1
}
