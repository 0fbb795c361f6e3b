//! Bottom-of-pane lines: the loader/load-more status line and the footer.

use crate::ui::helpers::{char_width, position_cursor, truncate_end};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the status line at `row`.
///
/// The loader wins over the load-more control; the controller never shows both
/// at once, but a stale frame must not draw them on top of each other.
pub fn render_status_line(
    row: usize,
    loader: Option<&str>,
    load_more: Option<&str>,
    theme: &Theme,
    cols: usize,
) -> usize {
    position_cursor(row, 1);

    if let Some(text) = loader {
        print_centered(text, &Theme::fg(&theme.colors.loader_fg), cols);
    } else if let Some(label) = load_more {
        let style = format!(
            "{}{}{}",
            Theme::bold(),
            Theme::fg(&theme.colors.button_fg),
            Theme::bg(&theme.colors.button_bg)
        );
        print_centered(&format!(" {label} "), &style, cols);
    } else {
        print!("{}", " ".repeat(cols));
    }

    row + 1
}

/// Renders the footer help bar at the specified row.
///
/// Displays keybinding hints centered horizontally with dimmed styling.
/// Help text wider than the pane is truncated to prevent layout corruption on
/// narrow terminals.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let text = truncate_end(&footer.keybindings, cols);
    let text_len = char_width(&text);
    let padding = (cols.saturating_sub(text_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}

fn print_centered(text: &str, style: &str, cols: usize) {
    let text = truncate_end(text, cols);
    let len = char_width(&text);
    let padding = cols.saturating_sub(len) / 2;

    print!("{}", " ".repeat(padding));
    print!("{style}{text}{}", Theme::reset());
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
}
