//! Card grid component renderer.
//!
//! Each card is a framed block of [`CARD_HEIGHT`] lines:
//!
//! ```text
//! ╭───────────────────────────────────╮
//! │ sunset, beach, sea                │
//! │ by jplenio                        │
//! │ ♥ 1.2k  ◉ 48k  ⇩ 31k  ✎ 12        │
//! │ https://pixabay.com/get/g1f...    │
//! ╰───────────────────────────────────╯
//! ```
//!
//! Cards of one grid row are drawn side by side, separated by a one column
//! gutter. The window's `skip_lines` and `visible_lines` cut the grid at line
//! granularity so scrolling is smooth.

use crate::ui::gallery::{CARD_HEIGHT, CARD_TEXT_WIDTH, CARD_WIDTH};
use crate::ui::helpers::{self, char_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardItem, GalleryWindow};

/// Renders the visible part of the grid starting at `top_row`.
///
/// Returns the row after the last line drawn.
pub fn render_card_grid(top_row: usize, window: &GalleryWindow, theme: &Theme) -> usize {
    let lines = window
        .rows
        .iter()
        .flat_map(|cards| (0..CARD_HEIGHT).map(move |line| (cards, line)))
        .skip(window.skip_lines)
        .take(window.visible_lines);

    let mut row = top_row;
    for (cards, line) in lines {
        for (column, card) in cards.iter().enumerate() {
            position_cursor(row, column * CARD_WIDTH + 1);
            render_card_line(card, line, theme);
        }
        row += 1;
    }
    row
}

fn render_card_line(card: &CardItem, line: usize, theme: &Theme) {
    let frame = Theme::fg(&theme.colors.card_border);
    let inner = CARD_TEXT_WIDTH + 2;

    match line {
        0 => print!("{frame}╭{}╮{}", "─".repeat(inner), Theme::reset()),
        1 => {
            let restore = Theme::fg(&theme.colors.text_normal);
            print!("{frame}│ {restore}");
            helpers::render_highlighted_text(&card.tags, &card.highlight_ranges, theme, &restore);
            print_padding(&card.tags);
            print!("{frame} │{}", Theme::reset());
        }
        2 => print_text_line(&card.author, &Theme::fg(&theme.colors.card_author), &frame),
        3 => print_text_line(&card.stats, &Theme::fg(&theme.colors.card_stats), &frame),
        4 => print_text_line(&card.url, &Theme::fg(&theme.colors.text_dim), &frame),
        _ => print!("{frame}╰{}╯{}", "─".repeat(inner), Theme::reset()),
    }
}

fn print_text_line(text: &str, style: &str, frame: &str) {
    print!("{frame}│ {style}{text}");
    print_padding(text);
    print!("{frame} │{}", Theme::reset());
}

fn print_padding(text: &str) {
    print!("{}", " ".repeat(CARD_TEXT_WIDTH.saturating_sub(char_width(text))));
}
