//! Shared rendering utilities and helpers.
//!
//! Low-level text helpers used across the UI components: cursor placement,
//! query match highlighting with proper ANSI escape management, and the
//! width-bounded formatting used on gallery cards.
//!
//! All width calculations operate on character counts, not bytes.
//!
//! # Example
//!
//! ```rust
//! use pixsearch::ui::helpers::{format_compact, truncate_end};
//!
//! assert_eq!(format_compact(1_234), "1.2k");
//! assert_eq!(truncate_end("mountain lake", 8), "mount...");
//! ```

use crate::ui::theme::Theme;

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H` to move the cursor.
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
///
/// # Parameters
///
/// * `row` - Target row (1-indexed)
/// * `col` - Target column (1-indexed, typically 1 for start of line)
///
/// # Example
///
/// ```rust
/// use pixsearch::ui::helpers::position_cursor;
///
/// position_cursor(5, 1); // Move to start of row 5
/// print!("Content at row 5");
/// ```
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Renders text with highlighted character ranges for query matches.
///
/// Ranges are `(start, end)` character indices with an exclusive end. Ranges
/// reaching past the end of `text` are clipped. After each highlighted run the
/// `restore` escape sequence is printed so the surrounding style continues.
///
/// # Example
///
/// ```rust
/// use pixsearch::ui::helpers::render_highlighted_text;
/// use pixsearch::ui::Theme;
///
/// let theme = Theme::default();
/// render_highlighted_text("sunset, beach", &[(0, 6)], &theme, "");
/// ```
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, restore: &str) {
    if ranges.is_empty() {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}{restore}", Theme::reset());

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Number of characters in `text`.
#[must_use]
pub fn char_width(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `width` characters, marking the cut with `...`.
#[must_use]
pub fn truncate_end(text: &str, width: usize) -> String {
    if char_width(text) <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let kept: String = text.chars().take(width - 3).collect();
    format!("{kept}...")
}

/// Formats a counter the way social sites do: `999`, `1.2k`, `3.4M`.
#[must_use]
pub fn format_compact(n: u64) -> String {
    const SCALES: [(u64, &str); 3] = [(1_000_000_000, "B"), (1_000_000, "M"), (1_000, "k")];

    for (scale, suffix) in SCALES {
        if n >= scale {
            let tenths = n.saturating_mul(10).saturating_add(scale / 2) / scale;
            return if tenths % 10 == 0 {
                format!("{}{suffix}", tenths / 10)
            } else {
                format!("{}.{}{suffix}", tenths / 10, tenths % 10)
            };
        }
    }
    n.to_string()
}
