//! Notification overlay renderer.

use crate::notify::NoticeLevel;
use crate::ui::helpers::{char_width, position_cursor, truncate_end};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ToastItem;

/// Columns kept free between a toast and the right edge of the pane.
const RIGHT_MARGIN: usize = 2;

/// Draws `toasts` right-aligned, one per line, starting at `top_row`.
///
/// Drawn last so it sits on top of the card grid.
pub fn render_toasts(top_row: usize, toasts: &[ToastItem], theme: &Theme, cols: usize) {
    let max_width = cols.saturating_sub(RIGHT_MARGIN);

    for (offset, toast) in toasts.iter().enumerate() {
        let accent = match toast.level {
            NoticeLevel::Error => &theme.colors.error_fg,
            NoticeLevel::Info => &theme.colors.info_fg,
        };
        let text = truncate_end(&format!(" ● {}: {} ", toast.title, toast.message), max_width);
        let column = cols.saturating_sub(char_width(&text) + RIGHT_MARGIN) + 1;

        position_cursor(top_row + offset, column);
        print!("{}{}", Theme::bg(&theme.colors.toast_bg), Theme::fg(accent));
        print!("{text}");
        print!("{}", Theme::reset());
    }
}
