//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to the component layout
//!
//! Tiny panes that cannot fit the chrome get a single hint line instead of a
//! garbled layout.

use crate::app::AppState;
use crate::ui::components::{self, CHROME_LINES};
use crate::ui::helpers::{position_cursor, truncate_end};
use crate::ui::theme::Theme;

/// Smallest pane that can show at least one line of the card grid.
pub const MIN_ROWS: usize = CHROME_LINES + 1;

/// Renders the plugin UI to stdout.
///
/// Prints ANSI-styled output using `print!`. Does not clear the screen; the
/// plugin runtime hands us a blank pane for every frame.
///
/// # Example
///
/// ```rust
/// use pixsearch::{initialize, Config};
/// use pixsearch::ui::render;
///
/// let state = initialize(&Config::default());
/// render(&state, 24, 80);
/// ```
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let _span = tracing::trace_span!("render", rows, cols).entered();

    if rows < MIN_ROWS {
        position_cursor(1, 1);
        print!("{}", Theme::fg(&state.theme.colors.text_dim));
        print!("{}", truncate_end("pane too small for pixsearch", cols));
        print!("{}", Theme::reset());
        return;
    }

    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_layout(&viewmodel, &state.theme, cols, rows);
}
