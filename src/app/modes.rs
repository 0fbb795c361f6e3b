//! Input focus state for the application.
//!
//! The plugin has two places keystrokes can go: the search bar, where they edit
//! the query, and the gallery, where they scroll, load more results and dismiss
//! notifications. [`InputMode`] decides which keybindings are active and which
//! hints the footer shows.
//!
//! # Example
//!
//! ```rust
//! use pixsearch::app::InputMode;
//!
//! let mode = InputMode::default();
//! assert_eq!(mode, InputMode::Typing);
//! ```

/// Where keyboard input is routed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Keystrokes edit the search query.
    ///
    /// Accepts characters, backspace, Enter (submit) and Esc (focus gallery).
    /// Ctrl+n/p scroll the gallery without leaving the search bar.
    #[default]
    Typing,

    /// Keystrokes act on the gallery.
    ///
    /// Accepts j/k to scroll, m or Enter to load more, x to dismiss
    /// notifications, / or i to return to the search bar and q to close.
    Browsing,
}
