//! Pixsearch: a Zellij plugin for searching Pixabay photos.
//!
//! Pixsearch provides:
//! - A search bar that validates the query before anything goes on the wire
//! - A card gallery filled page by page from the Pixabay search API
//! - A "load more" control that appends the next page and scrolls to it
//! - A minimum loader time so quick responses do not flash
//! - Auto-expiring toast notifications for errors and end of results

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  keys → Event, Action → web_request / set_timeout   │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling                                   │
//! │  - Search controller (session, in-flight guard)     │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Client        │   │ UI Layer      │   │ Notify        │
//! │ (client/)     │   │ (ui/)         │   │ (notify/)     │
//! │ - Request URL │   │ - Gallery     │   │ - Notices     │
//! │ - Decoding    │   │ - Rendering   │   │ - Toasts      │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Records, pages, session, errors (domain/)        │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to a rotated JSON-lines file│
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The library performs no I/O of its own apart from tracing: HTTP and timers
//! are requested through [`Action`]s and their results come back as
//! [`Event`]s, which keeps the whole state machine testable natively.
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/pixsearch.wasm" {
//!         api_key "YOUR_PIXABAY_KEY"
//!         per_page "15"
//!         min_query_length "3"
//!         min_loader_ms "1000"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use pixsearch::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! for c in "mountain lake".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//!
//! let (_, actions) = handle_event(&mut state, &Event::Submit { at: 0 })?;
//! let Action::FetchPage(request) = &actions[0] else { unreachable!() };
//! assert!(request.url.contains("q=mountain%20lake"));
//! # Ok::<(), pixsearch::PixsearchError>(())
//! ```

pub mod app;
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod notify;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{PixsearchError, Result};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::str::FromStr;

use app::{SearchController, SearchPolicy};
use client::SearchClient;
use notify::Toasts;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/pixsearch.wasm" {
///     api_key "12345678-abcdef"
///     base_url "https://pixabay.com/api/"
///     per_page "15"
///     min_query_length "3"
///     min_loader_ms "1000"
///     toast_timeout_ms "5000"
///     theme "catppuccin-mocha"
///     theme_file "~/.config/pixsearch/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Pixabay API key, sent as the `key` query parameter.
    pub api_key: String,

    /// Search endpoint. Default: `https://pixabay.com/api/`
    pub base_url: String,

    /// Results per page, clamped to 3..=200. Default: 15
    pub per_page: u32,

    /// Minimum trimmed query length; `0` disables the check. Default: 3
    pub min_query_length: usize,

    /// Minimum loader display time per submission; `0` disables it. Default: 1000
    pub min_loader_ms: u64,

    /// Toast lifetime in milliseconds. Default: 5000
    pub toast_timeout_ms: u64,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`. Ignored if
    /// `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file; `~` maps to the sandbox host mount.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing filter directive. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: client::DEFAULT_BASE_URL.to_string(),
            per_page: client::DEFAULT_PER_PAGE,
            min_query_length: app::policy::DEFAULT_MIN_QUERY_LENGTH,
            min_loader_ms: app::policy::DEFAULT_MIN_LOADER_MS,
            toast_timeout_ms: notify::DEFAULT_TOAST_TIMEOUT_MS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing keys take their defaults. Numeric values that fail to parse
    /// also fall back to the default; use [`Config::parse`] to learn which.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use pixsearch::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_key".to_string(), "secret".to_string());
    /// map.insert("per_page".to_string(), "30".to_string());
    /// map.insert("min_loader_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_key, "secret");
    /// assert_eq!(config.per_page, 30);
    /// assert_eq!(config.min_loader_ms, 1000);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        Self::parse(config).0
    }

    /// Like [`Config::from_zellij`], also returning one
    /// [`PixsearchError::Config`] per value that was replaced by its default.
    ///
    /// Tracing is configured from the result, so the plugin logs the
    /// fallbacks only once the subscriber is installed.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use pixsearch::Config;
    ///
    /// let map = BTreeMap::from([("per_page".to_string(), "many".to_string())]);
    /// let (config, fallbacks) = Config::parse(&map);
    /// assert_eq!(config.per_page, 15);
    /// assert_eq!(fallbacks.len(), 1);
    /// ```
    #[must_use]
    pub fn parse(config: &BTreeMap<String, String>) -> (Self, Vec<PixsearchError>) {
        let defaults = Self::default();
        let mut fallbacks = Vec::new();
        let text = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let parsed = Self {
            api_key: text("api_key").unwrap_or(defaults.api_key),
            base_url: text("base_url").unwrap_or(defaults.base_url),
            per_page: parse_or(config, "per_page", defaults.per_page, &mut fallbacks),
            min_query_length: parse_or(
                config,
                "min_query_length",
                defaults.min_query_length,
                &mut fallbacks,
            ),
            min_loader_ms: parse_or(config, "min_loader_ms", defaults.min_loader_ms, &mut fallbacks),
            toast_timeout_ms: parse_or(
                config,
                "toast_timeout_ms",
                defaults.toast_timeout_ms,
                &mut fallbacks,
            ),
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
        };
        (parsed, fallbacks)
    }

    /// Loads the configured theme: file first, then built-in name, then the
    /// default.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            match Theme::from_file(infrastructure::expand_tilde(theme_file)) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                }
            }
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

fn parse_or<T>(
    config: &BTreeMap<String, String>,
    key: &str,
    default: T,
    fallbacks: &mut Vec<PixsearchError>,
) -> T
where
    T: FromStr + Copy + std::fmt::Debug,
{
    let Some(raw) = config.get(key) else {
        return default;
    };
    raw.trim().parse::<T>().unwrap_or_else(|_| {
        fallbacks.push(PixsearchError::Config(format!(
            "invalid {key} {raw:?}, using default {default:?}"
        )));
        default
    })
}

/// Builds the initial application state from `config`.
///
/// Tracing is set up separately by the plugin shim via
/// [`observability::init_tracing`], before this is called.
///
/// # Example
///
/// ```rust
/// use pixsearch::{initialize, Config, InputMode};
///
/// let state = initialize(&Config::default());
/// assert_eq!(state.input_mode, InputMode::Typing);
/// assert!(!state.controller.session().is_active());
/// ```
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        per_page = config.per_page,
        min_query_length = config.min_query_length,
        min_loader_ms = config.min_loader_ms,
        has_api_key = !config.api_key.is_empty(),
        "initializing pixsearch plugin"
    );

    if config.api_key.is_empty() {
        tracing::warn!("no api_key configured, searches will be rejected by the service");
    }

    let client = SearchClient::new(&config.base_url, &config.api_key, config.per_page);
    let policy = SearchPolicy {
        min_query_length: config.min_query_length,
        min_loader_ms: config.min_loader_ms,
    };

    AppState::new(
        SearchController::new(client, policy),
        Toasts::new(config.toast_timeout_ms),
        config.load_theme(),
    )
}
