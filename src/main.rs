//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the Pixsearch library and
//! the Zellij plugin system. It implements `ZellijPlugin`, maps raw Zellij
//! events onto library [`Event`]s and carries out the [`Action`]s the library
//! returns.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess`; a denial disables searching
//! 3. **Subscribe**: Register for `Key`, `WebRequestResult`, `Timer` events
//! 4. **Update**: Stamp the wall clock, delegate to the library layer
//! 5. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! - `Key(..)` → character, focus, scroll and load-more events
//! - `WebRequestResult` → `Event::PageFetched` (request id from the context map)
//! - `Timer` → `Event::Timer`
//! - `PermissionRequestResult` → `Event::PermissionsResult`
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n`: Scroll down
//! - `Ctrl+p`: Scroll up
//!
//! While typing in the search bar:
//! - Any character: Type
//! - `Enter`: Submit the search
//! - `Esc`: Focus the gallery
//!
//! While browsing the gallery:
//! - `j`/`Down`: Scroll down
//! - `k`/`Up`: Scroll up
//! - `m`/`Enter`: Load more
//! - `/`/`i`: Focus the search bar
//! - `x`: Dismiss notifications
//! - `q`/`Esc`: Close plugin

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use pixsearch::client::request_id_from_context;
use pixsearch::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Plugin state wrapper.
struct State {
    /// Core application state from library layer.
    app: pixsearch::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: pixsearch::initialize(&Config::default()),
        }
    }
}

/// Wall clock in milliseconds since the Unix epoch.
fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// # Permissions
    ///
    /// Requests `WebAccess` for the search API.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let (config, fallbacks) = Config::parse(&configuration);
        pixsearch::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        for fallback in &fallbacks {
            tracing::warn!(error = %fallback, "configuration value ignored");
        }

        tracing::debug!(per_page = config.per_page, theme = ?config.theme_name, "parsed configuration");
        self.app = pixsearch::initialize(&config);

        tracing::debug!("requesting permissions");
        request_permission(&[PermissionType::WebAccess]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete");
    }

    /// Handles incoming Zellij events.
    ///
    /// Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", otel.name = %format!("plugin_update::{event_name}"), event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result_event(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::Timer { at: now_ms() },
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                Event::PermissionsResult {
                    web_access: status == PermissionStatus::Granted,
                }
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render,
                    "event handled successfully"
                );
                for a in &actions {
                    Self::execute_action(a);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.app.fit_viewport(rows, cols);
        pixsearch::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::ScrollDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::ScrollUp);
        }

        Some(match self.app.input_mode {
            InputMode::Typing => match key.bare_key {
                BareKey::Enter => Event::Submit { at: now_ms() },
                BareKey::Esc => Event::FocusGallery,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            },
            InputMode::Browsing => match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::ScrollDown,
                BareKey::Up | BareKey::Char('k') => Event::ScrollUp,
                BareKey::Enter | BareKey::Char('m') => Event::LoadMore { at: now_ms() },
                BareKey::Char('/' | 'i') => Event::FocusSearch,
                BareKey::Char('x') => Event::DismissNotifications,
                BareKey::Char('q') | BareKey::Esc => Event::CloseFocus,
                _ => return None,
            },
        })
    }

    /// Maps a web request result to `Event::PageFetched`.
    ///
    /// Results without a parseable request id were not issued by this plugin
    /// and are dropped.
    fn map_web_result_event(
        status: u16,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let request_id = match request_id_from_context(context) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(status, error = %e, "dropping web request result");
                return None;
            }
        };

        tracing::debug!(request_id, status, body_len = body.len(), "web request result");
        Some(Event::PageFetched {
            request_id,
            status,
            body,
            at: now_ms(),
        })
    }

    /// Executes an action returned from event handling.
    ///
    /// # Actions
    ///
    /// - `CloseFocus`: Hide the plugin pane
    /// - `FetchPage`: Issue a GET via `web_request`, tagging it with the request id
    /// - `SetTimeout`: Arm a Zellij timer
    ///
    /// The action itself is not recorded: request URLs carry the API key.
    #[tracing::instrument(level = "debug", skip_all)]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::FetchPage(request) => {
                tracing::debug!(request_id = request.request_id, page = request.page, "issuing web request");
                web_request(
                    &request.url,
                    HttpVerb::Get,
                    BTreeMap::new(),
                    Vec::new(),
                    request.context(),
                );
            }
            Action::SetTimeout { millis } => {
                #[allow(clippy::cast_precision_loss)]
                set_timeout(*millis as f64 / 1000.0);
            }
        }
    }
}
