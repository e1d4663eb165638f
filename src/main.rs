//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the bookshelf library and Zellij: it maps
//! keys and mouse clicks to library events, executes returned actions, and
//! forwards render calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for `Key` and `Mouse` events
//! 3. **Update**: Translate the Zellij event, delegate to `handle_event`
//! 4. **Render**: Record the pane size (for click hit-testing), then draw
//!
//! # Keybindings
//!
//! Browsing:
//! - `j`/`Down`/`Ctrl+n`, `k`/`Up`/`Ctrl+p`: Move selection
//! - `a`: Open the add form
//! - `d`/`Delete`: Delete the selected book
//! - `s`: Toggle title sort
//! - `f`/`F`: Next/previous category filter; `0`-`6`: pick one directly
//! - `/`: Search
//! - `q`: Close plugin
//!
//! Add form:
//! - Type into the focused field, `Backspace` to erase
//! - `Tab`/`Down`, `Shift+Tab`/`Up`: Move between fields
//! - `Left`/`Right`: Change category
//! - `Enter`: Add the book, `Esc`: Cancel
//!
//! Mouse:
//! - Left click on `[x]`: Delete that book
//! - Left click elsewhere on a card: Select it

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use bookshelf::app::FormField;
use bookshelf::view::CategoryFilter;
use bookshelf::{handle_event, Action, Config, Event, InputMode, SearchFocus};

register_plugin!(State);

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: bookshelf::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: bookshelf::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        bookshelf::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(config = ?config, "parsed configuration");
        self.app = bookshelf::initialize(&config);

        subscribe(&[EventType::Key, EventType::Mouse]);
        tracing::debug!("plugin load complete");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Mouse(Mouse::LeftClick(line, col)) => Event::Click { line, col },
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.dispatch(&Event::Resize { rows, cols });
        bookshelf::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Runs one library event and executes its actions. Returns whether to re-render.
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    Self::execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(mouse) => format!("Mouse({mouse:?})"),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current input mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, mode = ?self.app.input_mode, "key event");

        match self.app.input_mode {
            InputMode::Form => self.map_form_key(key),
            InputMode::Search(focus) => Self::map_search_key(key, focus),
            InputMode::Browse => Self::map_browse_key(key),
        }
    }

    fn map_browse_key(key: &KeyWithModifier) -> Option<Event> {
        if let Some(event) = Self::map_ctrl_navigation(key) {
            return Some(event);
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Char('a') => Event::OpenForm,
            BareKey::Char('d') | BareKey::Delete => Event::DeleteSelected,
            BareKey::Char('s') => Event::ToggleSort,
            BareKey::Char('f') => Event::NextFilter,
            BareKey::Char('F') => Event::PreviousFilter,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Esc => Event::Escape,
            BareKey::Char(c) => {
                let filter = c.to_digit(10).and_then(CategoryFilter::from_digit)?;
                Event::ChangeFilter(filter)
            }
            _ => return None,
        })
    }

    fn map_search_key(key: &KeyWithModifier, focus: SearchFocus) -> Option<Event> {
        if let Some(event) = Self::map_ctrl_navigation(key) {
            return Some(event);
        }

        Some(match (focus, key.bare_key) {
            (_, BareKey::Esc) => Event::ExitSearch,
            (_, BareKey::Down) => Event::KeyDown,
            (_, BareKey::Up) => Event::KeyUp,
            (SearchFocus::Typing, BareKey::Enter) => Event::FocusResults,
            (SearchFocus::Typing, BareKey::Backspace) => Event::Backspace,
            (SearchFocus::Typing, BareKey::Char(c)) => Event::Char(c),
            (SearchFocus::Navigating, BareKey::Char('j')) => Event::KeyDown,
            (SearchFocus::Navigating, BareKey::Char('k')) => Event::KeyUp,
            (SearchFocus::Navigating, BareKey::Char('/')) => Event::FocusSearchBar,
            (SearchFocus::Navigating, BareKey::Char('d') | BareKey::Delete) => Event::DeleteSelected,
            _ => return None,
        })
    }

    fn map_form_key(&self, key: &KeyWithModifier) -> Option<Event> {
        let on_category = self.app.form.focus == FormField::Category;

        Some(match key.bare_key {
            BareKey::Esc => Event::CancelForm,
            BareKey::Enter => Event::SubmitForm,
            BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => Event::PreviousField,
            BareKey::Tab | BareKey::Down => Event::NextField,
            BareKey::Up => Event::PreviousField,
            BareKey::Left if on_category => Event::CycleCategory { forward: false },
            BareKey::Right if on_category => Event::CycleCategory { forward: true },
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) if !key.has_modifiers(&[KeyModifier::Ctrl]) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_ctrl_navigation(key: &KeyWithModifier) -> Option<Event> {
        if !key.has_modifiers(&[KeyModifier::Ctrl]) {
            return None;
        }
        match key.bare_key {
            BareKey::Char('n') => Some(Event::KeyDown),
            BareKey::Char('p') => Some(Event::KeyUp),
            _ => None,
        }
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
        }
    }
}
