//! Bookshelf: a Zellij plugin for keeping a small shelf of books.
//!
//! Books are added through a form (title, author, category), shown as cards,
//! filtered by category, sorted by title, searched, and deleted by clicking a
//! card's `[x]` or pressing `d` on the selected card.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Keys, mouse, render
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Command handlers
//! │  - Event handling, add form, selection              │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Store         │   │ View Pipeline │
//! │ (ui/)         │   │ (store/)      │   │ (view/)       │
//! │ - Card grid   │   │ - Books by id │   │ - Filter      │
//! │ - Theming     │   │ - Add/remove  │   │ - Sort, search│
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Book, Category, validation (domain/)             │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - tracing → OpenTelemetry → rotating OTLP file     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/bookshelf.wasm" {
//!         theme "catppuccin-latte"
//!         trace_level "debug"
//!         default_cover "https://example.org/cover.jpg"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use bookshelf::{handle_event, initialize, Config, Event};
//! use bookshelf::domain::Category;
//! use bookshelf::view::CategoryFilter;
//!
//! let mut state = initialize(&Config::default());
//! handle_event(&mut state, &Event::OpenForm)?;
//! for c in "Dune".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! handle_event(&mut state, &Event::NextField)?;
//! for c in "Frank Herbert".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! handle_event(&mut state, &Event::SubmitForm)?;
//! handle_event(&mut state, &Event::ChangeFilter(CategoryFilter::Only(Category::Comedy)))?;
//! assert!(state.visible.is_empty());
//! # Ok::<(), bookshelf::BookshelfError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod store;
pub mod ui;
pub mod view;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus};
pub use domain::{Book, BookId, BookshelfError, Category, Result};
pub use ui::Theme;

use domain::DEFAULT_COVER_URL;
use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file; `~` refers to the host home.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing, e.g. `debug` or `bookshelf=trace`.
    /// Default: `"info"`
    pub trace_level: Option<String>,

    /// Cover image URL attached to every new book.
    pub default_cover: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme_name: None,
            theme_file: None,
            trace_level: None,
            default_cover: DEFAULT_COVER_URL.to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unknown keys are ignored. An unusable `default_cover` falls back to the
    /// built-in cover.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use bookshelf::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("theme".to_string(), "catppuccin-latte".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let default_cover = config
            .get("default_cover")
            .map_or_else(
                || Ok(DEFAULT_COVER_URL.to_string()),
                |raw| parse_cover_url(raw),
            )
            .unwrap_or_else(|e| {
                tracing::debug!(error = %e, "ignoring default_cover");
                DEFAULT_COVER_URL.to_string()
            });

        Self {
            theme_name: non_empty(config.get("theme")),
            theme_file: non_empty(config.get("theme_file")),
            trace_level: non_empty(config.get("trace_level")),
            default_cover,
        }
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty()).map(String::from)
}

/// Accepts absolute http(s) URLs only.
fn parse_cover_url(raw: &str) -> Result<String> {
    let url = raw.trim();
    let has_host = ["https://", "http://"]
        .iter()
        .any(|scheme| url.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()));

    if has_host {
        Ok(url.to_string())
    } else {
        Err(BookshelfError::Config(format!(
            "default_cover must be an http(s) URL, got {url:?}"
        )))
    }
}

/// Creates the initial, empty shelf with the configured theme and cover.
///
/// Theme precedence: `theme_file`, then `theme_name`, then the default theme.
/// A theme that fails to load is logged and replaced by the default.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing bookshelf plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            let path = infrastructure::expand_tilde(theme_file);
            Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    let mut state = AppState::new(theme, config.default_cover.clone());
    state.refresh_view();
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_configuration_uses_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn reads_every_key() {
        let config = Config::from_zellij(&map(&[
            ("theme", "catppuccin-latte"),
            ("theme_file", "~/shelf.toml"),
            ("trace_level", "debug"),
            ("default_cover", "https://example.org/c.jpg"),
        ]));

        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.theme_file.as_deref(), Some("~/shelf.toml"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert_eq!(config.default_cover, "https://example.org/c.jpg");
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = Config::from_zellij(&map(&[("theme", "  "), ("trace_level", "")]));
        assert_eq!(config.theme_name, None);
        assert_eq!(config.trace_level, None);
    }

    #[test]
    fn bad_cover_falls_back_to_builtin() {
        let config = Config::from_zellij(&map(&[("default_cover", "cover.jpg")]));
        assert_eq!(config.default_cover, DEFAULT_COVER_URL);

        let err = parse_cover_url("https://").unwrap_err();
        assert!(matches!(err, BookshelfError::Config(_)));
    }

    #[test]
    fn initialize_picks_named_theme_and_cover() {
        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            default_cover: "https://example.org/c.jpg".to_string(),
            ..Config::default()
        };
        let state = initialize(&config);

        assert_eq!(state.theme.name, "catppuccin-latte");
        assert_eq!(state.default_cover, "https://example.org/c.jpg");
        assert!(state.store.is_empty());
    }

    #[test]
    fn theme_file_wins_over_name() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut custom = Theme::default();
        custom.name = "from-file".to_string();
        file.write_all(toml::to_string(&custom).unwrap().as_bytes()).unwrap();

        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            theme_file: Some(file.path().to_string_lossy().into_owned()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).theme.name, "from-file");
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("no-such-theme".to_string()),
            ..Config::default()
        };
        assert_eq!(initialize(&config).theme, Theme::default());
    }
}
