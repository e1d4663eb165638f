//! Input mode state types for the application.
//!
//! The mode decides how keys are interpreted and which panels are drawn:
//! - **Browse**: navigate cards, delete, sort, filter
//! - **Search**: typing or navigating a fuzzy title/author search
//! - **Form**: editing the add-book form
//!
//! # Example
//!
//! ```rust
//! use bookshelf::app::modes::{FormField, InputMode, SearchFocus};
//!
//! let searching = InputMode::Search(SearchFocus::Typing);
//! let editing = InputMode::Form;
//! assert_ne!(searching, editing);
//! assert_eq!(FormField::Title.next(), FormField::Author);
//! ```

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// User is typing in the search input field.
    Typing,

    /// User is moving through the narrowed cards.
    ///
    /// j/k move, `/` returns to typing.
    Navigating,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    ///
    /// j/k (navigate), a (add), d (delete), s (sort), f/F/0-6 (filter),
    /// / (search), q (quit).
    Browse,

    /// Active search mode with focus state.
    Search(SearchFocus),

    /// Add-book form is open and receives all typed characters.
    Form,
}

/// Field of the add form that currently receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Author,
    Category,
}

impl FormField {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Title => Self::Author,
            Self::Author => Self::Category,
            Self::Category => Self::Title,
        }
    }

    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Title => Self::Category,
            Self::Author => Self::Title,
            Self::Category => Self::Author,
        }
    }

    /// Label shown in front of the field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Author => "Author",
            Self::Category => "Category",
        }
    }
}
