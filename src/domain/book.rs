//! Book domain model.
//!
//! A [`Book`] is one entry on the shelf. Books are created from a [`NewBook`]
//! (the raw add-form input) once it has been trimmed and validated, and receive
//! a [`BookId`] from the store at insertion time. The id, not the title/author
//! pair, is what the UI uses to refer back to a book.

use crate::domain::error::{BookshelfError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cover image shown for books that have no cover of their own.
pub const DEFAULT_COVER_URL: &str = "https://covers.openlibrary.org/b/id/0-M.jpg";

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86400;

/// Stable identifier of a book within one store.
///
/// Assigned from a monotonic counter and never reused, so two books with the
/// same title and author are still distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookId(pub u64);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The fixed set of shelf categories offered by the add form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
    Technical,
    Comedy,
    Fantasy,
    Biography,
}

impl Category {
    /// All categories in the order the form and filter cycle through them.
    pub const ALL: [Self; 6] = [
        Self::Fiction,
        Self::NonFiction,
        Self::Technical,
        Self::Comedy,
        Self::Fantasy,
        Self::Biography,
    ];

    /// Human-readable label, also accepted by [`FromStr`].
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fiction => "Fiction",
            Self::NonFiction => "Non-Fiction",
            Self::Technical => "Technical",
            Self::Comedy => "Comedy",
            Self::Fantasy => "Fantasy",
            Self::Biography => "Biography",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    /// The following category, wrapping from the last to the first.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// The preceding category, wrapping from the first to the last.
    #[must_use]
    pub fn previous(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = BookshelfError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| BookshelfError::Validation(format!("Unknown category: {wanted}")))
    }
}

/// Raw input from the add form, before trimming and validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub category: Category,
}

impl NewBook {
    #[must_use]
    pub fn new(title: impl Into<String>, author: impl Into<String>, category: Category) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            category,
        }
    }

    /// Trims title and author and checks that neither is empty.
    ///
    /// # Errors
    ///
    /// Returns [`BookshelfError::Validation`] naming the first required field
    /// that is empty after trimming. Title is checked before author.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookshelf::domain::{Category, NewBook};
    ///
    /// let book = NewBook::new("  Dune ", "Frank Herbert", Category::Fiction)
    ///     .validate()
    ///     .unwrap();
    /// assert_eq!(book.title, "Dune");
    ///
    /// assert!(NewBook::new("Dune", "   ", Category::Fiction).validate().is_err());
    /// ```
    pub fn validate(self) -> Result<Self> {
        let title = self.title.trim().to_string();
        let author = self.author.trim().to_string();

        if title.is_empty() {
            return Err(BookshelfError::Validation("Title is required".to_string()));
        }
        if author.is_empty() {
            return Err(BookshelfError::Validation("Author is required".to_string()));
        }

        Ok(Self {
            title,
            author,
            category: self.category,
        })
    }
}

/// A book on the shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub category: Category,
    pub image_cover_url: String,
    /// Unix timestamp of when the book was added.
    pub added_at: i64,
}

impl Book {
    /// Cover to display, falling back to [`DEFAULT_COVER_URL`] when unset.
    #[must_use]
    pub fn cover_url(&self) -> &str {
        if self.image_cover_url.trim().is_empty() {
            DEFAULT_COVER_URL
        } else {
            &self.image_cover_url
        }
    }

    /// Returns how long ago the book was added, relative to `now`.
    ///
    /// - under a minute: "just now"
    /// - under an hour: "Xm ago"
    /// - under a day: "Xh ago"
    /// - otherwise: "Xd ago"
    #[must_use]
    pub fn added_ago(&self, now: i64) -> String {
        let diff = now - self.added_at;

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            format!("{}m ago", diff / SECONDS_PER_MINUTE)
        } else if diff < SECONDS_PER_DAY {
            format!("{}h ago", diff / SECONDS_PER_HOUR)
        } else {
            format!("{}d ago", diff / SECONDS_PER_DAY)
        }
    }
}
