//! Domain layer for the Bookshelf plugin.
//!
//! Core types independent of Zellij and of rendering concerns.
//!
//! - [`error`]: Error types and result alias
//! - [`book`]: Book records, categories, and add-form validation
//!
//! # Examples
//!
//! ```
//! use bookshelf::domain::{Category, NewBook, Result};
//!
//! fn parse_form() -> Result<NewBook> {
//!     NewBook::new("Dune", "Frank Herbert", Category::Fiction).validate()
//! }
//! # parse_form().unwrap();
//! ```

pub mod book;
pub mod error;

pub use book::{Book, BookId, Category, NewBook, DEFAULT_COVER_URL};
pub use error::{BookshelfError, Result};
