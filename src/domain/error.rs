//! Error types for the Bookshelf plugin.
//!
//! This module defines the centralized error type [`BookshelfError`] and a type alias
//! [`Result`] used throughout the plugin. All errors derive their `Error`
//! implementation through `thiserror`.

use thiserror::Error;

/// The main error type for Bookshelf operations.
///
/// Most failures in the plugin are recoverable inside the UI: invalid form
/// input is shown back to the user, and deleting a book that no longer exists is
/// a silent no-op. The variants here cover the cases that do need to travel up
/// the call stack.
///
/// # Examples
///
/// ```
/// use bookshelf::domain::BookshelfError;
///
/// fn check_title(title: &str) -> Result<(), BookshelfError> {
///     if title.trim().is_empty() {
///         return Err(BookshelfError::Validation("title is required".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(check_title("  ").is_err());
/// ```
#[derive(Debug, Error)]
pub enum BookshelfError {
    /// A new book failed validation.
    ///
    /// The string names the offending field in a form suitable for display
    /// directly underneath the add form.
    #[error("{0}")]
    Validation(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Bookshelf operations.
pub type Result<T> = std::result::Result<T, BookshelfError>;
