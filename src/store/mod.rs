//! Book store: the authoritative, in-memory list of books.
//!
//! All mutations of the shelf go through [`BookStore`]. Nothing is persisted;
//! the store lives as long as the plugin instance.

pub mod book_store;

pub use book_store::BookStore;
