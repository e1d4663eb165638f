//! In-memory book store.
//!
//! [`BookStore`] is the single source of truth for the shelf. Books keep their
//! insertion order; the store is never sorted in place. Sorting and filtering
//! happen on copies in [`crate::view`].

use crate::domain::{Book, BookId, NewBook};

/// Ordered, in-memory collection of books.
///
/// Ids are handed out from a monotonic counter and are never reused, even after
/// the book holding one is removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookStore {
    books: Vec<Book>,
    next_id: u64,
}

impl BookStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a book to the end of the shelf and returns its new id.
    ///
    /// The input is stored as given; trimming and required-field checks are
    /// the caller's job (see [`NewBook::validate`]).
    ///
    /// # Examples
    ///
    /// ```
    /// use bookshelf::domain::{Category, NewBook};
    /// use bookshelf::store::BookStore;
    ///
    /// let mut store = BookStore::new();
    /// let id = store.add(NewBook::new("Dune", "Frank Herbert", Category::Fiction), "", 0);
    /// assert_eq!(store.get(id).unwrap().title, "Dune");
    /// ```
    pub fn add(&mut self, book: NewBook, cover_url: &str, added_at: i64) -> BookId {
        self.next_id += 1;
        let id = BookId(self.next_id);

        tracing::debug!(
            book_id = %id,
            title = %book.title,
            author = %book.author,
            category = %book.category,
            "adding book"
        );

        self.books.push(Book {
            id,
            title: book.title,
            author: book.author,
            category: book.category,
            image_cover_url: cover_url.to_string(),
            added_at,
        });

        id
    }

    /// Removes the book with the given id.
    ///
    /// Returns the removed book, or `None` (and logs) when no book has that id.
    pub fn remove(&mut self, id: BookId) -> Option<Book> {
        let Some(index) = self.books.iter().position(|b| b.id == id) else {
            tracing::debug!(book_id = %id, "no book with id, nothing removed");
            return None;
        };

        let removed = self.books.remove(index);
        tracing::debug!(book_id = %id, title = %removed.title, index, "book removed");
        Some(removed)
    }

    /// Removes the first book whose title and author both match exactly.
    ///
    /// Later books with the same title and author are left untouched. Returns
    /// `None` (and logs) when nothing matches.
    pub fn remove_matching(&mut self, title: &str, author: &str) -> Option<Book> {
        let Some(index) = self
            .books
            .iter()
            .position(|b| b.title == title && b.author == author)
        else {
            tracing::debug!(title = %title, author = %author, "no matching book, nothing removed");
            return None;
        };

        let removed = self.books.remove(index);
        tracing::debug!(book_id = %removed.id, index, "matching book removed");
        Some(removed)
    }

    #[must_use]
    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// All books in insertion order.
    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
