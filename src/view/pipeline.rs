//! Filter and sort projection of the store.
//!
//! Everything here is pure: the functions take the current books and the
//! filter/sort/search state and return a new vector. The store is never
//! mutated, and changing the returned vector never affects it.

use super::criteria::{CategoryFilter, SortOrder};
use crate::domain::Book;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::cmp::Ordering;

/// Projects the store through the category filter and title sort.
///
/// 1. copy the books
/// 2. keep only the filtered category (unless [`CategoryFilter::All`])
/// 3. sort by title, compared in uppercase, when a sort order is set
///
/// The sort is stable in both directions: books whose normalized titles are
/// equal keep their relative store order.
///
/// # Examples
///
/// ```
/// use bookshelf::domain::{Category, NewBook};
/// use bookshelf::store::BookStore;
/// use bookshelf::view::{project, CategoryFilter, SortOrder};
///
/// let mut store = BookStore::new();
/// store.add(NewBook::new("dune", "Frank Herbert", Category::Fiction), "", 0);
/// store.add(NewBook::new("Clean Code", "Robert Martin", Category::Technical), "", 0);
///
/// let view = project(store.books(), CategoryFilter::All, SortOrder::Ascending);
/// assert_eq!(view[0].title, "Clean Code");
/// assert_eq!(view[1].title, "dune");
/// ```
#[must_use]
pub fn project(books: &[Book], filter: CategoryFilter, sort: SortOrder) -> Vec<Book> {
    let _span = tracing::debug_span!(
        "project",
        total_books = books.len(),
        filter = %filter,
        sort = ?sort
    )
    .entered();

    let mut projected: Vec<Book> = books
        .iter()
        .filter(|book| filter.admits(book.category))
        .cloned()
        .collect();

    match sort {
        SortOrder::Unsorted => {}
        SortOrder::Ascending => projected.sort_by(compare_titles),
        SortOrder::Descending => projected.sort_by(|a, b| compare_titles(b, a)),
    }

    tracing::debug!(projected_count = projected.len(), "view projected");
    projected
}

fn compare_titles(a: &Book, b: &Book) -> Ordering {
    a.title.to_uppercase().cmp(&b.title.to_uppercase())
}

/// Narrows a projection to books matching a search query.
///
/// The query is split on whitespace; every token must fuzzy-match
/// `"{title} {author}"` (case-insensitive). Order is preserved, and an empty
/// query returns the input unchanged.
#[must_use]
pub fn narrow(books: Vec<Book>, query: &str) -> Vec<Book> {
    let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    if tokens.is_empty() {
        return books;
    }

    let matcher = SkimMatcherV2::default();
    books
        .into_iter()
        .filter(|book| {
            let haystack = search_text(book);
            tokens
                .iter()
                .all(|token| matcher.fuzzy_match(&haystack, token).is_some())
        })
        .collect()
}

/// The text a search query is matched against.
#[must_use]
pub fn search_text(book: &Book) -> String {
    format!("{} {}", book.title, book.author).to_lowercase()
}
