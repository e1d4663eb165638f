//! Sort and filter state held alongside the store.
//!
//! Both types are small state machines mutated only by the command handlers.
//! Neither ever touches the store itself.

use crate::domain::Category;
use std::fmt;

/// Title ordering of the projected view.
///
/// Starts as [`SortOrder::Unsorted`]. The first toggle sorts ascending; after
/// that each toggle flips between ascending and descending. There is no way
/// back to unsorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Unsorted,
    Ascending,
    Descending,
}

impl SortOrder {
    /// The state after one activation of the sort control.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Unsorted | Self::Descending => Self::Ascending,
            Self::Ascending => Self::Descending,
        }
    }

    /// Label for the sort control, describing what the next toggle will do.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookshelf::view::SortOrder;
    ///
    /// assert_eq!(SortOrder::Unsorted.next_action_label(), "Sort by Title A → Z");
    /// assert_eq!(SortOrder::Ascending.next_action_label(), "Sort by Title Z → A");
    /// ```
    #[must_use]
    pub const fn next_action_label(self) -> &'static str {
        match self {
            Self::Unsorted | Self::Descending => "Sort by Title A → Z",
            Self::Ascending => "Sort by Title Z → A",
        }
    }
}

/// Category filter of the projected view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Show every category.
    #[default]
    All,
    /// Show only books of one category.
    Only(Category),
}

impl CategoryFilter {
    /// Whether a book of `category` passes this filter.
    #[must_use]
    pub fn admits(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }

    /// Walks All, then each category in order, then back to All.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Only(Category::ALL[0]),
            Self::Only(c) if c == Category::ALL[Category::ALL.len() - 1] => Self::All,
            Self::Only(c) => Self::Only(c.next()),
        }
    }

    /// The reverse of [`CategoryFilter::next`].
    #[must_use]
    pub fn previous(self) -> Self {
        match self {
            Self::All => Self::Only(Category::ALL[Category::ALL.len() - 1]),
            Self::Only(c) if c == Category::ALL[0] => Self::All,
            Self::Only(c) => Self::Only(c.previous()),
        }
    }

    /// Filter chosen by a number key: `0` is All, `1..` the categories in order.
    #[must_use]
    pub fn from_digit(digit: u32) -> Option<Self> {
        match digit {
            0 => Some(Self::All),
            n => Category::ALL
                .get(usize::try_from(n - 1).ok()?)
                .copied()
                .map(Self::Only),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(category) => f.write_str(category.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_toggle_never_returns_to_unsorted() {
        let mut order = SortOrder::default();
        let mut seen = vec![];
        for _ in 0..5 {
            order = order.toggle();
            seen.push(order);
        }

        assert_eq!(
            seen,
            [
                SortOrder::Ascending,
                SortOrder::Descending,
                SortOrder::Ascending,
                SortOrder::Descending,
                SortOrder::Ascending,
            ]
        );
    }

    #[test]
    fn sort_label_names_the_next_action() {
        assert_eq!(SortOrder::Descending.next_action_label(), "Sort by Title A → Z");
        assert_eq!(SortOrder::Ascending.next_action_label(), "Sort by Title Z → A");
    }

    #[test]
    fn filter_cycle_visits_every_category_then_all() {
        let mut filter = CategoryFilter::All;
        let mut visited = vec![];
        for _ in 0..=Category::ALL.len() {
            filter = filter.next();
            visited.push(filter);
        }

        assert_eq!(visited.last(), Some(&CategoryFilter::All));
        for category in Category::ALL {
            assert!(visited.contains(&CategoryFilter::Only(category)));
        }
    }

    #[test]
    fn filter_previous_undoes_next() {
        let mut filter = CategoryFilter::All;
        for _ in 0..10 {
            assert_eq!(filter.next().previous(), filter);
            filter = filter.next();
        }
    }

    #[test]
    fn digits_select_filters() {
        assert_eq!(CategoryFilter::from_digit(0), Some(CategoryFilter::All));
        assert_eq!(
            CategoryFilter::from_digit(1),
            Some(CategoryFilter::Only(Category::Fiction))
        );
        assert_eq!(
            CategoryFilter::from_digit(3),
            Some(CategoryFilter::Only(Category::Technical))
        );
        assert_eq!(CategoryFilter::from_digit(9), None);
    }

    #[test]
    fn all_admits_everything() {
        for category in Category::ALL {
            assert!(CategoryFilter::All.admits(category));
        }
        assert!(!CategoryFilter::Only(Category::Comedy).admits(Category::Technical));
    }
}
