//! View model types representing renderable UI state.
//!
//! View models are computed from [`AppState`](crate::app::AppState) by
//! `compute_viewmodel` and consumed by the renderer. They hold display-ready
//! text plus the screen geometry of every card, so the same structure that is
//! drawn can also answer "what is under this mouse click".
//!
//! All rows and columns are 1-indexed terminal cells.

use crate::domain::BookId;

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    pub toolbar: ToolbarInfo,

    /// Add form panel, present while the form is open.
    pub form: Option<FormInfo>,

    /// Search bar, present in search mode.
    pub search_bar: Option<SearchBarInfo>,

    /// Cards on the visible page, in projection order.
    pub cards: Vec<CardItem>,

    /// Message drawn in place of the grid when the projection is empty.
    pub empty_state: Option<EmptyState>,

    /// Row of the first grid line.
    pub grid_top: usize,

    pub footer: FooterInfo,
}

/// What sits under a given cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// The `[x]` delete affordance of a card.
    Delete(BookId),
    /// Anywhere else inside a card.
    Card(BookId),
}

impl UIViewModel {
    /// Resolves a cell to the card (or card affordance) drawn there.
    ///
    /// The delete affordance carries the id of the book it was drawn for, so a
    /// click resolves to that exact book regardless of how the view is sorted
    /// or filtered.
    #[must_use]
    pub fn hit_test(&self, row: usize, col: usize) -> Option<Hit> {
        self.cards.iter().find_map(|card| {
            if row == card.row && (card.delete_col..card.delete_col + DELETE_LABEL.len()).contains(&col) {
                return Some(Hit::Delete(card.id));
            }

            let inside_rows = (card.row..card.row + CARD_HEIGHT).contains(&row);
            let inside_cols = (card.col..card.col + card.width).contains(&col);
            (inside_rows && inside_cols).then_some(Hit::Card(card.id))
        })
    }
}

/// Height of a card in rows, borders included.
pub const CARD_HEIGHT: usize = 5;

/// Narrowest a card column is allowed to get before the grid drops a column.
pub const CARD_MIN_WIDTH: usize = 32;

/// Blank columns between two cards on the same row.
pub const CARD_GAP: usize = 1;

/// Text of the delete affordance on a card's top border.
pub const DELETE_LABEL: &str = "[x]";

/// One book, laid out as a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardItem {
    /// Id of the book this card was drawn for.
    pub id: BookId,

    /// Title, already truncated to fit the top border.
    pub title: String,

    pub author: String,

    pub category: String,

    /// Relative age, e.g. "5m ago".
    pub added: String,

    /// Cover URL, default substituted when the book has none.
    pub cover_url: String,

    pub is_selected: bool,

    /// Character ranges of `title` to highlight for search matches.
    ///
    /// Each tuple is `(start, end)` in character indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,

    /// Top-left cell of the card.
    pub row: usize,
    pub col: usize,

    /// Total width including borders.
    pub width: usize,

    /// Column where [`DELETE_LABEL`] starts on the top border row.
    pub delete_col: usize,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
}

/// Filter and sort controls shown under the header.
#[derive(Debug, Clone)]
pub struct ToolbarInfo {
    /// Active category filter label ("All" or a category).
    pub filter: String,

    /// Sort control label; always names the action the next toggle performs.
    pub sort_label: String,
}

/// Add form panel.
#[derive(Debug, Clone)]
pub struct FormInfo {
    /// `(label, value, is_focused)` for title, author, category in order.
    pub fields: Vec<(String, String, bool)>,

    /// Validation message from the last rejected submission.
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message (e.g., "No books yet").
    pub message: String,

    /// Secondary hint (e.g., "Press 'a' to add a book").
    pub subtitle: String,
}

#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: u64, row: usize, col: usize) -> CardItem {
        let width = 40;
        CardItem {
            id: BookId(id),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            category: "Fiction".to_string(),
            added: "just now".to_string(),
            cover_url: String::new(),
            is_selected: false,
            highlight_ranges: vec![],
            row,
            col,
            width,
            delete_col: col + width - 5,
        }
    }

    fn viewmodel(cards: Vec<CardItem>) -> UIViewModel {
        UIViewModel {
            header: HeaderInfo { title: String::new() },
            toolbar: ToolbarInfo {
                filter: "All".to_string(),
                sort_label: String::new(),
            },
            form: None,
            search_bar: None,
            cards,
            empty_state: None,
            grid_top: 5,
            footer: FooterInfo { keybindings: String::new() },
        }
    }

    #[test]
    fn hit_test_distinguishes_delete_from_card_body() {
        let vm = viewmodel(vec![card(1, 5, 1), card(2, 5, 42)]);

        assert_eq!(vm.hit_test(5, 36), Some(Hit::Delete(BookId(1))));
        assert_eq!(vm.hit_test(5, 38), Some(Hit::Delete(BookId(1))));
        assert_eq!(vm.hit_test(5, 39), Some(Hit::Card(BookId(1))));
        assert_eq!(vm.hit_test(7, 10), Some(Hit::Card(BookId(1))));
        assert_eq!(vm.hit_test(6, 77), Some(Hit::Card(BookId(2))));
        assert_eq!(vm.hit_test(5, 77), Some(Hit::Delete(BookId(2))));
    }

    #[test]
    fn hit_test_misses_gaps_and_outside_rows() {
        let vm = viewmodel(vec![card(1, 5, 1), card(2, 5, 42)]);

        assert_eq!(vm.hit_test(5, 41), None);
        assert_eq!(vm.hit_test(4, 10), None);
        assert_eq!(vm.hit_test(10, 10), None);
    }
}
