//! Application state management and view model computation.
//!
//! [`AppState`] owns the [`BookStore`] and everything the command handlers
//! mutate next to it: category filter, sort order, search query, add form,
//! input mode, and card selection.
//!
//! # State Components
//!
//! - **Store**: authoritative list of books, insertion ordered
//! - **Visible**: derived projection (filter → sort → search), rebuilt by
//!   [`AppState::refresh_view`] after every change
//! - **Selection**: cursor into the visible projection
//! - **Viewport**: last known pane size, used to map mouse clicks onto cards
//!
//! # Example
//!
//! ```rust
//! use bookshelf::app::AppState;
//! use bookshelf::domain::{Category, NewBook, DEFAULT_COVER_URL};
//! use bookshelf::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), DEFAULT_COVER_URL.to_string());
//! state.add_book(NewBook::new("Dune", "Frank Herbert", Category::Fiction));
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert_eq!(viewmodel.cards.len(), 1);
//! ```

use super::form::AddForm;
use super::modes::{InputMode, SearchFocus};
use crate::domain::{Book, BookId, NewBook};
use crate::store::BookStore;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CardItem, EmptyState, FooterInfo, FormInfo, HeaderInfo, SearchBarInfo, ToolbarInfo,
    UIViewModel, CARD_GAP, CARD_HEIGHT, CARD_MIN_WIDTH, DELETE_LABEL,
};
use crate::view::{self, CategoryFilter, SortOrder};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Rows above the grid: blank line, header, toolbar, border.
const CHROME_TOP_ROWS: usize = 4;

/// Rows below the grid: border and footer.
const CHROME_BOTTOM_ROWS: usize = 2;

/// Rows taken by the add form: boxed fields plus the message line.
const FORM_ROWS: usize = 6;

/// Rows taken by the search bar box.
const SEARCH_ROWS: usize = 3;

/// Columns consumed by the top border around the title:
/// `╭─ ` + ` ` + `[x]` + `─╮`, plus at least one fill character.
const TITLE_BORDER_OVERHEAD: usize = 10;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Authoritative list of books.
    pub store: BookStore,

    /// Current filter/sort/search projection of `store`.
    pub visible: Vec<Book>,

    /// Zero-based index into `visible`.
    pub selected_index: usize,

    pub filter: CategoryFilter,

    pub sort: SortOrder,

    pub input_mode: InputMode,

    /// Fuzzy search query over title and author; empty outside search mode.
    pub search_query: String,

    pub form: AddForm,

    /// Cover URL given to every book created through the form.
    pub default_cover: String,

    pub theme: Theme,

    /// Last rendered pane size as `(rows, cols)`.
    pub viewport: (usize, usize),
}

impl AppState {
    /// Creates an empty shelf in browse mode, unsorted, showing all categories.
    #[must_use]
    pub fn new(theme: Theme, default_cover: String) -> Self {
        Self {
            store: BookStore::new(),
            visible: vec![],
            selected_index: 0,
            filter: CategoryFilter::All,
            sort: SortOrder::Unsorted,
            input_mode: InputMode::Browse,
            search_query: String::new(),
            form: AddForm::default(),
            default_cover,
            theme,
            viewport: (0, 0),
        }
    }

    /// Rebuilds the visible projection and clamps the selection into it.
    pub fn refresh_view(&mut self) {
        let projected = view::project(self.store.books(), self.filter, self.sort);
        self.visible = view::narrow(projected, &self.search_query);

        if self.visible.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.visible.len() - 1);
        }

        tracing::debug!(
            visible_count = self.visible.len(),
            total_count = self.store.len(),
            selected_index = self.selected_index,
            "view refreshed"
        );
    }

    /// Appends a validated book with the default cover and reprojects.
    ///
    /// Moves the selection onto the new book when it is visible under the
    /// current filter and search.
    pub fn add_book(&mut self, book: NewBook) -> BookId {
        let now = chrono::Utc::now().timestamp();
        let id = self.store.add(book, &self.default_cover, now);
        self.refresh_view();
        self.select_book(id);
        id
    }

    /// Removes a book by id and reprojects. Unknown ids are a no-op.
    pub fn delete_book(&mut self, id: BookId) -> Option<Book> {
        let removed = self.store.remove(id);
        if removed.is_some() {
            self.refresh_view();
        }
        removed
    }

    /// Removes the first book matching title and author exactly, then reprojects.
    pub fn delete_matching(&mut self, title: &str, author: &str) -> Option<Book> {
        let removed = self.store.remove_matching(title, author);
        if removed.is_some() {
            self.refresh_view();
        }
        removed
    }

    /// Moves the selection onto `id` if it is visible. Returns whether it was.
    pub fn select_book(&mut self, id: BookId) -> bool {
        match self.visible.iter().position(|b| b.id == id) {
            Some(index) => {
                self.selected_index = index;
                true
            }
            None => false,
        }
    }

    /// Moves selection down one card, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.visible.len();
    }

    /// Moves selection up one card, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.visible.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    #[must_use]
    pub fn selected_book(&self) -> Option<&Book> {
        self.visible.get(self.selected_index)
    }

    /// Computes the view model for a pane of `rows` × `cols`.
    ///
    /// # Grid Layout
    ///
    /// 1. Fit as many columns of at least `CARD_MIN_WIDTH` as the width allows
    /// 2. Fit as many card rows as the height below the header/form allows
    /// 3. Show the page of cards that contains the selection
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let grid_top = self.grid_top();
        let grid_rows = rows
            .saturating_sub(CHROME_BOTTOM_ROWS)
            .saturating_sub(grid_top);

        let columns = grid_columns(cols);
        let card_width = card_width(cols, columns);
        let per_page = (grid_rows / CARD_HEIGHT).max(1) * columns;
        let page_start = (self.selected_index / per_page) * per_page;
        let page_end = (page_start + per_page).min(self.visible.len());

        let matcher = if matches!(self.input_mode, InputMode::Search(_)) && !self.search_query.trim().is_empty() {
            Some(SkimMatcherV2::default())
        } else {
            None
        };
        let now = chrono::Utc::now().timestamp();

        let cards = self.visible[page_start..page_end]
            .iter()
            .enumerate()
            .map(|(slot, book)| {
                let row = grid_top + (slot / columns) * CARD_HEIGHT;
                let col = 1 + (slot % columns) * (card_width + CARD_GAP);
                self.compute_card(book, page_start + slot, (row, col), card_width, now, matcher.as_ref())
            })
            .collect();

        UIViewModel {
            header: self.compute_header(),
            toolbar: ToolbarInfo {
                filter: self.filter.to_string(),
                sort_label: self.sort.next_action_label().to_string(),
            },
            form: self.compute_form(),
            search_bar: self.compute_search_bar(),
            cards,
            empty_state: self.compute_empty_state(),
            grid_top,
            footer: self.compute_footer(),
        }
    }

    fn grid_top(&self) -> usize {
        let panel_rows = match self.input_mode {
            InputMode::Browse => 0,
            InputMode::Search(_) => SEARCH_ROWS,
            InputMode::Form => FORM_ROWS,
        };
        CHROME_TOP_ROWS + 1 + panel_rows
    }

    fn compute_card(
        &self,
        book: &Book,
        absolute_idx: usize,
        (row, col): (usize, usize),
        width: usize,
        now: i64,
        matcher: Option<&SkimMatcherV2>,
    ) -> CardItem {
        let max_title = width.saturating_sub(TITLE_BORDER_OVERHEAD).max(1);
        let title = truncate(&book.title, max_title);
        let title_len = title.chars().count();

        let highlight_ranges = matcher.map_or_else(Vec::new, |m| {
            self.compute_highlight_ranges(&book.title, m)
                .into_iter()
                .filter(|&(start, _)| start < title_len)
                .map(|(start, end)| (start, end.min(title_len)))
                .collect()
        });

        CardItem {
            id: book.id,
            title,
            author: book.author.clone(),
            category: book.category.to_string(),
            added: book.added_ago(now),
            cover_url: book.cover_url().to_string(),
            is_selected: absolute_idx == self.selected_index,
            highlight_ranges,
            row,
            col,
            width,
            delete_col: (col + width).saturating_sub(DELETE_LABEL.len() + 2),
        }
    }

    /// Character ranges of `title` matched by any of the search tokens.
    ///
    /// Indices of every token are merged, then consecutive runs are coalesced
    /// into `(start, end)` ranges with exclusive end.
    fn compute_highlight_ranges(&self, title: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let mut indices: Vec<usize> = self
            .search_query
            .split_whitespace()
            .filter_map(|token| matcher.fuzzy_indices(title, &token.to_lowercase()))
            .flat_map(|(_score, idx)| idx)
            .collect();
        indices.sort_unstable();
        indices.dedup();

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_header(&self) -> HeaderInfo {
        HeaderInfo {
            title: format!(" Bookshelf ({}/{}) ", self.visible.len(), self.store.len()),
        }
    }

    fn compute_form(&self) -> Option<FormInfo> {
        use super::modes::FormField;

        if self.input_mode != InputMode::Form {
            return None;
        }

        let fields = [FormField::Title, FormField::Author, FormField::Category]
            .into_iter()
            .map(|field| {
                (
                    field.label().to_string(),
                    self.form.value(field).to_string(),
                    self.form.focus == field,
                )
            })
            .collect();

        Some(FormInfo {
            fields,
            error: self.form.error.clone(),
        })
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        matches!(self.input_mode, InputMode::Search(_)).then(|| SearchBarInfo {
            query: self.search_query.clone(),
        })
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.visible.is_empty() {
            return None;
        }

        let (message, subtitle) = if self.store.is_empty() {
            (
                "No books on the shelf yet".to_string(),
                "Press 'a' to add your first book".to_string(),
            )
        } else if !self.search_query.trim().is_empty() {
            (
                format!("No books match \"{}\"", self.search_query.trim()),
                "Press ESC to clear the search".to_string(),
            )
        } else {
            (
                format!("No {} books", self.filter),
                "Press 'f' to change the filter or '0' to show all".to_string(),
            )
        };

        Some(EmptyState { message, subtitle })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Browse => {
                "j/k: navigate  a: add  d or [x]: delete  s: sort  f/0-6: filter  /: search  q: quit"
            }
            InputMode::Search(SearchFocus::Typing) => {
                "ESC: exit search  Enter: results  Ctrl+n/p: navigate  Type to filter"
            }
            InputMode::Search(SearchFocus::Navigating) => {
                "ESC: exit search  /: edit query  j/k: navigate  d: delete"
            }
            InputMode::Form => "Tab: next field  ←/→: category  Enter: add book  ESC: cancel",
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

fn grid_columns(cols: usize) -> usize {
    ((cols + CARD_GAP) / (CARD_MIN_WIDTH + CARD_GAP)).max(1)
}

fn card_width(cols: usize, columns: usize) -> usize {
    cols.saturating_sub(CARD_GAP * (columns - 1)) / columns
}

/// Shortens `text` to at most `max` characters, marking the cut with "...".
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let kept: String = text.chars().take(max - 3).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    fn state_with(books: &[(&str, &str, Category)]) -> AppState {
        let mut state = AppState::new(Theme::default(), "cover.png".to_string());
        for (title, author, category) in books {
            state.add_book(NewBook::new(*title, *author, *category));
        }
        state
    }

    fn many(n: usize) -> AppState {
        let mut state = AppState::new(Theme::default(), String::new());
        for i in 0..n {
            state.add_book(NewBook::new(format!("Book {i:02}"), "Anon", Category::Fiction));
        }
        state.selected_index = 0;
        state
    }

    #[test]
    fn add_book_uses_default_cover_and_selects_it() {
        let mut state = state_with(&[("Dune", "Frank Herbert", Category::Fiction)]);
        let id = state.add_book(NewBook::new("Emma", "Jane Austen", Category::Fiction));

        assert_eq!(state.store.get(id).unwrap().image_cover_url, "cover.png");
        assert_eq!(state.selected_book().unwrap().id, id);
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut state = many(3);
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn deleting_last_visible_clamps_selection() {
        let mut state = many(3);
        state.selected_index = 2;
        let id = state.selected_book().unwrap().id;

        state.delete_book(id);
        assert_eq!(state.selected_index, 1);
        assert_eq!(state.visible.len(), 2);
    }

    #[test]
    fn wide_panes_get_multiple_columns() {
        let state = many(4);
        let vm = state.compute_viewmodel(40, 100);

        assert_eq!(vm.cards.len(), 4);
        assert_eq!(vm.cards[0].col, 1);
        assert_eq!(vm.cards[1].row, vm.cards[0].row);
        assert!(vm.cards[1].col > vm.cards[0].col + vm.cards[0].width - 1);
        assert_eq!(vm.cards[3].row, vm.cards[0].row + CARD_HEIGHT);
    }

    #[test]
    fn grid_pages_to_the_selection() {
        let mut state = many(20);
        // 24 rows at 40 columns: one column, 17 grid rows, 3 cards per page.
        let first = state.compute_viewmodel(24, 40);
        assert_eq!(first.cards.len(), 3);
        assert!(first.cards[0].is_selected);

        state.selected_index = 7;
        let page = state.compute_viewmodel(24, 40);
        assert_eq!(page.cards[0].id, state.visible[6].id);
        assert!(page.cards[1].is_selected);
    }

    #[test]
    fn delete_affordance_sits_on_the_top_border() {
        let state = many(1);
        let vm = state.compute_viewmodel(24, 40);
        let card = &vm.cards[0];

        assert_eq!(card.delete_col + DELETE_LABEL.len() + 2, card.col + card.width);
        assert_eq!(
            vm.hit_test(card.row, card.delete_col),
            Some(crate::ui::viewmodel::Hit::Delete(card.id))
        );
    }

    #[test]
    fn long_titles_are_truncated_to_fit() {
        let state = state_with(&[(
            "A Remarkably Long Title That Cannot Possibly Fit",
            "Someone",
            Category::Fiction,
        )]);
        let vm = state.compute_viewmodel(24, 40);
        let card = &vm.cards[0];

        assert!(card.title.ends_with("..."));
        assert!(card.title.chars().count() <= card.width - TITLE_BORDER_OVERHEAD);
    }

    #[test]
    fn toolbar_reflects_filter_and_next_sort_action() {
        let mut state = many(1);
        state.filter = CategoryFilter::Only(Category::Comedy);
        state.sort = SortOrder::Ascending;

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.toolbar.filter, "Comedy");
        assert_eq!(vm.toolbar.sort_label, "Sort by Title Z → A");
    }

    #[test]
    fn empty_state_explains_why() {
        let state = AppState::new(Theme::default(), String::new());
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.empty_state.unwrap().message, "No books on the shelf yet");

        let mut state = many(2);
        state.filter = CategoryFilter::Only(Category::Biography);
        state.refresh_view();
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.empty_state.unwrap().message, "No Biography books");
    }

    #[test]
    fn search_highlights_title_matches() {
        let mut state = state_with(&[("Dune", "Frank Herbert", Category::Fiction)]);
        state.input_mode = InputMode::Search(SearchFocus::Typing);
        state.search_query = "dun".to_string();
        state.refresh_view();

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.cards[0].highlight_ranges, vec![(0, 3)]);
    }

    #[test]
    fn highlight_ranges_index_the_original_title() {
        // "İ" lowercases to two chars; ranges must still line up with the title as shown.
        let mut state = state_with(&[("İSTANBUL Dune", "Someone", Category::Fiction)]);
        state.input_mode = InputMode::Search(SearchFocus::Typing);
        state.search_query = "dune".to_string();
        state.refresh_view();

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.cards.len(), 1);
        assert_eq!(vm.cards[0].highlight_ranges, vec![(9, 13)]);
    }

    #[test]
    fn form_panel_pushes_the_grid_down() {
        let mut state = many(1);
        let browse_top = state.compute_viewmodel(24, 80).grid_top;

        state.input_mode = InputMode::Form;
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.grid_top, browse_top + FORM_ROWS);
        assert_eq!(vm.form.unwrap().fields.len(), 3);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("Ångström", 5), "Ån...");
        assert_eq!(truncate("short", 10), "short");
    }
}
