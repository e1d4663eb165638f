//! Event handling and state transition logic.
//!
//! This module holds the command handlers: every user action arrives as an
//! [`Event`], mutates [`AppState`], and reprojects the view when the shelf,
//! the filter, the sort order, or the search query changed.
//!
//! # Architecture
//!
//! 1. The plugin shim maps Zellij keys and mouse clicks to [`Event`]s
//! 2. [`handle_event`] pattern-matches the event
//! 3. State mutations go through `AppState` and the `BookStore` it owns
//! 4. The handler reports whether to re-render plus any [`Action`]s
//!
//! # Event Types
//!
//! - **Shelf commands**: `SubmitForm`, `DeleteSelected`, `DeleteBook`,
//!   `DeleteMatching`, `ToggleSort`, `ChangeFilter`, `NextFilter`, `PreviousFilter`
//! - **Form editing**: `OpenForm`, `CancelForm`, `NextField`, `PreviousField`,
//!   `CycleCategory`
//! - **Search**: `SearchMode`, `FocusSearchBar`, `FocusResults`, `ExitSearch`
//! - **Input**: `Char`, `Backspace`, `Escape`, `Click`
//! - **Navigation**: `KeyDown`, `KeyUp`, `CloseFocus`, `Resize`
//!
//! # Example
//!
//! ```rust
//! use bookshelf::app::{handle_event, AppState, Event};
//! use bookshelf::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), String::new());
//! let (should_render, actions) = handle_event(&mut state, &Event::ToggleSort)?;
//! assert!(should_render);
//! assert!(actions.is_empty());
//! # Ok::<(), bookshelf::BookshelfError>(())
//! ```

use super::modes::{InputMode, SearchFocus};
use crate::app::{Action, AppState};
use crate::domain::error::{BookshelfError, Result};
use crate::domain::BookId;
use crate::ui::viewmodel::Hit;
use crate::view::CategoryFilter;

/// Events triggered by user input or by the plugin host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves selection to the next card (wraps to first).
    KeyDown,
    /// Moves selection to the previous card (wraps to last).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,

    /// Opens the add form with empty fields.
    OpenForm,
    /// Closes the add form, discarding its input.
    CancelForm,
    /// Moves form focus to the next field.
    NextField,
    /// Moves form focus to the previous field.
    PreviousField,
    /// Changes the category selected in the form.
    CycleCategory {
        forward: bool,
    },
    /// Validates the form and, when valid, adds the book.
    SubmitForm,

    /// Deletes the book under the selection cursor.
    DeleteSelected,
    /// Deletes the book with this id.
    DeleteBook(BookId),
    /// Deletes the first book whose title and author match exactly.
    DeleteMatching {
        title: String,
        author: String,
    },

    /// Flips title sort order (first activation sorts A → Z).
    ToggleSort,
    /// Shows only the given category, or everything for [`CategoryFilter::All`].
    ChangeFilter(CategoryFilter),
    /// Advances the category filter (All → each category → All).
    NextFilter,
    /// Moves the category filter backwards.
    PreviousFilter,

    /// Enters search mode with typing focus.
    SearchMode,
    /// Focuses the search input (from navigating).
    FocusSearchBar,
    /// Focuses the search results (from typing).
    FocusResults,
    /// Leaves search mode and clears the query.
    ExitSearch,

    /// Types a character into the search query or the focused form field.
    Char(char),
    /// Removes the last character of the search query or focused form field.
    Backspace,
    /// Clears search and returns to browsing.
    Escape,

    /// Left mouse click at a 0-based pane `line` and `col`.
    Click {
        line: isize,
        col: usize,
    },

    /// The pane was resized or rendered at a new size.
    Resize {
        rows: usize,
        cols: usize,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`. `should_render` is `false` when the event
/// changed nothing visible.
///
/// # Errors
///
/// Form validation failures are absorbed here (shown on the form), so the
/// only errors that escape are unexpected ones from deeper layers.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),

        Event::OpenForm => {
            tracing::debug!("opening add form");
            state.form = super::form::AddForm::default();
            state.input_mode = InputMode::Form;
            state.search_query.clear();
            state.refresh_view();
            Ok((true, vec![]))
        }
        Event::CancelForm => {
            if state.input_mode != InputMode::Form {
                return Ok((false, vec![]));
            }
            tracing::debug!("add form cancelled");
            state.form = super::form::AddForm::default();
            state.input_mode = InputMode::Browse;
            Ok((true, vec![]))
        }
        Event::NextField => {
            if state.input_mode != InputMode::Form {
                return Ok((false, vec![]));
            }
            state.form.focus_next();
            Ok((true, vec![]))
        }
        Event::PreviousField => {
            if state.input_mode != InputMode::Form {
                return Ok((false, vec![]));
            }
            state.form.focus_previous();
            Ok((true, vec![]))
        }
        Event::CycleCategory { forward } => {
            if state.input_mode != InputMode::Form {
                return Ok((false, vec![]));
            }
            state.form.cycle_category(*forward);
            Ok((true, vec![]))
        }
        Event::SubmitForm => {
            if state.input_mode != InputMode::Form {
                return Ok((false, vec![]));
            }
            submit_form(state)
        }

        Event::DeleteSelected => {
            let Some(id) = state.selected_book().map(|book| book.id) else {
                tracing::debug!("no book selected to delete");
                return Ok((false, vec![]));
            };
            Ok((delete_book(state, id), vec![]))
        }
        Event::DeleteBook(id) => Ok((delete_book(state, *id), vec![])),
        Event::DeleteMatching { title, author } => {
            let removed = state.delete_matching(title, author);
            tracing::debug!(
                title = %title,
                author = %author,
                removed = removed.is_some(),
                "delete by title and author"
            );
            Ok((removed.is_some(), vec![]))
        }

        Event::ToggleSort => {
            state.sort = state.sort.toggle();
            tracing::debug!(sort = ?state.sort, label = state.sort.next_action_label(), "sort toggled");
            state.refresh_view();
            Ok((true, vec![]))
        }
        Event::ChangeFilter(filter) => Ok((change_filter(state, *filter), vec![])),
        Event::NextFilter => {
            let next = state.filter.next();
            Ok((change_filter(state, next), vec![]))
        }
        Event::PreviousFilter => {
            let previous = state.filter.previous();
            Ok((change_filter(state, previous), vec![]))
        }

        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.search_query.clear();
            state.refresh_view();
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            if !matches!(state.input_mode, InputMode::Search(_)) {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if !matches!(state.input_mode, InputMode::Search(_)) {
                return Ok((false, vec![]));
            }
            if state.search_query.trim().is_empty() {
                exit_search(state);
                return Ok((true, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            Ok((true, vec![]))
        }
        Event::ExitSearch | Event::Escape => {
            if state.input_mode == InputMode::Form {
                return handle_event(state, &Event::CancelForm);
            }
            exit_search(state);
            Ok((true, vec![]))
        }

        Event::Char(c) => match state.input_mode {
            InputMode::Form => {
                state.form.push_char(*c);
                Ok((true, vec![]))
            }
            InputMode::Search(_) => {
                state.search_query.push(*c);
                tracing::trace!(query = %state.search_query, char = %c, "search query updated");
                state.refresh_view();
                Ok((true, vec![]))
            }
            InputMode::Browse => Ok((false, vec![])),
        },
        Event::Backspace => match state.input_mode {
            InputMode::Form => {
                state.form.backspace();
                Ok((true, vec![]))
            }
            InputMode::Search(_) => {
                state.search_query.pop();
                state.refresh_view();
                Ok((true, vec![]))
            }
            InputMode::Browse => Ok((false, vec![])),
        },

        Event::Click { line, col } => handle_click(state, *line, *col),

        Event::Resize { rows, cols } => {
            let changed = state.viewport != (*rows, *cols);
            state.viewport = (*rows, *cols);
            Ok((changed, vec![]))
        }
    }
}

/// Adds the form's book when it validates; otherwise leaves the form open
/// with its message.
fn submit_form(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    match state.form.submit() {
        Ok(book) => {
            let title = book.title.clone();
            let id = state.add_book(book);
            state.input_mode = InputMode::Browse;
            tracing::debug!(book_id = %id, title = %title, total = state.store.len(), "book added");
            Ok((true, vec![]))
        }
        Err(BookshelfError::Validation(message)) => {
            tracing::debug!(reason = %message, "add form rejected");
            Ok((true, vec![]))
        }
        Err(e) => Err(e),
    }
}

fn delete_book(state: &mut AppState, id: BookId) -> bool {
    match state.delete_book(id) {
        Some(book) => {
            tracing::debug!(book_id = %id, title = %book.title, remaining = state.store.len(), "book deleted");
            true
        }
        None => {
            tracing::debug!(book_id = %id, "delete target not found");
            false
        }
    }
}

fn change_filter(state: &mut AppState, filter: CategoryFilter) -> bool {
    if state.filter == filter {
        return false;
    }
    tracing::debug!(from = %state.filter, to = %filter, "filter changed");
    state.filter = filter;
    state.refresh_view();
    true
}

fn exit_search(state: &mut AppState) {
    tracing::debug!(query = %state.search_query, "exiting search mode");
    state.input_mode = InputMode::Browse;
    state.search_query.clear();
    state.refresh_view();
}

/// Resolves a click against the cards laid out for the last known viewport.
///
/// Zellij reports 0-based pane coordinates; the layout uses 1-based cells.
fn handle_click(state: &mut AppState, line: isize, col: usize) -> Result<(bool, Vec<Action>)> {
    let (rows, cols) = state.viewport;
    let Ok(line) = usize::try_from(line) else {
        return Ok((false, vec![]));
    };
    if rows == 0 || cols == 0 {
        tracing::debug!("click before first render, ignoring");
        return Ok((false, vec![]));
    }

    let hit = state.compute_viewmodel(rows, cols).hit_test(line + 1, col + 1);
    tracing::debug!(line, col, hit = ?hit, "click resolved");

    match hit {
        Some(Hit::Delete(id)) => Ok((delete_book(state, id), vec![])),
        Some(Hit::Card(id)) => Ok((state.select_book(id), vec![])),
        None => Ok((false, vec![])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, DEFAULT_COVER_URL};
    use crate::ui::Theme;
    use crate::view::SortOrder;

    fn new_state() -> AppState {
        AppState::new(Theme::default(), DEFAULT_COVER_URL.to_string())
    }

    fn send(state: &mut AppState, event: Event) -> bool {
        handle_event(state, &event).unwrap().0
    }

    fn type_str(state: &mut AppState, s: &str) {
        for c in s.chars() {
            send(state, Event::Char(c));
        }
    }

    fn add_via_form(state: &mut AppState, title: &str, author: &str, category: Category) {
        send(state, Event::OpenForm);
        type_str(state, title);
        send(state, Event::NextField);
        type_str(state, author);
        send(state, Event::NextField);
        while state.form.category != category {
            send(state, Event::CycleCategory { forward: true });
        }
        send(state, Event::SubmitForm);
    }

    fn visible_titles(state: &AppState) -> Vec<&str> {
        state.visible.iter().map(|b| b.title.as_str()).collect()
    }

    fn store_titles(state: &AppState) -> Vec<&str> {
        state.store.books().iter().map(|b| b.title.as_str()).collect()
    }

    fn sample() -> AppState {
        let mut state = new_state();
        add_via_form(&mut state, "Dune", "Frank Herbert", Category::Technical);
        add_via_form(&mut state, "Clean Code", "Robert Martin", Category::Technical);
        add_via_form(&mut state, "Calvin and Hobbes", "Bill Watterson", Category::Comedy);
        state
    }

    #[test]
    fn bookshelf_walkthrough() {
        let mut state = sample();
        assert_eq!(store_titles(&state), ["Dune", "Clean Code", "Calvin and Hobbes"]);

        send(&mut state, Event::ChangeFilter(CategoryFilter::Only(Category::Technical)));
        assert_eq!(visible_titles(&state), ["Dune", "Clean Code"]);

        send(&mut state, Event::ChangeFilter(CategoryFilter::All));
        send(&mut state, Event::ToggleSort);
        assert_eq!(state.sort, SortOrder::Ascending);
        assert_eq!(visible_titles(&state), ["Calvin and Hobbes", "Clean Code", "Dune"]);

        send(
            &mut state,
            Event::DeleteMatching {
                title: "Clean Code".to_string(),
                author: "Robert Martin".to_string(),
            },
        );
        assert_eq!(state.store.len(), 2);
        assert_eq!(store_titles(&state), ["Dune", "Calvin and Hobbes"]);

        // Sort order survives the delete until toggled again.
        assert_eq!(state.sort, SortOrder::Ascending);
        assert_eq!(visible_titles(&state), ["Calvin and Hobbes", "Dune"]);

        let unsorted = crate::view::project(state.store.books(), CategoryFilter::All, SortOrder::Unsorted);
        let unsorted: Vec<&str> = unsorted.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(unsorted, ["Dune", "Calvin and Hobbes"]);
    }

    #[test]
    fn add_trims_input_and_closes_form() {
        let mut state = new_state();
        add_via_form(&mut state, "  Dune  ", "\tFrank Herbert ", Category::Fiction);

        let book = &state.store.books()[0];
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.image_cover_url, DEFAULT_COVER_URL);
        assert_eq!(state.input_mode, InputMode::Browse);
        assert_eq!(state.form, super::super::form::AddForm::default());
    }

    #[test]
    fn blank_required_field_blocks_submission() {
        let mut state = new_state();
        send(&mut state, Event::OpenForm);
        type_str(&mut state, "   ");
        send(&mut state, Event::NextField);
        type_str(&mut state, "Someone");

        assert!(send(&mut state, Event::SubmitForm));
        assert!(state.store.is_empty());
        assert_eq!(state.input_mode, InputMode::Form);
        assert_eq!(state.form.error.as_deref(), Some("Title is required"));
        assert_eq!(state.form.author, "Someone");
    }

    #[test]
    fn escape_in_form_discards_input() {
        let mut state = new_state();
        send(&mut state, Event::OpenForm);
        type_str(&mut state, "Dune");
        send(&mut state, Event::Escape);

        assert_eq!(state.input_mode, InputMode::Browse);
        assert!(state.form.title.is_empty());
        assert!(state.store.is_empty());
    }

    #[test]
    fn n_adds_give_n_books_in_order() {
        let mut state = new_state();
        let titles: Vec<String> = (0..7).map(|i| format!("Volume {i}")).collect();
        for title in &titles {
            add_via_form(&mut state, title, "Anon", Category::Fantasy);
        }

        assert_eq!(state.store.len(), titles.len());
        assert_eq!(store_titles(&state), titles);
    }

    #[test]
    fn delete_selected_targets_the_selected_card_under_sort() {
        let mut state = sample();
        send(&mut state, Event::ToggleSort);
        send(&mut state, Event::ToggleSort);
        assert_eq!(visible_titles(&state), ["Dune", "Clean Code", "Calvin and Hobbes"]);

        state.selected_index = 2;
        send(&mut state, Event::DeleteSelected);
        assert_eq!(store_titles(&state), ["Dune", "Clean Code"]);
    }

    #[test]
    fn delete_by_id_spares_structural_duplicates() {
        let mut state = new_state();
        add_via_form(&mut state, "Dune", "Frank Herbert", Category::Fiction);
        add_via_form(&mut state, "Emma", "Jane Austen", Category::Fiction);
        add_via_form(&mut state, "Dune", "Frank Herbert", Category::Fiction);
        let second_dune = state.store.books()[2].id;

        assert!(send(&mut state, Event::DeleteBook(second_dune)));
        let ids: Vec<BookId> = state.store.books().iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), 2);
        assert!(!ids.contains(&second_dune));
        assert_eq!(store_titles(&state), ["Dune", "Emma"]);
    }

    #[test]
    fn deleting_unknown_targets_is_silent() {
        let mut state = sample();
        assert!(!send(&mut state, Event::DeleteBook(BookId(404))));
        assert!(!send(
            &mut state,
            Event::DeleteMatching {
                title: "Missing".to_string(),
                author: "Nobody".to_string(),
            }
        ));
        assert_eq!(state.store.len(), 3);
    }

    #[test]
    fn sort_toggle_cycles_asc_desc_and_updates_label() {
        let mut state = sample();
        assert_eq!(state.sort.next_action_label(), "Sort by Title A → Z");

        send(&mut state, Event::ToggleSort);
        assert_eq!(state.sort, SortOrder::Ascending);
        assert_eq!(state.sort.next_action_label(), "Sort by Title Z → A");

        send(&mut state, Event::ToggleSort);
        assert_eq!(state.sort, SortOrder::Descending);
        assert_eq!(visible_titles(&state), ["Dune", "Clean Code", "Calvin and Hobbes"]);

        send(&mut state, Event::ToggleSort);
        assert_eq!(state.sort, SortOrder::Ascending);
    }

    #[test]
    fn filtering_never_reorders_the_store() {
        let mut state = sample();
        send(&mut state, Event::ToggleSort);
        send(&mut state, Event::NextFilter);
        send(&mut state, Event::PreviousFilter);

        assert_eq!(state.filter, CategoryFilter::All);
        assert_eq!(store_titles(&state), ["Dune", "Clean Code", "Calvin and Hobbes"]);
    }

    #[test]
    fn changing_to_the_same_filter_skips_render() {
        let mut state = sample();
        assert!(!send(&mut state, Event::ChangeFilter(CategoryFilter::All)));
    }

    #[test]
    fn click_on_delete_affordance_removes_that_book() {
        let mut state = sample();
        send(&mut state, Event::ChangeFilter(CategoryFilter::Only(Category::Technical)));
        send(&mut state, Event::ToggleSort);
        send(&mut state, Event::Resize { rows: 40, cols: 40 });

        let vm = state.compute_viewmodel(40, 40);
        let target = &vm.cards[1];
        assert_eq!(state.store.get(target.id).unwrap().title, "Dune");

        let line = isize::try_from(target.row - 1).unwrap();
        assert!(send(&mut state, Event::Click { line, col: target.delete_col - 1 }));
        assert_eq!(store_titles(&state), ["Clean Code", "Calvin and Hobbes"]);
    }

    #[test]
    fn click_on_card_body_selects_it() {
        let mut state = sample();
        send(&mut state, Event::Resize { rows: 40, cols: 40 });
        state.selected_index = 0;

        let vm = state.compute_viewmodel(40, 40);
        let target = &vm.cards[2];
        let line = isize::try_from(target.row + 1).unwrap();
        assert!(send(&mut state, Event::Click { line, col: target.col + 2 }));
        assert_eq!(state.selected_index, 2);
        assert_eq!(state.store.len(), 3);
    }

    #[test]
    fn click_before_first_render_is_ignored() {
        let mut state = sample();
        assert!(!send(&mut state, Event::Click { line: 5, col: 5 }));
        assert!(!send(&mut state, Event::Click { line: -1, col: 0 }));
    }

    #[test]
    fn search_narrows_and_exit_restores() {
        let mut state = sample();
        send(&mut state, Event::SearchMode);
        type_str(&mut state, "watterson");
        assert_eq!(visible_titles(&state), ["Calvin and Hobbes"]);

        send(&mut state, Event::FocusResults);
        assert_eq!(state.input_mode, InputMode::Search(SearchFocus::Navigating));

        send(&mut state, Event::ExitSearch);
        assert_eq!(state.input_mode, InputMode::Browse);
        assert_eq!(state.visible.len(), 3);
    }

    #[test]
    fn chars_in_browse_mode_are_ignored() {
        let mut state = sample();
        assert!(!send(&mut state, Event::Char('x')));
        assert!(!send(&mut state, Event::Backspace));
        assert!(state.search_query.is_empty());
    }

    #[test]
    fn close_focus_emits_action() {
        let mut state = new_state();
        let (render, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
        assert!(!render);
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
