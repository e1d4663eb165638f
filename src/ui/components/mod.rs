//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title bar with counts, plus the filter/sort toolbar
//! - [`form`]: Add-book form panel
//! - [`search`]: Search input box
//! - [`card`]: Card grid with per-card delete affordance
//! - [`empty`]: Message shown when no card is visible
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Toolbar]
//! [Border]
//! [Form panel - 6 lines]     (form open)
//! [Search bar - 3 lines]     (search mode)
//! [Card grid | Empty state]
//! [Border]
//! [Footer]
//! ```

mod card;
mod empty;
mod footer;
mod form;
mod header;
mod search;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use card::render_cards;
use empty::render_empty_state;
use footer::render_footer;
use form::render_form;
use header::{render_header, render_toolbar};
use search::render_search_bar;

/// Renders a horizontal separator at `row`. Returns the next free row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders a full frame.
///
/// Panels are drawn top-down; the grid starts at `vm.grid_top`, which the
/// view model already shifted past whichever panel is open.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Row 1 stays blank

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_toolbar(current_row, &vm.toolbar, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    if let Some(form) = &vm.form {
        current_row = render_form(current_row, form, theme, cols);
    }
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }
    debug_assert_eq!(current_row, vm.grid_top);

    match &vm.empty_state {
        Some(empty) => render_empty_state(vm.grid_top, empty, theme, cols),
        None => render_cards(&vm.cards, theme),
    }

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}
