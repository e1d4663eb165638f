//! Search bar component renderer.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

/// Renders the 3-row search box at `row`. Returns the next free row.
///
/// ```text
///   ╭──────────────────────────╮
///   │ Search: dune herbert     │
///   ╰──────────────────────────╯
/// ```
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let margin = " ".repeat(SEARCH_BOX_MARGIN);
    let border = Theme::fg(&theme.colors.search_bar_border);

    position_cursor(row, 1);
    print!("{margin}{border}╭{}╮{}", "─".repeat(inner_width), Theme::reset());

    position_cursor(row + 1, 1);
    print!("{margin}{border}│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{}", fit(&format!(" Search: {}", search.query), inner_width));
    print!("{border}│{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{margin}{border}╰{}╯{}", "─".repeat(inner_width), Theme::reset());

    row + 3
}
