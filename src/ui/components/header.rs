//! Header and toolbar renderers.
//!
//! The header carries the plugin title with visible/total counts. The toolbar
//! beneath it shows the active category filter and the sort control, whose
//! label always names what the next toggle will do.

use crate::ui::helpers::{center_padding, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{HeaderInfo, ToolbarInfo};

/// Renders the centered title bar at `row`. Returns the next free row.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = header.title.chars().count();
    let padding = center_padding(&header.title, cols);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));

    print!("{}", Theme::reset());
    row + 1
}

/// Renders the filter and sort controls at `row`. Returns the next free row.
///
/// ```text
///  Category: Technical (f)            [s] Sort by Title Z → A
/// ```
pub fn render_toolbar(row: usize, toolbar: &ToolbarInfo, theme: &Theme, cols: usize) -> usize {
    let (left, right) = toolbar_text(toolbar);
    let gap = cols.saturating_sub(left.chars().count() + right.chars().count());

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.toolbar_fg));
    if gap == 0 {
        print!("{}", crate::ui::helpers::fit(&left, cols));
    } else {
        print!("{left}{}{right}", " ".repeat(gap));
    }
    print!("{}", Theme::reset());
    row + 1
}

fn toolbar_text(toolbar: &ToolbarInfo) -> (String, String) {
    (
        format!(" Category: {} (f)", toolbar.filter),
        format!("[s] {} ", toolbar.sort_label),
    )
}
