//! Add-book form panel renderer.
//!
//! Occupies six rows: a boxed block with one line per field and a message
//! line underneath for validation errors.
//!
//! ```text
//! ╭─ Add a book ───────────────────────────╮
//! │ ▸ Title:    Dune_                      │
//! │   Author:   Frank Herbert              │
//! │   Category: ◂ Fiction ▸                │
//! ╰────────────────────────────────────────╯
//!   Title is required
//! ```

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FormInfo;

const FORM_HEADING: &str = " Add a book ";

/// Renders the form at `row`. Returns the next free row.
pub fn render_form(row: usize, form: &FormInfo, theme: &Theme, cols: usize) -> usize {
    let inner_width = cols.saturating_sub(2);
    let border = Theme::fg(&theme.colors.search_bar_border);

    position_cursor(row, 1);
    print!("{border}╭─");
    print!("{}{FORM_HEADING}", Theme::bold());
    print!("{}{border}", Theme::reset());
    print!(
        "{}╮",
        "─".repeat(inner_width.saturating_sub(FORM_HEADING.chars().count() + 1))
    );
    print!("{}", Theme::reset());

    let mut current_row = row + 1;
    for (label, value, focused) in &form.fields {
        position_cursor(current_row, 1);
        print!("{border}│{}", Theme::reset());
        if *focused {
            print!("{}", Theme::fg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!("{}", fit(&field_line(label, value, *focused), inner_width));
        print!("{border}│{}", Theme::reset());
        current_row += 1;
    }

    position_cursor(current_row, 1);
    print!("{border}╰{}╯{}", "─".repeat(inner_width), Theme::reset());
    current_row += 1;

    position_cursor(current_row, 1);
    match &form.error {
        Some(error) => {
            print!("{}", Theme::fg(&theme.colors.form_error_fg));
            print!("{}", fit(&format!("  {error}"), cols));
            print!("{}", Theme::reset());
        }
        None => print!("{}", " ".repeat(cols)),
    }

    current_row + 1
}

/// One form line: cursor marker, padded label, then the value.
///
/// The category value is framed with arrows since it is chosen, not typed; a
/// focused text field shows a trailing `_` cursor.
fn field_line(label: &str, value: &str, focused: bool) -> String {
    let marker = if focused { "▸" } else { " " };
    let value = if label == "Category" {
        format!("◂ {value} ▸")
    } else if focused {
        format!("{value}_")
    } else {
        value.to_string()
    };
    format!(" {marker} {:<10}{value}", format!("{label}:"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focused_text_field_shows_cursor() {
        assert_eq!(field_line("Title", "Dune", true), " ▸ Title:    Dune_");
        assert_eq!(field_line("Author", "", false), "   Author:   ");
    }

    #[test]
    fn category_is_framed_as_a_choice() {
        assert_eq!(field_line("Category", "Comedy", false), "   Category: ◂ Comedy ▸");
    }
}
