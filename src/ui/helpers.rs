//! Shared rendering utilities.
//!
//! Cursor movement, screen clearing, fixed-width fitting, and search-match
//! highlighting. All widths are counted in characters, not bytes, so titles
//! with accents or box-drawing glyphs line up.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `row` and `col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Erases the whole pane and homes the cursor.
///
/// Every frame starts here, so a book removed since the last frame leaves
/// nothing behind.
pub fn clear_screen() {
    print!("\u{1b}[2J\u{1b}[H");
}

/// Pads or truncates `text` to exactly `width` characters.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.chars().take(width).collect()
    } else {
        format!("{text}{}", " ".repeat(width - len))
    }
}

/// Left padding that centers `text` within `width` columns.
#[must_use]
pub fn center_padding(text: &str, width: usize) -> usize {
    width.saturating_sub(text.chars().count()) / 2
}

/// Renders text with highlighted character ranges for search matches.
///
/// Ranges are `(start, end)` character indices, end exclusive. When the card
/// is selected the match colors would fight the selection colors, so the
/// text is printed plain and `restore` is left in effect.
///
/// `restore` is the escape sequence re-applied after each highlighted run.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool, restore: &str) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        let normal_section: String = chars[current_pos..start].iter().collect();
        print!("{normal_section}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{restore}");

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}
