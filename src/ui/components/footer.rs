//! Footer component renderer.

use crate::ui::helpers::{center_padding, fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the keybinding hints centered at `row`, truncated to the pane width.
///
/// Returns the next available row.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text = fit(&footer.keybindings, footer.keybindings.chars().count().min(cols));
    let padding = center_padding(&help_text, cols);

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(padding));
    print!("{help_text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + help_text.chars().count())));
    print!("{}", Theme::reset());
    row + 1
}
