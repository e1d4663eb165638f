//! Card grid renderer.
//!
//! Each book is a bordered card, [`CARD_HEIGHT`] rows tall, placed at the
//! cell computed for it in the view model. The `[x]` delete affordance sits on
//! the top border at `delete_col`, the same column `hit_test` resolves clicks
//! against.
//!
//! ```text
//! ╭─ Clean Code ───────────────[x]─╮
//! │ Robert Martin                  │
//! │ Technical              3h ago  │
//! │ cover: https://covers.openli...│
//! ╰────────────────────────────────╯
//! ```

use crate::ui::helpers::{self, fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardItem, CARD_HEIGHT, DELETE_LABEL};

/// Renders every card of the current page.
pub fn render_cards(cards: &[CardItem], theme: &Theme) {
    for card in cards {
        render_card(card, theme);
    }
}

fn render_card(card: &CardItem, theme: &Theme) {
    let border = if card.is_selected {
        Theme::fg(&theme.colors.selection_bg)
    } else {
        Theme::fg(&theme.colors.card_border)
    };
    let inner = inner_width(card);

    position_cursor(card.row, card.col);
    print!("{border}╭─ {}", Theme::reset());
    let title_style = if card.is_selected {
        format!(
            "{}{}{}",
            Theme::bold(),
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.text_normal))
    };
    print!("{title_style}");
    helpers::render_highlighted_text(&card.title, &card.highlight_ranges, theme, card.is_selected, &title_style);
    print!("{}", Theme::reset());
    print!("{border} {}", "─".repeat(top_fill(card)));
    print!("{}{DELETE_LABEL}{}", Theme::fg(&theme.colors.delete_fg), Theme::reset());
    print!("{border}─╮{}", Theme::reset());

    let [author, category_line, cover] = body_lines(card, inner);
    let body_styles = [
        Theme::fg(&theme.colors.text_normal),
        Theme::fg(&theme.colors.category_fg),
        format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim)),
    ];
    for (offset, (line, style)) in [author, category_line, cover].iter().zip(body_styles.iter()).enumerate() {
        position_cursor(card.row + 1 + offset, card.col);
        print!("{border}│ {}{style}{line}{}{border} │{}", Theme::reset(), Theme::reset(), Theme::reset());
    }

    position_cursor(card.row + CARD_HEIGHT - 1, card.col);
    print!("{border}╰{}╯{}", "─".repeat(card.width.saturating_sub(2)), Theme::reset());
}

/// Text columns between `│ ` and ` │`.
fn inner_width(card: &CardItem) -> usize {
    card.width.saturating_sub(4)
}

/// `─` characters between the title and the delete label, so the label ends
/// two columns before the card's right edge.
fn top_fill(card: &CardItem) -> usize {
    let used = "╭─ ".chars().count() + card.title.chars().count() + 1 + DELETE_LABEL.len() + "─╮".chars().count();
    card.width.saturating_sub(used)
}

/// Author, category with age, and cover lines, each exactly `inner` wide.
fn body_lines(card: &CardItem, inner: usize) -> [String; 3] {
    let gap = inner.saturating_sub(card.category.chars().count() + card.added.chars().count());
    let category_line = if gap == 0 {
        fit(&card.category, inner)
    } else {
        format!("{}{}{}", card.category, " ".repeat(gap), card.added)
    };

    [
        fit(&card.author, inner),
        category_line,
        fit(&format!("cover: {}", card.cover_url), inner),
    ]
}
