//! Top-level rendering coordinator.
//!
//! Each frame is rebuilt from scratch: the pane is cleared, the view model is
//! recomputed from state, and every component redraws. Nothing from a previous
//! frame survives, so deleted or filtered-out cards cannot linger.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::helpers::clear_screen;

/// Renders the plugin UI to stdout for a pane of `rows` × `cols`.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    tracing::trace!(
        rows,
        cols,
        cards = viewmodel.cards.len(),
        empty = viewmodel.empty_state.is_some(),
        "rendering frame"
    );

    clear_screen();
    components::render_layout(&viewmodel, &state.theme, cols, rows);
}
