//! User interface rendering layer with component-based architecture.
//!
//! Transforms view models into ANSI-styled output: a header with counts, the
//! filter/sort toolbar, optional form or search panel, and a grid of book
//! cards.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//!                                     │
//!                                     └→ hit_test (mouse clicks)
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (cursor, fitting, highlighting)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    CardItem, EmptyState, FooterInfo, FormInfo, HeaderInfo, Hit, SearchBarInfo, ToolbarInfo, UIViewModel,
};
