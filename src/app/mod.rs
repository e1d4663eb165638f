//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (main.rs) and the store/view layers. Every
//! user command flows through one event handler that mutates state and
//! reprojects the visible cards.
//!
//! # Architecture
//!
//! ```text
//! Key / Mouse → Event → handle_event → AppState (store + view criteria)
//!                                          │
//!                                          ├─→ refresh_view → visible cards
//!                                          └─→ Action → plugin runtime
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`form`]: Add-book form editing and validation
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input mode state machine types
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use bookshelf::app::{handle_event, AppState, Event};
//! use bookshelf::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), String::new());
//! handle_event(&mut state, &Event::OpenForm)?;
//! for c in "Dune".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! handle_event(&mut state, &Event::NextField)?;
//! for c in "Frank Herbert".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! handle_event(&mut state, &Event::SubmitForm)?;
//! assert_eq!(state.store.len(), 1);
//! # Ok::<(), bookshelf::BookshelfError>(())
//! ```

pub mod actions;
pub mod form;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use form::AddForm;
pub use handler::{handle_event, Event};
pub use modes::{FormField, InputMode, SearchFocus};
pub use state::AppState;
