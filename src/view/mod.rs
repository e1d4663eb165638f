//! View pipeline: the filtered, sorted projection that gets rendered.
//!
//! ```text
//! BookStore ─► project(filter, sort) ─► narrow(search) ─► cards
//! ```
//!
//! - [`criteria`]: sort and filter state machines
//! - [`pipeline`]: pure projection functions

pub mod criteria;
pub mod pipeline;

pub use criteria::{CategoryFilter, SortOrder};
pub use pipeline::{narrow, project, search_text};
