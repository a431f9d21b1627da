//! Windowing: viewport geometry, query synthesis and response merging.
//!
//! A pass runs in three steps:
//!
//! 1. [`build_queries`] indexes the expansion tree and describes the rows
//!    covering a [`Viewport`] as a list of [`Query`] slices.
//! 2. An external provider answers each query with a batch of rows.
//! 3. [`merge_batches`] splices the batches into one ordered row sequence.

mod merge;
mod page;
mod query;
mod viewport;

pub use merge::merge_batches;
pub use page::{Page, RenderedRow};
pub use query::{Query, build_queries};
pub use viewport::Viewport;
