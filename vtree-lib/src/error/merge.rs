//! Response merge errors
//!
//! Every variant is a provider contract violation: the batches cannot be
//! placed without guessing, so the merge fails instead of mis-rendering.

use crate::tree::ItemId;

use super::tree::display_parent;

/// Errors raised while merging provider batches into a page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// The provider returned a different number of batches than queries.
    #[error("expected {expected} batches, got {actual}")]
    BatchCount { expected: usize, actual: usize },

    /// A batch (or a row inside it) names a different parent than its query.
    #[error(
        "batch {index}: expected parent {}, got {}",
        display_parent(.expected),
        display_parent(.actual)
    )]
    ParentMismatch {
        index: usize,
        expected: Option<ItemId>,
        actual: Option<ItemId>,
    },

    /// A batch holds more rows than its query asked for.
    #[error("batch {index}: limit was {limit}, got {actual} rows")]
    Overrun {
        index: usize,
        limit: usize,
        actual: usize,
    },

    /// A row declares an offset that does not follow the query offset.
    #[error("batch {index}, row {position}: expected offset {expected}, got {actual}")]
    OffsetSequence {
        index: usize,
        position: usize,
        expected: usize,
        actual: usize,
    },
}
