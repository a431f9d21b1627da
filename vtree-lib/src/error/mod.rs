//! Error types

mod merge;
mod provider;
mod tree;

pub use merge::*;
pub use provider::*;
pub use tree::*;

/// Top-level error for engine operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An expand/collapse request could not be applied.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// The provider answered in a way that violates the batch contract.
    #[error(transparent)]
    Merge(#[from] MergeError),

    /// The provider failed to answer.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}
