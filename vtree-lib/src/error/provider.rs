//! Data provider errors

use crate::tree::ItemId;

/// Errors a [`DataProvider`](crate::provider::DataProvider) may return.
///
/// The engine never retries; retry policy belongs to the provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The backing store could not answer.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// A query named a parent the provider knows nothing about.
    #[error("unknown parent '{0}'")]
    UnknownParent(ItemId),

    /// Row payloads could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ProviderError {
    /// Creates a new unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}
