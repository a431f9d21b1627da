//! Data provider interface
//!
//! The engine never fetches rows itself. It describes the slices it needs
//! as [`Query`] values and hands them to a `DataProvider`, which answers
//! with one [`Batch`] per query.

mod memory;

pub use memory::*;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ProviderError;
use crate::tree::ItemId;
use crate::window::Query;

/// A single item as supplied by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Unique item id.
    pub id: ItemId,
    /// Id of the parent item, `None` for top-level items.
    #[serde(default)]
    pub parent: Option<ItemId>,
    /// Display text.
    pub label: String,
    /// Declared child count, `None` (or 0) for leaves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<usize>,
    /// Position among the parent's children, if the provider reports it.
    ///
    /// When present it must match the position implied by the query offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl Row {
    /// Creates a leaf row.
    pub fn new(id: impl Into<ItemId>, parent: Option<&str>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent: parent.map(str::to_string),
            label: label.into(),
            children: None,
            offset: None,
        }
    }

    /// Sets the declared child count.
    pub fn with_children(mut self, children: usize) -> Self {
        self.children = Some(children);
        self
    }

    /// Sets the reported offset.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Returns `true` if the row declares at least one child.
    pub fn is_expandable(&self) -> bool {
        self.children.is_some_and(|children| children > 0)
    }
}

/// The rows answering one query, in increasing offset order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Batch {
    /// The parent whose children these are.
    #[serde(default)]
    pub parent: Option<ItemId>,
    /// Rows starting at the query offset.
    pub rows: Vec<Row>,
}

impl Batch {
    /// Creates a new batch.
    pub fn new(parent: Option<&str>, rows: Vec<Row>) -> Self {
        Self {
            parent: parent.map(str::to_string),
            rows,
        }
    }

    /// Returns the number of rows in this batch.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if this batch has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Decodes a batch from a JSON payload.
    pub fn from_json(payload: &str) -> Result<Self, ProviderError> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// Trait for data providers.
///
/// Implementations answer every query of a windowing pass at once and
/// must return exactly one batch per query, in query order. A batch may be
/// shorter than the query limit at the end of the data.
///
/// # Example
///
/// ```no_run
/// use vtree_lib::error::ProviderError;
/// use vtree_lib::provider::{DataProvider, InMemoryProvider};
/// use vtree_lib::Query;
///
/// async fn first_rows() -> Result<(), ProviderError> {
///     let provider = InMemoryProvider::generate(10, 3, 2);
///     let queries = [Query::new(None, 0, 5), Query::new(Some("0"), 0, 3)];
///     let batches = provider.fetch(&queries).await?;
///     assert_eq!(batches.len(), queries.len());
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetches one batch per query.
    async fn fetch(&self, queries: &[Query]) -> Result<Vec<Batch>, ProviderError>;
}

#[async_trait]
impl<T: DataProvider + ?Sized> DataProvider for std::sync::Arc<T> {
    async fn fetch(&self, queries: &[Query]) -> Result<Vec<Batch>, ProviderError> {
        (**self).fetch(queries).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_batch_from_json() {
        let batch = Batch::from_json(
            r#"{
                "parent": "a",
                "rows": [
                    { "id": "a.0", "parent": "a", "label": "First", "children": 3 },
                    { "id": "a.1", "parent": "a", "label": "Second", "offset": 1 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(batch.parent.as_deref(), Some("a"));
        assert!(batch.rows[0].is_expandable());
        assert!(!batch.rows[1].is_expandable());
        assert_eq!(batch.rows[1].offset, Some(1));
    }

    #[test]
    fn test_root_batch_parent_defaults() {
        let batch = Batch::from_json(r#"{ "rows": [{ "id": "0", "label": "Zero" }] }"#).unwrap();
        assert_eq!(batch.parent, None);
        assert_eq!(batch.rows[0].parent, None);
    }

    #[test]
    fn test_malformed_batch() {
        let err = Batch::from_json(r#"{ "rows": [{ "id": 7 }] }"#).unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
    }

    #[tokio::test]
    async fn test_shared_provider() {
        let provider: Arc<dyn DataProvider> = Arc::new(InMemoryProvider::generate(3, 0, 0));
        let batches = provider.fetch(&[Query::new(None, 1, 5)]).await.unwrap();
        assert_eq!(batches[0].len(), 2);
    }
}
