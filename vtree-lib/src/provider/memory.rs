//! In-memory provider implementation using DashMap

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;

use super::Batch;
use super::DataProvider;
use super::Row;
use crate::error::ProviderError;
use crate::tree::ItemId;
use crate::window::Query;

/// A provider backed by a concurrent map of `parent -> children`.
///
/// Useful for tests, demos and small data sets that fit in memory. Rows are
/// answered with their `offset` and `parent` filled in.
///
/// # Example
///
/// ```
/// use vtree_lib::provider::{InMemoryProvider, Row};
///
/// let provider = InMemoryProvider::new();
/// provider.insert_children(None, vec![
///     Row::new("a", None, "Alpha").with_children(1),
///     Row::new("b", None, "Beta"),
/// ]);
/// provider.insert_children(Some("a"), vec![Row::new("a.0", Some("a"), "Alpha 0")]);
///
/// assert_eq!(provider.root_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    store: DashMap<Option<ItemId>, Vec<Row>>,
    latency: Option<Duration>,
    offline: AtomicBool,
}

impl InMemoryProvider {
    /// Creates a new empty provider.
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
            latency: None,
            offline: AtomicBool::new(false),
        }
    }

    /// Generates a synthetic tree.
    ///
    /// `roots` top-level items, each branch having `fan_out` children down to
    /// `depth` levels below the top. Ids are dotted offset paths (`"3.0.1"`).
    pub fn generate(roots: usize, fan_out: usize, depth: usize) -> Self {
        let provider = Self::new();
        provider.generate_level(None, roots, fan_out, depth);
        provider
    }

    fn generate_level(&self, parent: Option<&str>, count: usize, fan_out: usize, depth: usize) {
        let children = if depth == 0 { 0 } else { fan_out };
        let rows: Vec<Row> = (0..count)
            .map(|offset| {
                let id = match parent {
                    Some(parent) => format!("{}.{}", parent, offset),
                    None => offset.to_string(),
                };
                let row = Row::new(id.clone(), parent, format!("Item {}", id));
                if children > 0 { row.with_children(children) } else { row }
            })
            .collect();

        if children > 0 {
            for row in &rows {
                self.generate_level(Some(&row.id), children, fan_out, depth - 1);
            }
        }
        self.insert_children(parent, rows);
    }

    /// Delays every fetch by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Takes the provider offline or back online.
    ///
    /// While offline every fetch fails with [`ProviderError::Unavailable`].
    pub fn set_available(&self, available: bool) {
        self.offline.store(!available, Ordering::Relaxed);
    }

    /// Replaces the children of `parent`.
    pub fn insert_children(&self, parent: Option<&str>, rows: Vec<Row>) {
        self.store.insert(parent.map(str::to_string), rows);
    }

    /// Returns the number of top-level items.
    pub fn root_count(&self) -> usize {
        self.child_count(None)
    }

    /// Returns the number of children stored for `parent`.
    pub fn child_count(&self, parent: Option<&str>) -> usize {
        self.store
            .get(&parent.map(str::to_string))
            .map(|rows| rows.len())
            .unwrap_or(0)
    }

    fn answer(&self, query: &Query) -> Result<Batch, ProviderError> {
        let children = match self.store.get(&query.parent) {
            Some(children) => children,
            // Nothing is requested, e.g. an expanded item without children.
            None if query.limit == 0 => {
                return Ok(Batch {
                    parent: query.parent.clone(),
                    rows: Vec::new(),
                });
            }
            // Top-level items may legitimately be absent in an empty store.
            None if query.parent.is_none() => return Ok(Batch::new(None, Vec::new())),
            None => {
                return Err(ProviderError::UnknownParent(
                    query.parent.clone().unwrap_or_default(),
                ));
            }
        };

        let rows = children
            .iter()
            .enumerate()
            .skip(query.offset)
            .take(query.limit)
            .map(|(offset, row)| Row {
                parent: query.parent.clone(),
                offset: Some(offset),
                ..row.clone()
            })
            .collect();

        Ok(Batch {
            parent: query.parent.clone(),
            rows,
        })
    }
}

#[async_trait]
impl DataProvider for InMemoryProvider {
    async fn fetch(&self, queries: &[Query]) -> Result<Vec<Batch>, ProviderError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.offline.load(Ordering::Relaxed) {
            return Err(ProviderError::unavailable("in-memory provider is offline"));
        }
        queries.iter().map(|query| self.answer(query)).collect()
    }
}
