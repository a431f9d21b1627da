//! Response merging.
//!
//! Batches arrive in query order, which is pre-order: a parent's batch is
//! placed before the batches of expansions nested in it. Each batch is
//! spliced directly below its parent row. A batch whose parent row is not on
//! the page belongs to an expansion that starts above the viewport, so its
//! rows are the top-most content and are prepended.
//!
//! ```text
//!       Item 1.1.1   <- batch for 1.1, parent row scrolled away
//!    Item 1.2        <- batch for 1, parent row scrolled away
//!    Item 1.3
//! Item 2             <- root batch
//! Item 3
//! ```
//!
//! This relies on providers answering in query order; an absent parent is
//! assumed to be above the viewport, not missing.

use crate::error::MergeError;
use crate::provider::Batch;
use crate::tree::ExpansionTree;

use super::Query;
use super::RenderedRow;

/// Merges provider batches into one top-to-bottom row sequence.
///
/// `queries` must be the queries the batches answer, exactly as sent.
/// Batches whose parent is no longer expanded in `tree` (collapsed while
/// the fetch was in flight) are dropped.
pub fn merge_batches(
    tree: &ExpansionTree,
    queries: &[Query],
    batches: Vec<Batch>,
) -> Result<Vec<RenderedRow>, MergeError> {
    if batches.len() != queries.len() {
        return Err(MergeError::BatchCount {
            expected: queries.len(),
            actual: batches.len(),
        });
    }

    let mut output: Vec<RenderedRow> = Vec::new();

    for (index, (query, batch)) in queries.iter().zip(batches).enumerate() {
        validate(index, query, &batch)?;

        let Some(indent) = tree.level_of(query.parent.as_deref()) else {
            log::debug!(
                "[window] dropping {} rows of collapsed parent {:?}",
                batch.len(),
                query.parent
            );
            continue;
        };

        let rows = batch.rows.into_iter().enumerate().map(|(position, row)| {
            let expanded = tree.is_expanded(&row.id);
            RenderedRow {
                offset: query.offset + position,
                indent,
                expanded,
                row,
            }
        });

        let anchor = query
            .parent
            .as_deref()
            .and_then(|parent| output.iter().position(|row| row.id() == parent));

        match anchor {
            Some(position) => {
                output.splice(position + 1..position + 1, rows);
            }
            None => {
                output.splice(0..0, rows);
            }
        }
    }

    Ok(output)
}

fn validate(index: usize, query: &Query, batch: &Batch) -> Result<(), MergeError> {
    if batch.parent != query.parent {
        return Err(MergeError::ParentMismatch {
            index,
            expected: query.parent.clone(),
            actual: batch.parent.clone(),
        });
    }

    if batch.len() > query.limit {
        return Err(MergeError::Overrun {
            index,
            limit: query.limit,
            actual: batch.len(),
        });
    }

    for (position, row) in batch.rows.iter().enumerate() {
        if row.parent != query.parent {
            return Err(MergeError::ParentMismatch {
                index,
                expected: query.parent.clone(),
                actual: row.parent.clone(),
            });
        }

        let expected = query.offset + position;
        if let Some(actual) = row.offset
            && actual != expected
        {
            return Err(MergeError::OffsetSequence {
                index,
                position,
                expected,
                actual,
            });
        }
    }

    Ok(())
}
